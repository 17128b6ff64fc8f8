//! Column-family sink: typed schema plus one insert statement per row

use tracing::{debug, info, warn};

use crate::error::{MigrateError, Result};
use crate::model::Table;
use crate::report::TableReport;

use super::cql;
use super::SinkWriter;

/// A connection that executes CQL statements, discarding result payloads
pub trait CqlSession {
    fn execute(&mut self, statement: &str) -> Result<()>;
}

/// Options for the column-family sink
#[derive(Debug, Clone)]
pub struct ColumnFamilyOptions {
    pub keyspace: String,
    /// Drop any existing keyspace of the same name before writing
    pub reset_if_exists: bool,
    /// Primary key columns by name; empty means the first column
    pub key_columns: Vec<String>,
}

impl ColumnFamilyOptions {
    pub fn new(keyspace: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            reset_if_exists: false,
            key_columns: Vec::new(),
        }
    }
}

/// Writes tables into a keyspace of a column-family store
pub struct ColumnFamilySink<S> {
    session: S,
    options: ColumnFamilyOptions,
}

impl<S: CqlSession> ColumnFamilySink<S> {
    /// Prepare the keyspace and return the sink.
    ///
    /// With `reset_if_exists` the keyspace is dropped and recreated;
    /// otherwise it is created only if missing.
    pub fn new(mut session: S, options: ColumnFamilyOptions) -> Result<Self> {
        let keyspace = options.keyspace.as_str();
        if options.reset_if_exists {
            info!(keyspace, "resetting keyspace");
            session
                .execute(&cql::drop_keyspace(keyspace))
                .map_err(|e| MigrateError::schema(keyspace, e.to_string()))?;
        }
        session
            .execute(&cql::create_keyspace(keyspace, !options.reset_if_exists))
            .map_err(|e| MigrateError::schema(keyspace, e.to_string()))?;

        Ok(Self { session, options })
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Positions of the primary key columns within `table`
    fn key_positions(&self, table: &Table) -> Result<Vec<usize>> {
        if table.column_count() == 0 {
            return Err(MigrateError::schema(table.name(), "table has no columns"));
        }
        if self.options.key_columns.is_empty() {
            return Ok(vec![0]);
        }

        self.options
            .key_columns
            .iter()
            .map(|name| {
                table.column_index(name).ok_or_else(|| {
                    MigrateError::schema(table.name(), format!("key column '{}' not found", name))
                })
            })
            .collect()
    }
}

impl<S: CqlSession> SinkWriter for ColumnFamilySink<S> {
    fn describe(&self) -> String {
        format!("cassandra keyspace '{}'", self.options.keyspace)
    }

    fn write_table(&mut self, table: &Table) -> Result<TableReport> {
        if !table.is_aligned() {
            return Err(MigrateError::schema(table.name(), "columns have different row counts"));
        }

        let keyspace = self.options.keyspace.as_str();
        let key = self.key_positions(table)?;
        let create = cql::create_table(keyspace, table, &key, !self.options.reset_if_exists)?;
        self.session
            .execute(&create)
            .map_err(|e| MigrateError::schema(table.name(), e.to_string()))?;
        debug!(table = table.name(), statement = %create, "created table");

        let mut report = TableReport::new(table.name(), table.row_count());
        let prefix = cql::insert_prefix(keyspace, table);
        for (row_index, row) in table.rows().enumerate() {
            let inserted = cql::insert_row(&prefix, &row)
                .and_then(|statement| self.session.execute(&statement));
            match inserted {
                Ok(()) => report.rows_written += 1,
                Err(e) => {
                    warn!(table = table.name(), row = row_index, error = %e, "insert failed");
                    report.rows_failed += 1;
                }
            }
        }

        info!(
            table = table.name(),
            written = report.rows_written,
            failed = report.rows_failed,
            "table written"
        );
        Ok(report)
    }
}
