//! SQLite source reader

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::error::{MigrateError, Result};
use crate::model::{Cell, Column, Table};

use super::SourceReader;

/// Text used for SQL NULL values
const NULL_TEXT: &str = "NULL";

/// Reads tables out of a SQLite database file
pub struct SqliteReader {
    conn: Connection,
    path: PathBuf,
}

impl SqliteReader {
    /// Open an existing database file read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| {
            MigrateError::Connection(format!("cannot open {}: {}", path.display(), e))
        })?;

        // Opening is lazy; touch the catalog so a non-database file fails here
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| MigrateError::Connection(format!("cannot read {}: {}", path.display(), e)))?;

        info!(path = %path.display(), "opened SQLite source");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column names and declared types, in declaration order
    fn column_catalog(&self, table: &str) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")?;
        let columns = stmt
            .query_map([table], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;
        Ok(columns)
    }
}

impl SourceReader for SqliteReader {
    fn list_table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             ORDER BY rowid",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        debug!(tables = ?names, "listed source tables");
        Ok(names)
    }

    fn read_table(&self, name: &str) -> Result<Table> {
        let catalog = self.column_catalog(name)?;
        if catalog.is_empty() {
            return Err(MigrateError::Query(format!("table '{}' not found", name)));
        }

        let mut table = Table::new(name);
        for (column_name, _) in &catalog {
            table.add_column(Column::new(column_name.as_str()))?;
        }

        // Select columns explicitly in catalog order so cells line up with
        // the declared types regardless of how `*` would be expanded.
        let select_list = catalog
            .iter()
            .map(|(column_name, _)| format!("CAST({} AS TEXT)", quote_identifier(column_name)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} FROM {}", select_list, quote_identifier(name));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for (index, (_, annotation)) in catalog.iter().enumerate() {
                let raw = value_text(row.get_ref(index)?);
                table.add_cell(index, Cell::from_sqlite(raw, annotation))?;
            }
        }

        debug!(
            table = name,
            columns = table.column_count(),
            rows = table.row_count(),
            "read source table"
        );
        Ok(table)
    }
}

/// Textual rendering of a value, as SQLite's own text conversion produces it
fn value_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => NULL_TEXT.to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
