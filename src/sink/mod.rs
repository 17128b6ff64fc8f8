//! Write-only connectors that persist tables into target stores

pub mod column_family;
pub mod cql;
pub mod document;
mod mongo;
mod recording;
mod scylla_session;

use tracing::{error, warn};

use crate::config::{Config, SinkKind};
use crate::error::Result;
use crate::model::Table;
use crate::report::TableReport;

pub use self::column_family::{ColumnFamilyOptions, ColumnFamilySink, CqlSession};
pub use self::document::{DocumentSink, DocumentStore};
pub use self::mongo::MongoStore;
pub use self::recording::{RecordingSession, RecordingStore};
pub use self::scylla_session::ScyllaSession;

/// Capability to persist tables into a target store
pub trait SinkWriter {
    /// Human-readable description of the target
    fn describe(&self) -> String;

    /// Write one table.
    ///
    /// Row-level failures are counted in the report; an `Err` means the
    /// table as a whole could not be written.
    fn write_table(&mut self, table: &Table) -> Result<TableReport>;

    /// Write tables in order, isolating failures per table.
    ///
    /// A fatal error (lost connection) stops the batch and marks the
    /// remaining tables as skipped.
    fn write_tables(&mut self, tables: &[Table]) -> Vec<TableReport> {
        let mut reports = Vec::with_capacity(tables.len());
        let mut remaining = tables.iter();

        for table in remaining.by_ref() {
            match self.write_table(table) {
                Ok(report) => reports.push(report),
                Err(e) if e.is_fatal() => {
                    error!(table = table.name(), error = %e, "aborting transfer");
                    reports.push(TableReport::failed(table.name(), table.row_count(), e.to_string()));
                    break;
                }
                Err(e) => {
                    warn!(table = table.name(), error = %e, "table not transferred");
                    reports.push(TableReport::failed(table.name(), table.row_count(), e.to_string()));
                }
            }
        }

        for table in remaining {
            reports.push(TableReport::failed(
                table.name(),
                table.row_count(),
                "skipped after fatal error",
            ));
        }

        reports
    }
}

/// Build the sink selected by the configuration.
///
/// In dry-run mode the sink writes into a recording target that echoes
/// statements or documents to stderr instead of connecting, leaving stdout
/// to the report.
pub fn open_sink(config: &Config) -> Result<Box<dyn SinkWriter>> {
    let options = ColumnFamilyOptions {
        keyspace: config.keyspace.clone(),
        reset_if_exists: config.reset_if_exists,
        key_columns: config.key_columns.clone(),
    };

    let sink: Box<dyn SinkWriter> = match (config.sink, config.dry_run) {
        (SinkKind::Cassandra, false) => {
            let session = ScyllaSession::connect(&config.target, config.connect_timeout)?;
            Box::new(ColumnFamilySink::new(session, options)?)
        }
        (SinkKind::Cassandra, true) => {
            let session = RecordingSession::echo(std::io::stderr());
            Box::new(ColumnFamilySink::new(session, options)?)
        }
        (SinkKind::Mongo, false) => {
            let store = MongoStore::connect(&config.target, &config.database, config.connect_timeout)?;
            Box::new(DocumentSink::new(store))
        }
        (SinkKind::Mongo, true) => {
            let store = RecordingStore::echo(config.database.clone(), std::io::stderr());
            Box::new(DocumentSink::new(store))
        }
    };

    Ok(sink)
}
