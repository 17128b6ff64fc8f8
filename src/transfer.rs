//! Single-pass transfer from a source into one sink

use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::model::Table;
use crate::report::TransferReport;
use crate::sink::SinkWriter;
use crate::source::SourceReader;

/// Read every source table, then write them all into `sink`.
///
/// Source failures abort the run; sink failures are isolated per table and
/// reported.
pub fn run_transfer(source: &dyn SourceReader, sink: &mut dyn SinkWriter) -> Result<TransferReport> {
    let tables = source.read_all_tables()?;
    Ok(transfer_tables(&tables, sink))
}

/// Write already materialized tables into `sink`
pub fn transfer_tables(tables: &[Table], sink: &mut dyn SinkWriter) -> TransferReport {
    let started_at = Utc::now();
    let target = sink.describe();
    info!(tables = tables.len(), sink = %target, "starting transfer");

    let reports = sink.write_tables(tables);
    let report = TransferReport {
        sink: target,
        started_at,
        finished_at: Utc::now(),
        tables: reports,
    };

    info!(
        rows_written = report.rows_written(),
        rows_failed = report.rows_failed(),
        tables_failed = report.tables_failed(),
        "transfer finished"
    );
    report
}
