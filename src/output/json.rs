//! JSON output format

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::report::{TableReport, TransferReport};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonTotals {
    tables: usize,
    tables_failed: usize,
    rows_written: usize,
    rows_failed: usize,
    complete: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    sink: &'a str,
    started_at: String,
    finished_at: String,
    tables: &'a [TableReport],
    totals: JsonTotals,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, report: &TransferReport, writer: &mut dyn WriteColor) -> Result<()> {
        let output = JsonReport {
            sink: &report.sink,
            started_at: report.started_at.to_rfc3339(),
            finished_at: report.finished_at.to_rfc3339(),
            tables: &report.tables,
            totals: JsonTotals {
                tables: report.tables.len(),
                tables_failed: report.tables_failed(),
                rows_written: report.rows_written(),
                rows_failed: report.rows_failed(),
                complete: report.is_complete(),
            },
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use termcolor::NoColor;

    #[test]
    fn test_json_report() {
        let now = Utc::now();
        let report = TransferReport {
            sink: "mongo database 'Priamus'".into(),
            started_at: now,
            finished_at: now,
            tables: vec![
                TableReport {
                    rows_written: 2,
                    ..TableReport::new("T", 2)
                },
                TableReport::failed("E", 0, "schema error"),
            ],
        };

        let mut out = NoColor::new(Vec::new());
        JsonOutput::compact().render(&report, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out.into_inner()).unwrap();

        assert_eq!(value["sink"], "mongo database 'Priamus'");
        assert_eq!(value["tables"][0]["table"], "T");
        assert_eq!(value["tables"][0]["rows_written"], 2);
        assert!(value["tables"][0].get("error").is_none());
        assert_eq!(value["tables"][1]["error"], "schema error");
        assert_eq!(value["totals"]["tables_failed"], 1);
        assert_eq!(value["totals"]["complete"], false);
    }
}
