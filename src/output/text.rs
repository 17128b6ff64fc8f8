//! Human-readable report with a per-table grid

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::report::TransferReport;

use super::OutputFormatter;

/// Text output with a coloured summary line
pub struct TextOutput;

impl TextOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextOutput {
    fn render(&self, report: &TransferReport, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "Transfer into {}", report.sink)?;

        if !report.tables.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["table", "rows", "written", "failed", "status"]);
            for table in &report.tables {
                let status = match &table.error {
                    Some(e) => e.clone(),
                    None if table.is_complete() => "ok".to_string(),
                    None => "partial".to_string(),
                };
                builder.push_record([
                    table.table.clone(),
                    table.rows_total.to_string(),
                    table.rows_written.to_string(),
                    table.rows_failed.to_string(),
                    status,
                ]);
            }
            let mut grid = builder.build();
            grid.with(Style::modern());
            writeln!(writer, "{}", grid)?;
        }

        let color = if report.is_complete() { Color::Green } else { Color::Red };
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(
            writer,
            "Summary: {} tables, {} rows written, {} rows failed, {} tables failed",
            report.tables.len(),
            report.rows_written(),
            report.rows_failed(),
            report.tables_failed()
        )?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TableReport;
    use chrono::Utc;
    use termcolor::NoColor;

    #[test]
    fn test_text_report() {
        let now = Utc::now();
        let report = TransferReport {
            sink: "cassandra keyspace 'priamus'".into(),
            started_at: now,
            finished_at: now,
            tables: vec![
                TableReport {
                    rows_written: 1,
                    rows_failed: 1,
                    ..TableReport::new("nums", 2)
                },
                TableReport::failed("hollow", 0, "no cells"),
            ],
        };

        let mut out = NoColor::new(Vec::new());
        TextOutput::new().render(&report, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.starts_with("Transfer into cassandra keyspace 'priamus'\n"));
        assert!(text.contains("partial"));
        assert!(text.contains("no cells"));
        assert!(text.contains(
            "Summary: 2 tables, 1 rows written, 1 rows failed, 1 tables failed"
        ));
    }
}
