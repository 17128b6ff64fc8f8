//! Output formatting for transfer reports

mod json;
mod text;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::ReportFormat;
use crate::report::TransferReport;

pub use json::JsonOutput;
pub use text::TextOutput;

/// Trait for report formatters
pub trait OutputFormatter {
    /// Render a transfer report to a writer
    fn render(&self, report: &TransferReport, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: ReportFormat) -> Box<dyn OutputFormatter> {
        match format {
            ReportFormat::Text => Box::new(TextOutput::new()),
            ReportFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a transfer report to stdout
pub fn render_to_stdout(report: &TransferReport, format: ReportFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    formatter.render(report, &mut stdout)
}
