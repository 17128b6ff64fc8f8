//! priamus - SQLite to Cassandra/MongoDB transfer

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use priamus::config::{Config, ReportFormat, SinkKind};
use priamus::output::render_to_stdout;
use priamus::sink::open_sink;
use priamus::source::{SourceReader, SqliteReader};
use priamus::transfer::transfer_tables;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSink {
    Cassandra,
    Mongo,
}

impl From<CliSink> for SinkKind {
    fn from(s: CliSink) -> Self {
        match s {
            CliSink::Cassandra => SinkKind::Cassandra,
            CliSink::Mongo => SinkKind::Mongo,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    Text,
    Json,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(f: CliReportFormat) -> Self {
        match f {
            CliReportFormat::Text => ReportFormat::Text,
            CliReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Copy every table of a SQLite database into Cassandra or MongoDB
#[derive(Parser, Debug)]
#[command(name = "priamus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite source database
    source: PathBuf,

    /// Target address (Cassandra contact point or MongoDB URI)
    target: String,

    /// Target store
    #[arg(short, long, value_enum, default_value = "mongo")]
    sink: CliSink,

    /// Cassandra keyspace to write into
    #[arg(long, default_value = "priamus")]
    keyspace: String,

    /// MongoDB database to write into
    #[arg(long, default_value = "Priamus")]
    database: String,

    /// Drop and recreate the Cassandra keyspace before writing
    #[arg(long)]
    reset: bool,

    /// Primary key column(s) for Cassandra tables (comma-separated; default: first column)
    #[arg(short, long, value_delimiter = ',')]
    key: Vec<String>,

    /// Connect timeout for the target, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Print tables and generated statements/documents without connecting
    #[arg(long)]
    dry_run: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    report: CliReportFormat,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    init_tracing(&cli);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2), // Partial transfer
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default = match (cli.quiet, cli.verbose) {
        (true, _) => "priamus=warn",
        (false, 0) => "priamus=info",
        (false, 1) => "priamus=debug",
        (false, _) => "priamus=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let config = Config::new(cli.source, cli.target)
        .with_sink(cli.sink.into())
        .with_keyspace(cli.keyspace)
        .with_database(cli.database)
        .with_reset_if_exists(cli.reset)
        .with_key_columns(cli.key)
        .with_connect_timeout(Duration::from_secs(cli.timeout))
        .with_dry_run(cli.dry_run)
        .with_report_format(cli.report.into());

    let source = SqliteReader::open(&config.source_path)
        .with_context(|| format!("Failed to open source: {}", config.source_path.display()))?;
    let tables = source
        .read_all_tables()
        .context("Failed to read source tables")?;

    if config.dry_run {
        for table in &tables {
            eprintln!("{}", table);
        }
    }

    let mut sink = open_sink(&config)
        .with_context(|| format!("Failed to open {} target: {}", config.sink, config.target))?;
    let report = transfer_tables(&tables, sink.as_mut());

    render_to_stdout(&report, config.report_format)?;

    Ok(report.is_complete())
}
