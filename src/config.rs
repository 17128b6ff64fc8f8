//! Configuration handling for priamus

use std::path::PathBuf;
use std::time::Duration;

/// Target store kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SinkKind {
    /// Column-family store reached over CQL
    Cassandra,
    /// Document store
    #[default]
    Mongo,
}

impl std::str::FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cassandra" | "scylla" | "cql" => Ok(SinkKind::Cassandra),
            "mongo" | "mongodb" => Ok(SinkKind::Mongo),
            _ => Err(format!("Unknown sink: {}", s)),
        }
    }
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkKind::Cassandra => write!(f, "cassandra"),
            SinkKind::Mongo => write!(f, "mongo"),
        }
    }
}

/// Format of the transfer report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Configuration for one transfer run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite source database
    pub source_path: PathBuf,
    /// Address of the target store (contact point or connection URI)
    pub target: String,
    /// Which sink to write into
    pub sink: SinkKind,
    /// Keyspace for the column-family sink
    pub keyspace: String,
    /// Database for the document sink
    pub database: String,
    /// Drop and recreate the keyspace before writing
    pub reset_if_exists: bool,
    /// Primary key columns; empty means the first column of each table
    pub key_columns: Vec<String>,
    /// Connect timeout for target stores
    pub connect_timeout: Duration,
    /// Build statements/documents without connecting to the target
    pub dry_run: bool,
    /// Report output format
    pub report_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: PathBuf::new(),
            target: String::new(),
            sink: SinkKind::default(),
            keyspace: "priamus".to_string(),
            database: "Priamus".to_string(),
            reset_if_exists: false,
            key_columns: Vec::new(),
            connect_timeout: Duration::from_secs(10),
            dry_run: false,
            report_format: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Create a new Config with source path and target address
    pub fn new(source_path: PathBuf, target: impl Into<String>) -> Self {
        Self {
            source_path,
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_sink(mut self, sink: SinkKind) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = keyspace.into();
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Opt in to dropping an existing keyspace before writing
    pub fn with_reset_if_exists(mut self, reset: bool) -> Self {
        self.reset_if_exists = reset;
        self
    }

    /// Set primary key columns for the column-family sink
    pub fn with_key_columns(mut self, keys: Vec<String>) -> Self {
        self.key_columns = keys;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }
}
