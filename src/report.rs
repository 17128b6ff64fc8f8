//! Per-table and per-run transfer outcomes

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of writing one table into a sink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    /// Rows present in the source table
    pub rows_total: usize,
    pub rows_written: usize,
    pub rows_failed: usize,
    /// Table-level failure (schema, skipped after a fatal error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableReport {
    pub fn new(table: impl Into<String>, rows_total: usize) -> Self {
        Self {
            table: table.into(),
            rows_total,
            ..Default::default()
        }
    }

    /// A table that could not be written at all
    pub fn failed(table: impl Into<String>, rows_total: usize, error: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rows_total,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Whether every source row reached the target
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.rows_failed == 0 && self.rows_written == self.rows_total
    }
}

/// Outcome of a full transfer run
#[derive(Debug, Clone, Serialize)]
pub struct TransferReport {
    /// Description of the sink written to
    pub sink: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tables: Vec<TableReport>,
}

impl TransferReport {
    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.rows_written).sum()
    }

    pub fn rows_failed(&self) -> usize {
        self.tables.iter().map(|t| t.rows_failed).sum()
    }

    pub fn tables_failed(&self) -> usize {
        self.tables.iter().filter(|t| t.error.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.tables.iter().all(TableReport::is_complete)
    }
}
