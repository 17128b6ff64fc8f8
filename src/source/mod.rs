//! Read-only connectors that materialize source tables

mod sqlite;

use tracing::debug;

use crate::error::Result;
use crate::model::Table;

pub use self::sqlite::SqliteReader;

/// Capability to enumerate and read tables from a source store
pub trait SourceReader {
    /// User tables in catalog order, excluding internal objects
    fn list_table_names(&self) -> Result<Vec<String>>;

    /// Fully materialize one table, columns in declaration order
    fn read_table(&self, name: &str) -> Result<Table>;

    /// Read every table returned by [`SourceReader::list_table_names`]
    fn read_all_tables(&self) -> Result<Vec<Table>> {
        let names = self.list_table_names()?;
        debug!(count = names.len(), "reading source tables");
        names.iter().map(|name| self.read_table(name)).collect()
    }
}
