//! priamus - Move relational tables into column-family and document stores
//!
//! Tables are read from a SQLite file into a storage-agnostic model and
//! handed to a sink that maps them onto Cassandra keyspaces (typed schema,
//! one CQL insert per row) or MongoDB collections (one document per row).

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod report;
pub mod sink;
pub mod source;
pub mod transfer;

pub use config::Config;
pub use error::{MigrateError, Result};
pub use model::{Cell, Column, DataType, Table};
pub use report::{TableReport, TransferReport};
pub use sink::SinkWriter;
pub use source::SourceReader;
pub use transfer::run_transfer;
