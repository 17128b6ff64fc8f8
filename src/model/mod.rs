//! Storage-agnostic tabular data model

mod cell;
mod column;
mod table;

pub use cell::{Cell, DataType};
pub use column::Column;
pub use table::Table;
