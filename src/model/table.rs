//! In-memory table built from row-aligned columns

use indexmap::IndexMap;
use tabled::builder::Builder;
use tabled::settings::Style;

use super::cell::Cell;
use super::column::Column;
use crate::error::{MigrateError, Result};

/// A named, ordered set of row-aligned columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    /// Columns keyed by name, in declaration order
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a column; names must be unique within the table
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.columns.contains_key(column.name()) {
            return Err(MigrateError::schema(
                &self.name,
                format!("duplicate column '{}'", column.name()),
            ));
        }
        self.columns.insert(column.name().to_string(), column);
        Ok(())
    }

    /// Append a cell to the column at `index`
    pub fn add_cell(&mut self, index: usize, cell: Cell) -> Result<()> {
        let column_count = self.columns.len();
        match self.columns.get_index_mut(index) {
            Some((_, column)) => {
                column.push(cell);
                Ok(())
            }
            None => Err(MigrateError::schema(
                &self.name,
                format!("column index {index} out of range ({column_count} columns)"),
            )),
        }
    }

    /// Columns in declaration order
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get_index(index).map(|(_, c)| c)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, taken from the first column
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    /// Whether every column holds the same number of cells
    pub fn is_aligned(&self) -> bool {
        let rows = self.row_count();
        self.columns.values().all(|c| c.len() == rows)
    }

    /// Cell at a column/row position
    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.column_at(column).and_then(|c| c.get(row))
    }

    /// Cells of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        self.columns.values().map(|c| c.get(row)).collect()
    }

    /// Iterate rows as cells in column order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.row_count()).filter_map(move |i| self.row(i))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.column_names());
        for row in self.rows() {
            builder.push_record(row.iter().map(|c| c.raw()));
        }

        let mut grid = builder.build();
        grid.with(Style::modern());
        writeln!(f, "{}", self.name)?;
        write!(f, "{}", grid)
    }
}
