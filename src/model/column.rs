//! Named column of cells

use super::cell::{Cell, DataType};

/// An ordered, named sequence of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    /// Create an empty column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }

    /// Append a cell in row order
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Type of the column, taken from its first cell
    pub fn data_type(&self) -> Option<DataType> {
        self.cells.first().map(Cell::data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_from_first_cell() {
        let mut column = Column::new("price");
        assert_eq!(column.data_type(), None);

        column.push(Cell::from_sqlite("1.5", "NUMERIC"));
        column.push(Cell::from_sqlite("2", "NUMERIC"));
        assert_eq!(column.data_type(), Some(DataType::FloatingPoint));
        assert_eq!(column.len(), 2);
        assert_eq!(column.get(1).map(Cell::raw), Some("2"));
    }
}
