//! Cell values and source type inference

/// Semantic type of a cell, decided from the source column annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    FloatingPoint,
    String,
}

impl DataType {
    /// Infer the type from a SQLite declared type.
    ///
    /// Matching is case-sensitive: exactly `INTEGER` is an integer, anything
    /// starting with `NUMERIC` is floating point, everything else is text.
    /// The value itself is never inspected.
    pub fn from_sqlite_annotation(annotation: &str) -> Self {
        if annotation == "INTEGER" {
            DataType::Integer
        } else if annotation.starts_with("NUMERIC") {
            DataType::FloatingPoint
        } else {
            DataType::String
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, DataType::String)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Integer => write!(f, "integer"),
            DataType::FloatingPoint => write!(f, "float"),
            DataType::String => write!(f, "string"),
        }
    }
}

/// A single scalar value as read from the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    raw: String,
    data_type: DataType,
}

impl Cell {
    pub fn new(raw: impl Into<String>, data_type: DataType) -> Self {
        Self {
            raw: raw.into(),
            data_type,
        }
    }

    /// Create a cell from a raw SQLite value and its column's declared type
    pub fn from_sqlite(raw: impl Into<String>, annotation: &str) -> Self {
        Self::new(raw, DataType::from_sqlite_annotation(annotation))
    }

    /// The value exactly as the source rendered it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
