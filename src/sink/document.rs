//! Document sink: one text-valued document per row

use mongodb::bson::Document;
use tracing::{info, warn};

use crate::error::{MigrateError, Result};
use crate::model::Table;
use crate::report::TableReport;

use super::SinkWriter;

/// A store that accepts documents into named collections
pub trait DocumentStore {
    /// Name of the database written to
    fn database(&self) -> &str;

    fn insert_document(&mut self, collection: &str, document: Document) -> Result<()>;
}

/// Build the document for one row: column name to raw text value.
///
/// Numeric cells are not coerced; every value is stored as a string.
pub fn row_document(table: &Table, row: usize) -> Option<Document> {
    let mut document = Document::new();
    for column in table.columns() {
        let cell = column.get(row)?;
        document.insert(column.name(), cell.raw());
    }
    Some(document)
}

/// Writes each table into a collection of the same name
pub struct DocumentSink<D> {
    store: D,
}

impl<D: DocumentStore> DocumentSink<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn into_store(self) -> D {
        self.store
    }
}

impl<D: DocumentStore> SinkWriter for DocumentSink<D> {
    fn describe(&self) -> String {
        format!("mongo database '{}'", self.store.database())
    }

    fn write_table(&mut self, table: &Table) -> Result<TableReport> {
        if !table.is_aligned() {
            return Err(MigrateError::schema(table.name(), "columns have different row counts"));
        }

        let mut report = TableReport::new(table.name(), table.row_count());
        for row in 0..table.row_count() {
            let Some(document) = row_document(table, row) else {
                continue;
            };
            match self.store.insert_document(table.name(), document) {
                Ok(()) => report.rows_written += 1,
                Err(e) => {
                    warn!(table = table.name(), row, error = %e, "document insert failed");
                    report.rows_failed += 1;
                }
            }
        }

        info!(
            table = table.name(),
            written = report.rows_written,
            failed = report.rows_failed,
            "collection written"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Column};
    use mongodb::bson::doc;

    #[derive(Default)]
    struct FakeStore {
        inserted: Vec<(String, Document)>,
        reject_row_with: Option<&'static str>,
    }

    impl DocumentStore for FakeStore {
        fn database(&self) -> &str {
            "test"
        }

        fn insert_document(&mut self, collection: &str, document: Document) -> Result<()> {
            if let Some(bad) = self.reject_row_with {
                if document.values().any(|v| v.as_str() == Some(bad)) {
                    return Err(MigrateError::Write("duplicate key".into()));
                }
            }
            self.inserted.push((collection.to_string(), document));
            Ok(())
        }
    }

    fn people() -> Table {
        let mut table = Table::new("T");
        table.add_column(Column::new("id")).unwrap();
        table.add_column(Column::new("name")).unwrap();
        for (id, name) in [("1", "Alice"), ("2", "O'Brien")] {
            table.add_cell(0, Cell::from_sqlite(id, "INTEGER")).unwrap();
            table.add_cell(1, Cell::from_sqlite(name, "TEXT")).unwrap();
        }
        table
    }

    #[test]
    fn test_documents_hold_text_values() {
        let mut sink = DocumentSink::new(FakeStore::default());
        let report = sink.write_table(&people()).unwrap();

        assert!(report.is_complete());
        assert_eq!(
            sink.store().inserted,
            vec![
                ("T".to_string(), doc! { "id": "1", "name": "Alice" }),
                ("T".to_string(), doc! { "id": "2", "name": "O'Brien" }),
            ]
        );
    }

    #[test]
    fn test_field_order_follows_columns() {
        let document = row_document(&people(), 1).unwrap();
        let keys: Vec<_> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name"]);
        assert_eq!(row_document(&people(), 2), None);
    }

    #[test]
    fn test_failed_documents_are_counted() {
        let mut sink = DocumentSink::new(FakeStore {
            reject_row_with: Some("Alice"),
            ..Default::default()
        });
        let reports = sink.write_tables(&[people(), people()]);

        for report in &reports {
            assert_eq!(report.rows_written, 1);
            assert_eq!(report.rows_failed, 1);
        }
        assert_eq!(sink.store().inserted.len(), 2);
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let mut table = Table::new("empty");
        table.add_column(Column::new("id")).unwrap();
        let mut sink = DocumentSink::new(FakeStore::default());
        let report = sink.write_table(&table).unwrap();
        assert!(report.is_complete());
        assert!(sink.store().inserted.is_empty());
    }
}
