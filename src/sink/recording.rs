//! Recording targets used for dry runs

use std::io::Write;

use mongodb::bson::{Bson, Document};

use crate::error::Result;

use super::column_family::CqlSession;
use super::document::DocumentStore;

/// Captures CQL statements instead of executing them
#[derive(Default)]
pub struct RecordingSession {
    statements: Vec<String>,
    echo: Option<Box<dyn Write>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write every statement, `;`-terminated, to `writer`
    pub fn echo(writer: impl Write + 'static) -> Self {
        Self {
            statements: Vec::new(),
            echo: Some(Box::new(writer)),
        }
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }
}

impl CqlSession for RecordingSession {
    fn execute(&mut self, statement: &str) -> Result<()> {
        if let Some(writer) = self.echo.as_mut() {
            writeln!(writer, "{};", statement)?;
        }
        self.statements.push(statement.to_string());
        Ok(())
    }
}

/// Captures documents instead of inserting them
pub struct RecordingStore {
    database: String,
    documents: Vec<(String, Document)>,
    echo: Option<Box<dyn Write>>,
}

impl RecordingStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            documents: Vec::new(),
            echo: None,
        }
    }

    /// Also write every document as `collection: {json}` to `writer`
    pub fn echo(database: impl Into<String>, writer: impl Write + 'static) -> Self {
        Self {
            echo: Some(Box::new(writer)),
            ..Self::new(database)
        }
    }

    pub fn documents(&self) -> &[(String, Document)] {
        &self.documents
    }
}

impl DocumentStore for RecordingStore {
    fn database(&self) -> &str {
        &self.database
    }

    fn insert_document(&mut self, collection: &str, document: Document) -> Result<()> {
        if let Some(writer) = self.echo.as_mut() {
            let json = Bson::Document(document.clone()).into_relaxed_extjson();
            writeln!(writer, "{}: {}", collection, json)?;
        }
        self.documents.push((collection.to_string(), document));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use mongodb::bson::doc;

    /// Cloneable in-memory writer so the test can read what was echoed
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    #[test]
    fn test_session_echoes_statements() {
        let buf = SharedBuf::default();
        let mut session = RecordingSession::echo(buf.clone());
        session.execute("DROP KEYSPACE IF EXISTS ks").unwrap();
        assert_eq!(session.statements(), &["DROP KEYSPACE IF EXISTS ks".to_string()]);
        assert_eq!(buf.text(), "DROP KEYSPACE IF EXISTS ks;\n");
    }

    #[test]
    fn test_store_echoes_json() {
        let buf = SharedBuf::default();
        let mut store = RecordingStore::echo("db", buf.clone());
        store
            .insert_document("T", doc! { "id": "1", "name": "Alice" })
            .unwrap();
        assert_eq!(store.documents().len(), 1);
        assert_eq!(buf.text(), "T: {\"id\":\"1\",\"name\":\"Alice\"}\n");
    }
}
