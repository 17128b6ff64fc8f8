//! Document store backed by the MongoDB sync client

use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::sync::{Client, Database};
use tracing::{info, trace};

use crate::error::{MigrateError, Result};

use super::document::DocumentStore;

/// MongoDB database handle.
///
/// The client lives exactly as long as the store; dropping it releases
/// the driver's connections.
pub struct MongoStore {
    // Keeps the connection pool alive for `database`
    _client: Client,
    database: Database,
    name: String,
}

impl MongoStore {
    /// Connect and verify the server answers a ping
    pub fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self> {
        let uri = connection_uri(uri, timeout);
        let client = Client::with_uri_str(&uri)
            .map_err(|e| MigrateError::Connection(format!("invalid MongoDB address: {}", e)))?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .run()
            .map_err(|e| MigrateError::Connection(format!("cannot reach MongoDB: {}", e)))?;

        info!(database, "connected to MongoDB");
        Ok(Self {
            _client: client,
            database: db,
            name: database.to_string(),
        })
    }
}

impl DocumentStore for MongoStore {
    fn database(&self) -> &str {
        &self.name
    }

    fn insert_document(&mut self, collection: &str, document: Document) -> Result<()> {
        trace!(collection, "inserting document");
        self.database
            .collection::<Document>(collection)
            .insert_one(document)
            .run()
            .map(|_| ())
            .map_err(|e| MigrateError::Write(e.to_string()))
    }
}

/// Normalize a target address into a connection URI.
///
/// Bare `host[:port]` gets the `mongodb://` scheme, and connect/server
/// selection timeouts are added unless the URI already sets them.
pub fn connection_uri(address: &str, timeout: Duration) -> String {
    let mut uri = if address.contains("://") {
        address.to_string()
    } else {
        format!("mongodb://{}", address)
    };

    let millis = timeout.as_millis();
    let mut params = Vec::new();
    for key in ["connectTimeoutMS", "serverSelectionTimeoutMS"] {
        if !uri.contains(&format!("{}=", key)) {
            params.push(format!("{}={}", key, millis));
        }
    }
    if params.is_empty() {
        return uri;
    }

    if !uri.contains('?') {
        let authority_start = uri.find("://").map_or(0, |i| i + 3);
        if !uri[authority_start..].contains('/') {
            uri.push('/');
        }
        uri.push('?');
    } else if !uri.ends_with('?') && !uri.ends_with('&') {
        uri.push('&');
    }
    uri.push_str(&params.join("&"));
    uri
}
