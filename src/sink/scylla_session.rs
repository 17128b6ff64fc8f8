//! CQL session over the scylla driver

use std::time::Duration;

use ::scylla::{Session, SessionBuilder};
use tokio::runtime::{Builder, Runtime};
use tracing::{info, trace};

use crate::error::{MigrateError, Result};

use super::column_family::CqlSession;

/// Blocking CQL session.
///
/// The driver is async; the session owns a current-thread runtime and
/// blocks on each statement, so transfers stay single-threaded.
pub struct ScyllaSession {
    runtime: Runtime,
    session: Session,
}

impl ScyllaSession {
    /// Connect to a contact point (`host` or `host:port`)
    pub fn connect(contact_point: &str, timeout: Duration) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let session = runtime
            .block_on(
                SessionBuilder::new()
                    .known_node(contact_point)
                    .connection_timeout(timeout)
                    .build(),
            )
            .map_err(|e| {
                MigrateError::Connection(format!("cannot connect to {}: {}", contact_point, e))
            })?;

        info!(contact_point, "connected to CQL cluster");
        Ok(Self { runtime, session })
    }
}

impl CqlSession for ScyllaSession {
    fn execute(&mut self, statement: &str) -> Result<()> {
        trace!(statement, "executing");
        self.runtime
            .block_on(self.session.query(statement, ()))
            .map(|_| ())
            .map_err(|e| MigrateError::Write(format!("{} ({})", e, statement)))
    }
}
