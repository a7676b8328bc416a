pub mod listing;
pub mod readiness;
pub mod schema;

use diesel::{Connection, ConnectionError, PgConnection};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("could not connect to database: {0}")]
    Connection(#[from] ConnectionError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("database not available after {attempts} attempt(s): {last_error}")]
    Unavailable { attempts: u32, last_error: String },

    #[error("database call timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("database worker failed: {0}")]
    Worker(String),
}

/// Opens a fresh connection. It is closed when the returned value is dropped.
pub fn establish_connection(config: &Config) -> Result<PgConnection, DbError> {
    Ok(PgConnection::establish(&config.database_url)?)
}
