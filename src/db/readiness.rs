//! Startup gate that blocks until the database accepts connections.

use std::{fmt::Display, thread, time::Duration};

use log::{info, warn};

use super::{establish_connection, DbError};
use crate::config::Config;

/// Probes the configured database with a connect-and-close, sleeping the
/// configured interval between failed attempts. Returns the attempt that
/// succeeded.
pub fn wait_for_ready(config: &Config, max_attempts: u32) -> Result<u32, DbError> {
    wait_until(max_attempts, config.ready_retry_interval(), || {
        establish_connection(config).map(drop)
    })
}

/// Fixed-interval retry loop: no backoff, no jitter.
pub fn wait_until<F, E>(max_attempts: u32, interval: Duration, mut probe: F) -> Result<u32, DbError>
where
    F: FnMut() -> Result<(), E>,
    E: Display,
{
    let mut last_error = String::from("no attempt made");

    for attempt in 1..=max_attempts {
        match probe() {
            Ok(()) => {
                info!("Database ready after {attempt} attempt(s)");
                return Ok(attempt);
            }
            Err(err) => {
                warn!("Waiting for database ({attempt}/{max_attempts}): {err}");
                last_error = err.to_string();
                if attempt < max_attempts {
                    thread::sleep(interval);
                }
            }
        }
    }

    Err(DbError::Unavailable {
        attempts: max_attempts,
        last_error,
    })
}
