use std::sync::Arc;

use log::error;

use crate::{
    config::Config,
    db::{self, establish_connection, DbError},
    models::{filter::FilterSet, listing::ListingsPage},
};

/// Runs one filtered search on a blocking worker with its own connection.
///
/// The connection lives inside the worker closure, so it is closed on every
/// exit path: results, empty results, or a failed query.
pub async fn list_listings(config: Arc<Config>, filters: FilterSet) -> Result<ListingsPage, DbError> {
    let timeout = config.request_timeout();

    let worker = tokio::task::spawn_blocking(move || {
        let mut conn = establish_connection(&config)?;
        db::listing::search(&mut conn, &filters)
    });

    match tokio::time::timeout(timeout, worker).await {
        Ok(Ok(result)) => result.map(ListingsPage::from),
        Ok(Err(join_err)) => {
            error!("Listing worker did not finish: {join_err}");
            Err(DbError::Worker(join_err.to_string()))
        }
        Err(_) => Err(DbError::Timeout {
            seconds: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::create_test_config;

    #[tokio::test]
    async fn unreachable_database_is_a_connection_error() {
        let config = Arc::new(create_test_config());
        let result = list_listings(config, FilterSet::default()).await;
        assert!(matches!(result, Err(DbError::Connection(_))));
    }

    #[tokio::test]
    async fn failures_do_not_poison_later_requests() {
        let config = Arc::new(create_test_config());
        for _ in 0..3 {
            let result = list_listings(config.clone(), FilterSet::default()).await;
            assert!(result.is_err());
        }
    }
}
