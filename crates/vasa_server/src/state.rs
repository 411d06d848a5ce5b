//! Shared request state.

use crate::error::ApiError;
use rusqlite::Connection;
use vasa_core::{DbPool, RepoResult};

#[derive(Clone)]
pub struct AppState {
    pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs `work` with one pooled connection on the blocking thread pool.
    ///
    /// A pool checkout timeout surfaces as a connectivity error (503).
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            work(&conn)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(ApiError::from),
            Err(err) => Err(ApiError::internal(format!("store task failed: {err}"))),
        }
    }
}
