//! Shared connection pool.
//!
//! # Responsibility
//! - Build an explicitly owned `r2d2` pool of configured SQLite connections.
//! - Apply migrations exactly once, before the pool is handed out.
//!
//! # Invariants
//! - Every pooled connection has `foreign_keys=ON` and the busy timeout set.
//! - In-memory pools hold a single, never-recycled connection: each SQLite
//!   memory connection is its own database.

use super::migrations::apply_migrations;
use super::open::configure_connection;
use super::DbResult;
use log::{error, info};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::{Duration, Instant};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Pool sizing and checkout behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Maximum number of open connections.
    pub max_size: u32,
    /// How long a checkout waits before failing with a connectivity error.
    pub connection_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Path that SQLite treats as a private in-memory database.
const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolMode {
    File,
    Memory,
}

impl PoolMode {
    fn as_str(self) -> &'static str {
        match self {
            PoolMode::File => "file",
            PoolMode::Memory => "memory",
        }
    }
}

/// Opens a pool over a database file and migrates it.
///
/// `:memory:` is routed to [`open_pool_in_memory`] and `options` are ignored.
pub fn open_pool(path: impl AsRef<Path>, options: PoolOptions) -> DbResult<DbPool> {
    if path.as_ref() == Path::new(MEMORY_PATH) {
        return open_pool_in_memory();
    }
    let manager = SqliteConnectionManager::file(path)
        .with_init(|conn| configure_connection(conn));
    build_pool(PoolMode::File, manager, options)
}

/// Opens a single-connection pool over a fresh in-memory database.
///
/// The connection is never recycled; dropping it would drop the database.
pub fn open_pool_in_memory() -> DbResult<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| configure_connection(conn));
    let options = PoolOptions {
        max_size: 1,
        ..PoolOptions::default()
    };
    build_pool(PoolMode::Memory, manager, options)
}

fn build_pool(
    mode: PoolMode,
    manager: SqliteConnectionManager,
    options: PoolOptions,
) -> DbResult<DbPool> {
    let started_at = Instant::now();
    info!(
        "event=pool_open module=db status=start mode={} max_size={}",
        mode.as_str(),
        options.max_size
    );

    let mut builder = Pool::builder()
        .max_size(options.max_size)
        .connection_timeout(options.connection_timeout);
    if mode == PoolMode::Memory {
        builder = builder.max_lifetime(None).idle_timeout(None);
    }

    let result: DbResult<DbPool> = builder
        .build(manager)
        .map_err(Into::into)
        .and_then(|pool| {
            let mut conn = pool.get()?;
            apply_migrations(&mut conn)?;
            drop(conn);
            Ok(pool)
        });

    match &result {
        Ok(_) => info!(
            "event=pool_open module=db status=ok mode={} duration_ms={}",
            mode.as_str(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=pool_open module=db status=error mode={} duration_ms={} error={}",
            mode.as_str(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}
