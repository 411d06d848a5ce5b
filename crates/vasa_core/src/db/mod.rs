//! SQLite storage bootstrap, pooling and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections and pools for VASA core.
//! - Apply schema migrations in deterministic order.
//! - Classify store-raised failures into constraint and connectivity kinds.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - Every connection handed out runs with `foreign_keys=ON`; cascade and
//!   set-null policies are enforced by the store, never emulated in Rust.

use rusqlite::ffi;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod pool;
pub mod seed;

pub use open::{open_db, open_db_in_memory};
pub use pool::{open_pool, open_pool_in_memory, DbConn, DbPool, PoolOptions};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Pool(r2d2::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns the constraint violation carried by this error, if any.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::Sqlite(err) => ConstraintViolation::from_sqlite(err),
            Self::Pool(_) | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }

    /// Whether the store could not be reached (pool exhausted, file locked,
    /// database unopenable) as opposed to rejecting the request itself.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Pool(_) => true,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::CannotOpen
                    | ErrorCode::SystemIoFailure
            ),
            Self::Sqlite(_) | Self::UnsupportedSchemaVersion { .. } => false,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Pool(err) => write!(f, "connection pool unavailable: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Pool(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<r2d2::Error> for DbError {
    fn from(value: r2d2::Error) -> Self {
        Self::Pool(value)
    }
}

/// Constraint family rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A required column was missing.
    NotNull,
    /// A reference did not resolve to an existing row.
    ForeignKey,
    /// A CHECK constraint (enum membership, JSON validity) failed.
    Check,
    /// A unique index (`producers.code`, `campaigns(crop, season_year)`) was hit.
    Unique,
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::ForeignKey => "foreign_key",
            Self::Check => "check",
            Self::Unique => "unique",
        }
    }
}

/// Store-raised constraint failure with the engine's diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    pub message: String,
}

impl ConstraintViolation {
    /// Classifies a rusqlite error by SQLite extended result code.
    ///
    /// Returns `None` for errors that are not constraint violations.
    pub fn from_sqlite(err: &rusqlite::Error) -> Option<Self> {
        let rusqlite::Error::SqliteFailure(failure, message) = err else {
            return None;
        };
        if failure.code != ErrorCode::ConstraintViolation {
            return None;
        }

        let kind = match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                ConstraintKind::Unique
            }
            // Remaining families (trigger, rowid, ...) are not produced by this
            // schema; CHECK is the closest caller-facing bucket.
            _ => ConstraintKind::Check,
        };

        Some(Self {
            kind,
            message: message
                .clone()
                .unwrap_or_else(|| "constraint failed".to_string()),
        })
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "constraint violation ({}): {}",
            self.kind.as_str(),
            self.message
        )
    }
}

impl Error for ConstraintViolation {}
