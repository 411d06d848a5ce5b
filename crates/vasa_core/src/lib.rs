//! Core domain logic for the Vasa producer traceability and marketplace store.
//! This crate owns the schema, its constraints and every data access path.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::seed::{seed_demo_data, SeedReport};
pub use db::{
    open_db, open_db_in_memory, open_pool, open_pool_in_memory, ConstraintKind,
    ConstraintViolation, DbConn, DbError, DbPool, DbResult, PoolOptions,
};
pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use model::crop::Crop;
pub use model::{Document, EntityId, Identified};
pub use repo::{Page, RepoError, RepoResult, Repository};
pub use service::entity_service::EntityService;
pub use service::summary_service::SummaryService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
