//! HTTP surface for the Vasa store.
//!
//! # Responsibility
//! - Expose producer, parcel, campaign, harvest lot, certification, product
//!   and offer CRUD plus producer summaries as JSON over HTTP.
//! - Translate core failures into client/server status codes.
//!
//! # Invariants
//! - Every request uses one pooled connection on the blocking thread pool.
//! - Handlers never validate domain values themselves; the store decides.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod resource;
pub mod router;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
