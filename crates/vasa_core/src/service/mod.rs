//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.
//!
//! # Invariants
//! - Services add no validation of their own: the store's constraints are
//!   the authority and their failures propagate unchanged.

pub mod entity_service;
pub mod summary_service;
