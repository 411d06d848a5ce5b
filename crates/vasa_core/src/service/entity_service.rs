//! Entity CRUD use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers, one instance per
//!   entity repository.
//! - Emit metadata-only write events (`entity_create`, `entity_update`,
//!   `entity_delete`).
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::{EntityId, Identified};
use crate::repo::{Page, RepoError, RepoResult, Repository};
use log::{info, warn};

/// Use-case wrapper around one entity repository.
pub struct EntityService<R: Repository> {
    repo: R,
}

impl<R> EntityService<R>
where
    R: Repository,
    R::Entity: Identified,
{
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a new row and returns it as stored.
    pub fn create(&self, new: &R::New) -> RepoResult<R::Entity> {
        let result = self.repo.create(new);
        match &result {
            Ok(entity) => info!(
                "event=entity_create module=service status=ok entity={} id={}",
                R::ENTITY,
                entity.id()
            ),
            Err(err) => log_write_failure("entity_create", R::ENTITY, None, err),
        }
        result
    }

    /// Gets one row by id.
    pub fn get(&self, id: EntityId) -> RepoResult<Option<R::Entity>> {
        self.repo.get(id)
    }

    /// Gets one row by id, mapping absence to `RepoError::NotFound`.
    pub fn require(&self, id: EntityId) -> RepoResult<R::Entity> {
        self.repo.get(id)?.ok_or(RepoError::NotFound {
            entity: R::ENTITY,
            id,
        })
    }

    /// Lists rows newest-first.
    pub fn list(&self, filter: &R::Filter, page: &Page) -> RepoResult<Vec<R::Entity>> {
        self.repo.list(filter, page)
    }

    /// Lists every row newest-first.
    pub fn list_all(&self) -> RepoResult<Vec<R::Entity>> {
        self.repo.list(&R::Filter::default(), &Page::default())
    }

    /// Applies a partial update.
    ///
    /// Returns repository-level not-found or constraint errors unchanged.
    pub fn update(&self, id: EntityId, patch: &R::Patch) -> RepoResult<R::Entity> {
        let result = self.repo.update(id, patch);
        match &result {
            Ok(_) => info!(
                "event=entity_update module=service status=ok entity={} id={}",
                R::ENTITY,
                id
            ),
            Err(err) => log_write_failure("entity_update", R::ENTITY, Some(id), err),
        }
        result
    }

    /// Deletes a row; dependents follow the store's cascade/set-null policy.
    pub fn delete(&self, id: EntityId) -> RepoResult<()> {
        let result = self.repo.delete(id);
        match &result {
            Ok(()) => info!(
                "event=entity_delete module=service status=ok entity={} id={}",
                R::ENTITY,
                id
            ),
            Err(err) => log_write_failure("entity_delete", R::ENTITY, Some(id), err),
        }
        result
    }
}

fn log_write_failure(event: &str, entity: &str, id: Option<EntityId>, err: &RepoError) {
    let id = id.map_or_else(|| "none".to_string(), |id| id.to_string());
    let error_code = match err {
        RepoError::Constraint(violation) => violation.kind.as_str(),
        RepoError::NotFound { .. } => "not_found",
        RepoError::Db(db) if db.is_connectivity() => "store_unavailable",
        RepoError::Db(_) => "db_error",
        RepoError::InvalidData(_) => "invalid_data",
    };
    warn!(
        "event={} module=service status=error entity={} id={} error_code={}",
        event, entity, id, error_code
    );
}
