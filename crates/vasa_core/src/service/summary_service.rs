//! Producer summary use-case service.

use crate::model::producer::ProducerSummary;
use crate::model::EntityId;
use crate::repo::summary_repo::SummaryRepository;
use crate::repo::{Page, RepoError, RepoResult};

pub struct SummaryService<R: SummaryRepository> {
    repo: R,
}

impl<R: SummaryRepository> SummaryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Summary of one producer; `NotFound` when the producer does not exist.
    pub fn producer_summary(&self, producer_id: EntityId) -> RepoResult<ProducerSummary> {
        self.repo
            .get_summary(producer_id)?
            .ok_or(RepoError::NotFound {
                entity: "producer",
                id: producer_id,
            })
    }

    pub fn list_summaries(&self, page: &Page) -> RepoResult<Vec<ProducerSummary>> {
        self.repo.list_summaries(page)
    }
}
