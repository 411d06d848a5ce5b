//! Producer summary handlers.
//!
//! GET /producers/summary      - every producer's aggregate
//! GET /producers/:id/summary  - one producer's aggregate

use axum::extract::State;
use axum::Json;
use vasa_core::model::producer::ProducerSummary;
use vasa_core::repo::summary_repo::SqliteSummaryRepository;
use vasa_core::{EntityId, Page, SummaryService};

use crate::error::ApiError;
use crate::extract::{PathParam, QueryParams};
use crate::state::AppState;

pub async fn list_summaries(
    State(state): State<AppState>,
    QueryParams(page): QueryParams<Page>,
) -> Result<Json<Vec<ProducerSummary>>, ApiError> {
    let rows = state
        .run(move |conn| SummaryService::new(SqliteSummaryRepository::new(conn)).list_summaries(&page))
        .await?;
    Ok(Json(rows))
}

pub async fn producer_summary(
    State(state): State<AppState>,
    PathParam(producer_id): PathParam<EntityId>,
) -> Result<Json<ProducerSummary>, ApiError> {
    let summary = state
        .run(move |conn| {
            SummaryService::new(SqliteSummaryRepository::new(conn)).producer_summary(producer_id)
        })
        .await?;
    Ok(Json(summary))
}
