//! Generic CRUD handlers, instantiated once per [`Resource`].
//!
//! GET    /<collection>        - list newest-first (filters + limit/offset)
//! POST   /<collection>        - create, 201 with the stored row
//! GET    /<collection>/:id    - fetch one row
//! PATCH  /<collection>/:id    - partial update
//! DELETE /<collection>/:id    - delete, 204

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vasa_core::{EntityId, Page};

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::resource::Resource;
use crate::state::AppState;

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<R::Filter>,
    QueryParams(page): QueryParams<Page>,
) -> Result<Json<Vec<R::Entity>>, ApiError> {
    let rows = state
        .run(move |conn| R::service(conn).list(&filter, &page))
        .await?;
    Ok(Json(rows))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<R::New>,
) -> Result<(StatusCode, Json<R::Entity>), ApiError> {
    let created = state.run(move |conn| R::service(conn).create(&new)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get<R: Resource>(
    State(state): State<AppState>,
    PathParam(id): PathParam<EntityId>,
) -> Result<Json<R::Entity>, ApiError> {
    let row = state.run(move |conn| R::service(conn).require(id)).await?;
    Ok(Json(row))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    PathParam(id): PathParam<EntityId>,
    JsonBody(patch): JsonBody<R::Patch>,
) -> Result<Json<R::Entity>, ApiError> {
    let updated = state
        .run(move |conn| R::service(conn).update(id, &patch))
        .await?;
    Ok(Json(updated))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    PathParam(id): PathParam<EntityId>,
) -> Result<StatusCode, ApiError> {
    state.run(move |conn| R::service(conn).delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
