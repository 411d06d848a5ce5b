//! Router construction for the Vasa HTTP server.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::{self as axum_mw, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::{info, warn};
use tower_http::cors::CorsLayer;

use crate::handlers::{entity, health, summary};
use crate::resource::{
    Campaigns, Certifications, HarvestLots, Offers, Parcels, Producers, Products, Resource,
};
use crate::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// Builds the full router, served both at the root and under `/api`.
///
/// `api_key` only drives the `api_key_check` log event; requests are never
/// rejected on it.
pub fn build_router(state: AppState, api_key: Option<String>) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/producers/summary", get(summary::list_summaries))
        .route("/producers/:id/summary", get(summary::producer_summary))
        .merge(collection::<Producers>("/producers"))
        .merge(collection::<Parcels>("/parcels"))
        .merge(collection::<Campaigns>("/campaigns"))
        .merge(collection::<HarvestLots>("/harvest-lots"))
        .merge(collection::<Certifications>("/certifications"))
        .merge(collection::<Products>("/products"))
        .merge(collection::<Offers>("/offers"));

    let expected_key: Option<Arc<str>> = api_key.map(Arc::from);

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(axum_mw::from_fn_with_state(expected_key, check_api_key))
        .layer(axum_mw::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn collection<R: Resource>(path: &str) -> Router<AppState> {
    Router::new()
        .route(path, get(entity::list::<R>).post(entity::create::<R>))
        .route(
            &format!("{path}/:id"),
            get(entity::get::<R>)
                .patch(entity::update::<R>)
                .delete(entity::delete::<R>),
        )
}

async fn check_api_key(
    State(expected): State<Option<Arc<str>>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = expected.as_deref() {
        let outcome = match request.headers().get(API_KEY_HEADER) {
            None => "missing",
            Some(provided) if provided.as_bytes() == expected.as_bytes() => "match",
            Some(_) => "mismatch",
        };
        if outcome == "match" {
            info!("event=api_key_check module=server status=ok outcome={outcome}");
        } else {
            warn!("event=api_key_check module=server status=ignored outcome={outcome}");
        }
    }
    next.run(request).await
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=server status=ok method={} path={} code={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
