//! HTTP surface for the sdmentor review service.
//!
//! One POST endpoint per interview step plus a health check. All bodies
//! are JSON with camelCase field names matching the web frontend. Review
//! trouble (missing credential, failed LLM call, broken renderer) never
//! surfaces as a non-2xx response; the handlers serialize whatever the
//! reviewer produced, fallback content included.

pub mod handlers;
pub mod schemas;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use sdmentor_core::Reviewer;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub reviewer: Arc<Reviewer>,
}

/// Build the application router.
///
/// `allowed_origin` is the frontend origin permitted by CORS; an
/// unparseable value disables cross-origin access rather than failing.
pub fn router(state: AppState, allowed_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => {
            cors = cors.allow_origin(origin);
        }
        Err(_) => {
            tracing::warn!(origin = %allowed_origin, "invalid allowed origin; CORS disabled");
        }
    }

    Router::new()
        .route("/validate", post(handlers::validate))
        .route("/validate-apis", post(handlers::validate_apis))
        .route("/validate-diagram", post(handlers::validate_diagram))
        .route("/validate-estimation", post(handlers::validate_estimation))
        .route("/validate-data-model", post(handlers::validate_data_model))
        .route("/validate-flow", post(handlers::validate_flow))
        .route("/validate-deep-dives", post(handlers::validate_deep_dives))
        .route(
            "/validate-detailed-diagram",
            post(handlers::validate_detailed_diagram),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
