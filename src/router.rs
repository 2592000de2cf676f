//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/api/v1/health`
//! - POST: `/api/v1/slack/events`
//! - POST: `/api/v1/slack/interactions`

use crate::{
    cardnews::selector::Scope,
    figma::api::FigmaClient,
    slack::{api::SlackClient, auth::SigningSecret, router::slack_router},
};
use axum::{http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

/// Dependencies shared by routes across requests. Nothing in here is mutated
/// after startup.
pub struct Deps {
    pub slack_client: SlackClient,
    pub figma_client: FigmaClient,
    pub scope: Scope,
    pub signing_secret: Option<SigningSecret>,
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    let v1 = Router::new()
        .nest("/slack", slack_router())
        .layer(trace_layer)
        // Exclude the health check route from tracing.
        .route("/health", get(|| async { StatusCode::OK }))
        .with_state(Arc::new(deps));

    let api = Router::new().nest("/v1", v1);

    Router::new().nest("/api", api)
}
