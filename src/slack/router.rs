//! Slack subrouter definition.
//!
//! The following subroutes are supported:
//!
//! - POST: `/events`
//! - POST: `/interactions`
//!
//! Both must be signed with the app's signing secret. Slack expects an answer
//! within three seconds, so the work behind each request runs in the
//! background once the request has been acknowledged.

use super::{
    auth::*,
    event::{Event, EventEnvelope},
    interaction::{Interaction, InteractionForm},
};
use crate::{bot::flow, router::Deps};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Present on redeliveries of an event we were too slow to acknowledge.
const RETRY_HEADER: &str = "x-slack-retry-num";

type Reply = (StatusCode, String);

/// Instantiate a new Slack subrouter.
pub fn slack_router() -> Router<Arc<Deps>> {
    Router::new()
        .route("/events", post(events_handler))
        .route("/interactions", post(interactions_handler))
}

/// Handler for the POST subroute `/events`.
///
/// Accepts an [EventEnvelope] in `application/json` format. URL verification
/// challenges are echoed back; channel messages are checked for commands.
async fn events_handler(
    State(deps): State<Arc<Deps>>,
    headers: HeaderMap,
    // We can't parse this at all yet as we need to compare signatures.
    body: Bytes,
) -> Result<Reply, Reply> {
    authenticate(&deps, &headers, &body)?;

    let envelope = serde_json::from_slice::<EventEnvelope>(&body).map_err(unprocessable)?;

    match envelope {
        EventEnvelope::UrlVerification { challenge } => Ok((StatusCode::OK, challenge)),
        EventEnvelope::EventCallback {
            event: Event::Message(msg),
        } => {
            if let Some(n) = header(&headers, RETRY_HEADER) {
                info!("Ignoring redelivery #{} of a message event", n);
                return Ok((StatusCode::OK, String::new()));
            }

            tokio::spawn(async move { flow::on_message(&deps, &msg).await });
            Ok((StatusCode::OK, String::new()))
        }
        EventEnvelope::EventCallback { event: Event::Other } | EventEnvelope::Other => {
            Ok((StatusCode::OK, String::new()))
        }
    }
}

/// Handler for the POST subroute `/interactions`.
///
/// Accepts a form-encoded `payload` holding an [Interaction] in JSON.
async fn interactions_handler(
    State(deps): State<Arc<Deps>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Reply, Reply> {
    authenticate(&deps, &headers, &body)?;

    let form = serde_urlencoded::from_bytes::<InteractionForm>(&body).map_err(unprocessable)?;
    let interaction = serde_json::from_str::<Interaction>(&form.payload).map_err(unprocessable)?;

    if let Interaction::BlockActions(actions) = interaction {
        tokio::spawn(async move { flow::on_block_actions(&deps, &actions).await });
    }

    Ok((StatusCode::OK, String::new()))
}

/// Check a request really came from Slack.
fn authenticate(deps: &Deps, headers: &HeaderMap, body: &[u8]) -> Result<(), Reply> {
    let secret = deps
        .signing_secret
        .as_ref()
        .ok_or_else(|| (StatusCode::PRECONDITION_FAILED, String::new()))?;

    validate_signature(
        secret,
        header(headers, TIMESTAMP_HEADER),
        header(headers, SIGNATURE_HEADER),
        body,
        Utc::now().timestamp(),
    )
    .map_err(|e| {
        let msg = match e {
            SignatureError::Missing => "Missing Slack signature",
            SignatureError::Stale => "Stale Slack signature",
            SignatureError::Invalid => "Invalid Slack signature",
        };
        warn!(msg);

        (StatusCode::UNAUTHORIZED, String::new())
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn unprocessable<E: std::fmt::Display>(e: E) -> Reply {
    let msg = format!("Failed to deserialize payload: {}", e);
    warn!("{}", msg);

    (StatusCode::UNPROCESSABLE_ENTITY, msg)
}
