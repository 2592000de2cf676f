//! Talk to Slack in both directions: receive events and interactions from it,
//! and post and edit messages through its Web API.
//!
//! See [router::slack_router] for the inbound side and [api::SlackClient] for
//! the outbound side.

pub mod api;
pub mod auth;
pub mod block;
pub mod error;
pub mod event;
pub mod interaction;
pub mod message;
pub mod router;

pub use error::SlackError;
