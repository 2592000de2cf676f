//! Payloads delivered to us by Slack's Events API.
//!
//! <https://api.slack.com/apis/connections/events-api#callback-field>

use super::message::ChannelId;
use serde::Deserialize;

/// The outer envelope of every Events API request.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum EventEnvelope {
    /// Sent once when the request URL is configured. The challenge must be
    /// echoed back.
    #[serde(rename = "url_verification")]
    UrlVerification { challenge: String },
    #[serde(rename = "event_callback")]
    EventCallback { event: Event },
    #[serde(other)]
    Other,
}

/// The subset of event types we subscribe to.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "message")]
    Message(MessageEvent),
    #[serde(other)]
    Other,
}

/// <https://api.slack.com/events/message>
#[derive(Debug, PartialEq, Deserialize)]
pub struct MessageEvent {
    pub channel: ChannelId,
    #[serde(default)]
    pub text: String,
    pub user: Option<String>,
    /// Present when the message was posted by a bot, including ourselves.
    pub bot_id: Option<String>,
    /// Present for edits, deletions, joins and so on.
    pub subtype: Option<String>,
}

impl MessageEvent {
    /// Whether the message was typed by a person rather than being a bot post
    /// or a notification about some other change.
    pub fn is_from_user(&self) -> bool {
        self.bot_id.is_none() && self.subtype.is_none() && self.user.is_some()
    }
}
