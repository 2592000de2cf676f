//! Payloads delivered to the interactivity request URL when a user acts on
//! one of our interactive blocks.
//!
//! Slack sends these as `application/x-www-form-urlencoded` with a single
//! `payload` field holding JSON.
//!
//! <https://api.slack.com/reference/interaction-payloads/block-actions>

use super::message::ChannelId;
use serde::Deserialize;

/// The form wrapper around every interaction payload.
#[derive(Deserialize)]
pub struct InteractionForm {
    pub payload: String,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Interaction {
    #[serde(rename = "block_actions")]
    BlockActions(BlockActions),
    #[serde(other)]
    Other,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct BlockActions {
    /// Absent for interactions outside of a conversation, such as in the app
    /// home tab.
    pub channel: Option<ChannelMeta>,
    pub actions: Vec<Action>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct ChannelMeta {
    pub id: ChannelId,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Action {
    pub action_id: String,
    pub selected_option: Option<SelectedOption>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct SelectedOption {
    pub text: OptionText,
    pub value: String,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct OptionText {
    pub text: String,
}

impl BlockActions {
    /// The option chosen in the select menu with the given action ID, if the
    /// interaction concerns it.
    pub fn selection(&self, action_id: &str) -> Option<&SelectedOption> {
        self.actions
            .iter()
            .find(|a| a.action_id == action_id)
            .and_then(|a| a.selected_option.as_ref())
    }
}
