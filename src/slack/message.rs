//! Send messages to a Slack channel and edit them in place afterwards.

use super::{api::*, block::*, SlackError};
use serde::{Deserialize, Serialize};

/// Slack channels are referred to by their underlying ID rather than their
/// name, which can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// Identifies a posted message so that it can be edited later. Slack uses the
/// message timestamp as its ID within a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: ChannelId,
    pub ts: String,
}

/// Message content as it's sent to Slack.
///
/// `text` doubles as the notification fallback when `blocks` are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub blocks: Vec<Block>,
}

impl Message {
    pub fn plain<T: ToString>(text: T) -> Self {
        Self {
            text: text.to_string(),
            blocks: Vec::new(),
        }
    }
}

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct PostRequest<'a> {
    channel: &'a ChannelId,
    text: &'a String,
    blocks: &'a Vec<Block>,
}

/// <https://api.slack.com/methods/chat.postMessage#examples>
#[derive(Deserialize)]
struct PostResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "only_true")]
    ok: bool,
    channel: ChannelId,
    ts: String,
}

/// <https://api.slack.com/methods/chat.update#args>
#[derive(Serialize)]
struct UpdateRequest<'a> {
    channel: &'a ChannelId,
    ts: &'a String,
    text: &'a String,
    // An empty list clears any blocks from the previous revision.
    blocks: &'a Vec<Block>,
}

/// <https://api.slack.com/methods/chat.update#examples>
#[derive(Deserialize)]
struct UpdateResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "only_true")]
    ok: bool,
}

impl SlackClient {
    /// Post a message in a channel, returning a reference through which it
    /// can be edited.
    pub async fn post_message(
        &self,
        channel: &ChannelId,
        msg: &Message,
    ) -> Result<MessageRef, SlackError> {
        let res: APIResult<PostResponse> = self
            .post("/chat.postMessage")
            .json(&PostRequest {
                channel,
                text: &msg.text,
                blocks: &msg.blocks,
            })
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(res) => Ok(MessageRef {
                channel: res.channel,
                ts: res.ts,
            }),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }

    /// Replace the content of a message we've previously posted.
    pub async fn update_message(&self, at: &MessageRef, msg: &Message) -> Result<(), SlackError> {
        let res: APIResult<UpdateResponse> = self
            .post("/chat.update")
            .json(&UpdateRequest {
                channel: &at.channel,
                ts: &at.ts,
                text: &msg.text,
                blocks: &msg.blocks,
            })
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(_) => Ok(()),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}
