use serde::ser::SerializeStruct;
use serde::{ser, Serialize};
use url::Url;

/// Slack's block API is its most modern, and allows us to mix rich formatting
/// with foreign plaintext. This is our limited subset thereof.
///
/// <https://api.slack.com/reference/block-kit/blocks>
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Image { url: Url, alt: String },
    Context(Vec<TextBlock>),
    Select(StaticSelect),
}

/// A text object, either within a section or as a context element.
#[derive(Debug, Clone, PartialEq)]
pub enum TextBlock {
    Plaintext(String),
    /// "mrkdwn" is Slack's alternative to Markdown.
    ///
    /// <https://api.slack.com/reference/surfaces/formatting#basics>
    Mrkdwn(String),
}

/// A single-choice menu rendered inside an `actions` block.
///
/// <https://api.slack.com/reference/block-kit/block-elements#static_select>
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSelect {
    pub action_id: &'static str,
    pub placeholder: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Serialize)]
struct RawText<'a> {
    #[serde(rename = "type")]
    typ: &'static str,
    text: &'a String,
}

impl ser::Serialize for TextBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let raw = match self {
            TextBlock::Plaintext(text) => RawText {
                typ: "plain_text",
                text,
            },
            TextBlock::Mrkdwn(text) => RawText { typ: "mrkdwn", text },
        };

        raw.serialize(serializer)
    }
}

#[derive(Serialize)]
struct RawOption<'a> {
    text: TextBlock,
    value: &'a String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<TextBlock>,
}

#[derive(Serialize)]
struct RawSelect<'a> {
    #[serde(rename = "type")]
    typ: &'static str,
    action_id: &'static str,
    placeholder: TextBlock,
    options: Vec<RawOption<'a>>,
}

impl ser::Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut state = serializer.serialize_struct("Block", 3)?;

        match self {
            Block::Text(x) => {
                state.serialize_field("type", "section")?;
                state.serialize_field("text", x)?;
            }

            Block::Image { url, alt } => {
                state.serialize_field("type", "image")?;
                state.serialize_field("image_url", url)?;
                state.serialize_field("alt_text", alt)?;
            }

            Block::Context(xs) => {
                state.serialize_field("type", "context")?;
                state.serialize_field("elements", xs)?;
            }

            Block::Select(select) => {
                state.serialize_field("type", "actions")?;

                let options = select
                    .options
                    .iter()
                    .map(|o| RawOption {
                        text: TextBlock::Plaintext(o.label.to_owned()),
                        value: &o.value,
                        description: o.description.to_owned().map(TextBlock::Plaintext),
                    })
                    .collect();

                let inner = RawSelect {
                    typ: "static_select",
                    action_id: select.action_id,
                    placeholder: TextBlock::Plaintext(select.placeholder.to_owned()),
                    options,
                };
                state.serialize_field("elements", &[inner])?;
            }
        };

        state.end()
    }
}
