//! Everything the bot says, as Slack messages. Nothing here talks to the
//! network.

use super::command::SELECT_ACTION_ID;
use crate::{
    cardnews::{
        frame::{Frame, CARD_NEWS_TAG},
        selector::{Latest, Scope},
    },
    figma::link::node_url,
    slack::{block::*, message::Message},
};
use chrono::{DateTime, Utc};
use url::Url;

/// Slack accepts at most 100 options per select menu, but we show no more
/// than this many.
pub const MAX_OPTIONS: usize = 25;

/// Slack's limit on the text of a select option, in characters.
const MAX_OPTION_TEXT: usize = 75;

pub fn latest_placeholder() -> Message {
    Message::plain("📈 최신 카드뉴스를 찾고 있어요...")
}

pub fn list_placeholder() -> Message {
    Message::plain("📚 모든 카드뉴스 목록을 가져오는 중...")
}

pub fn selection_placeholder() -> Message {
    Message::plain("🔎 선택한 카드뉴스를 불러오는 중...")
}

pub fn none_found(scope: &Scope) -> Message {
    match scope {
        Scope::SingleFile { .. } => Message::plain(format!(
            "😢 '{}'로 시작하는 프레임을 찾을 수 없어요.",
            CARD_NEWS_TAG
        )),
        Scope::Team { .. } => {
            Message::plain("😢 '[태그]'로 시작하는 프레임을 가장 최근 파일에서 찾을 수 없어요.")
        }
    }
}

pub fn nothing_scannable() -> Message {
    Message::plain("😢 검색할 수 있는 Figma 파일이 없어요.")
}

pub fn lookup_failed() -> Message {
    Message::plain("❌ 오류가 발생했어요! Figma 파일 키나 토큰을 확인해주세요.")
}

pub fn image_failed() -> Message {
    Message::plain("❌ 이미지를 가져오는 중 오류가 발생했어요.")
}

/// `!모두` only makes sense for a single file.
pub fn list_unsupported() -> Message {
    Message::plain(
        "ℹ️ 팀 전체를 검색하는 중에는 `!모두`를 지원하지 않아요. `!최신`으로 가장 최근 카드뉴스를 확인해주세요.",
    )
}

/// A frame shown in full.
struct Card {
    title: String,
    link: Url,
    image: Url,
    alt: String,
    footer: Option<String>,
}

/// The newest card news. The source file is only worth naming when it wasn't
/// configured up front.
pub fn latest_card(latest: &Latest, image: Url, scope: &Scope, at: DateTime<Utc>) -> Message {
    let frame = &latest.frame;

    let footer = match scope {
        Scope::SingleFile { .. } => None,
        Scope::Team { .. } => Some(format!("📁 {}", escape(&latest.file_name))),
    };

    build_card(
        Card {
            title: format!("✨ 최신 카드뉴스: {}", frame.name),
            link: node_url(&frame.file_key, &frame.id),
            image,
            alt: frame.label().to_owned(),
            footer,
        },
        at,
    )
}

/// A card news frame picked from the menu, titled with the option's label.
pub fn selected_card(
    file_key: &str,
    frame_id: &str,
    label: &str,
    image: Url,
    at: DateTime<Utc>,
) -> Message {
    build_card(
        Card {
            title: format!("🖼️ 선택한 카드뉴스: {}", label),
            link: node_url(file_key, frame_id),
            image,
            alt: label.to_owned(),
            footer: None,
        },
        at,
    )
}

fn build_card(card: Card, at: DateTime<Utc>) -> Message {
    let mut context = Vec::with_capacity(2);
    if let Some(footer) = card.footer {
        context.push(TextBlock::Mrkdwn(footer));
    }
    context.push(TextBlock::Mrkdwn(fmt_timestamp(at)));

    let blocks = vec![
        Block::Text(TextBlock::Mrkdwn(format!(
            "*<{}|{}>*",
            card.link,
            escape(&card.title)
        ))),
        Block::Image {
            url: card.image,
            alt: card.alt,
        },
        Block::Context(context),
    ];

    Message {
        text: card.title,
        blocks,
    }
}

/// A select menu of frames, keeping their order and dropping any beyond
/// [MAX_OPTIONS].
pub fn menu(frames: &[Frame]) -> Message {
    let text = String::from("📜 아래 메뉴에서 카드뉴스를 선택해주세요.");

    let options = frames
        .iter()
        .take(MAX_OPTIONS)
        .map(|f| SelectOption {
            label: clamp(f.label(), MAX_OPTION_TEXT),
            value: f.id.to_owned(),
            description: Some(clamp(&format!("ID: {}", f.id), MAX_OPTION_TEXT)),
        })
        .collect();

    Message {
        blocks: vec![
            Block::Text(TextBlock::Plaintext(text.to_owned())),
            Block::Select(StaticSelect {
                action_id: SELECT_ACTION_ID,
                placeholder: String::from("보고 싶은 카드뉴스를 선택하세요!"),
                options,
            }),
        ],
        text,
    }
}

/// Escape the characters mrkdwn treats as control sequences.
///
/// <https://api.slack.com/reference/surfaces/formatting#escaping>
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Shorten text to at most `max` characters, marking the cut with an ellipsis.
fn clamp(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let mut x: String = s.chars().take(max - 1).collect();
        x.push('…');
        x
    }
}

/// Slack renders this in each reader's own timezone, falling back to UTC.
fn fmt_timestamp(at: DateTime<Utc>) -> String {
    format!(
        "<!date^{}^{{date_short_pretty}} {{time}}|{}>",
        at.timestamp(),
        at.format("%Y-%m-%d %H:%M UTC")
    )
}
