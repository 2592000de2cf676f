//! Card news frames and the tags that mark them.

use crate::figma::file::{DesignFile, Node};
use regex::Regex;

/// The tag that marks a frame as card news in a single configured file.
pub const CARD_NEWS_TAG: &str = "[카드뉴스]";

/// Matches any bracketed tag at the start of a name, such as `[이벤트]`.
const ANY_TAG_PATTERN: &str = r"^\[[^\]]+\]";

/// Which frame names count as tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    /// Names starting with [CARD_NEWS_TAG].
    CardNews,
    /// Names starting with any bracketed tag.
    AnyTag,
}

impl TagFilter {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            TagFilter::CardNews => name.starts_with(CARD_NEWS_TAG),
            TagFilter::AnyTag => Regex::new(ANY_TAG_PATTERN)
                .map(|re| re.is_match(name))
                .unwrap_or(false),
        }
    }
}

/// A tagged top-level frame within a design file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: String,
    /// The name as it appears in Figma, tag included.
    pub name: String,
    pub file_key: String,
}

impl Frame {
    fn from_node(node: &Node, file_key: &str) -> Self {
        Self {
            id: node.id.to_owned(),
            name: node.name.to_owned(),
            file_key: file_key.to_owned(),
        }
    }

    /// The name without its leading tag, falling back to the full name if
    /// nothing else remains.
    pub fn label(&self) -> &str {
        match strip_tag(&self.name) {
            "" => &self.name,
            x => x,
        }
    }
}

/// Remove a leading bracketed tag, and any whitespace around what remains.
///
/// ```
/// assert_eq!(strip_tag("[카드뉴스] 봄 신상품"), "봄 신상품");
/// ```
pub fn strip_tag(name: &str) -> &str {
    Regex::new(ANY_TAG_PATTERN)
        .ok()
        .and_then(|re| re.find(name))
        .map(|m| &name[m.end()..])
        .unwrap_or(name)
        .trim()
}

/// Every tagged frame on the first canvas of a file, in document order.
///
/// Figma appends new top-level frames to the end of a canvas's children, so
/// the last of these is taken to be the newest. Nothing in the API promises
/// that ordering.
pub fn tagged_frames(file: &DesignFile, file_key: &str, filter: TagFilter) -> Vec<Frame> {
    file.first_canvas()
        .map(|canvas| {
            canvas
                .children
                .iter()
                .filter(|node| filter.matches(&node.name))
                .map(|node| Frame::from_node(node, file_key))
                .collect()
        })
        .unwrap_or_default()
}
