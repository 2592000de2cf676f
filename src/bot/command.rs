//! Commands are matched against the whole message text, exactly.

/// Post the newest card news.
pub const LATEST: &str = "!최신";

/// Offer a menu of every card news frame.
pub const ALL: &str = "!모두";

/// The action ID of the card news select menu, as echoed back to us when an
/// option is chosen.
pub const SELECT_ACTION_ID: &str = "cardnews_select";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Latest,
    All,
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            LATEST => Some(Command::Latest),
            ALL => Some(Command::All),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("!최신"), Some(Command::Latest));
        assert_eq!(Command::parse("!모두"), Some(Command::All));

        assert_eq!(Command::parse("!최신 "), None);
        assert_eq!(Command::parse(" !모두"), None);
        assert_eq!(Command::parse("최신"), None);
        assert_eq!(Command::parse("!최신 카드뉴스 보여줘"), None);
        assert_eq!(Command::parse(""), None);
    }
}
