//! Figma requests are authenticated with a personal access token, sent in
//! its own header rather than as a bearer token.
//!
//! <https://www.figma.com/developers/api#authentication>

/// Header carrying a personal access token.
pub const TOKEN_HEADER: &str = "x-figma-token";

/// A newtype wrapper around Figma personal access tokens.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct FigmaAccessToken(pub String);

/// Convert a Figma access token to a [TOKEN_HEADER] value.
pub fn to_auth_header_val(t: &FigmaAccessToken) -> &str {
    &t.0
}
