use std::fmt;

/// Sum type representing every possible unexceptional fail state when talking
/// to Figma.
#[derive(Debug)]
pub enum FigmaError {
    APIRequestFailed(reqwest::Error),
    /// Figma answered with a non-success status.
    RemoteApi { status: u16, body: String },
    /// The render succeeded but no image was produced for the node, which is
    /// what Figma does for invisible or empty nodes.
    ImageMissing(String),
}

impl From<reqwest::Error> for FigmaError {
    fn from(e: reqwest::Error) -> Self {
        FigmaError::APIRequestFailed(e)
    }
}

impl fmt::Display for FigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            FigmaError::APIRequestFailed(e) => format!("Figma API request failed: {:?}", e),
            FigmaError::RemoteApi { status, body } => {
                format!("Figma API returned {}: {}", status, body)
            }
            FigmaError::ImageMissing(id) => format!("Figma rendered no image for node {}", id),
        };

        write!(f, "{}", x)
    }
}
