use crate::figma::FigmaError;
use std::fmt;

/// Why a search for the latest card news couldn't produce an answer.
#[derive(Debug)]
pub enum ScanError {
    Figma(FigmaError),
    /// Scanning a team found no file whose document could be fetched,
    /// including the case of a team with no files at all.
    NothingScannable,
}

impl From<FigmaError> for ScanError {
    fn from(e: FigmaError) -> Self {
        ScanError::Figma(e)
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Figma(e) => write!(f, "{}", e),
            ScanError::NothingScannable => write!(f, "No team file could be fetched"),
        }
    }
}
