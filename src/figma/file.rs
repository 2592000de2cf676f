//! Fetch a design file's document tree.
//!
//! <https://www.figma.com/developers/api#get-files-endpoint>

use super::{api::*, FigmaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A design file as returned by `GET /files/{key}`, trimmed to what we use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFile {
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub document: Node,
}

/// Node type of a page.
pub const CANVAS: &str = "CANVAS";

/// Any node within a document tree. The document's children are canvases
/// (pages), and a canvas's children are its top-level frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl DesignFile {
    /// The first page of the file, where card news is kept.
    pub fn first_canvas(&self) -> Option<&Node> {
        self.document
            .children
            .iter()
            .find(|node| node.kind == CANVAS)
    }
}

/// Query params for `GET /files/{key}`.
#[derive(Serialize)]
struct FileRequest {
    /// We only look at the direct children of each canvas, so there's no
    /// need to pull down the rest of the tree.
    depth: u8,
}

impl FigmaClient {
    /// Fetch the document tree and metadata of a file.
    pub async fn get_file(&self, file_key: &str) -> Result<DesignFile, FigmaError> {
        fetch(
            self.get(format!("/files/{}", file_key))
                .query(&FileRequest { depth: 2 }),
        )
        .await
    }
}
