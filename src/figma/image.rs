//! Render nodes to images.
//!
//! <https://www.figma.com/developers/api#get-images-endpoint>

use super::{api::*, FigmaError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// <https://www.figma.com/developers/api#get-images-endpoint>
#[derive(Serialize)]
struct ImageRequest<'a> {
    ids: &'a str,
    format: &'static str,
    scale: u8,
}

#[derive(Deserialize)]
struct ImageResponse {
    /// Keyed by node ID. Values are null where rendering failed.
    images: HashMap<String, Option<Url>>,
}

impl FigmaClient {
    /// Render a single node as a 2x PNG and return the URL it can be fetched
    /// from. Figma hosts these for a limited time only.
    pub async fn render_image(&self, file_key: &str, node_id: &str) -> Result<Url, FigmaError> {
        let res: ImageResponse = fetch(self.get(format!("/images/{}", file_key)).query(
            &ImageRequest {
                ids: node_id,
                format: "png",
                scale: 2,
            },
        ))
        .await?;

        res.images
            .get(node_id)
            .cloned()
            .flatten()
            .ok_or_else(|| FigmaError::ImageMissing(node_id.to_owned()))
    }
}
