//! Inline encoding of frame images for vision requests.
//!
//! Frames are turned into `data:<media>;base64,<content>` URIs. Media
//! types come from an explicit extension mapping; frames with other
//! extensions are skipped, not failed — callers must tolerate fewer
//! encoded payloads than input frames.

use crate::error::EncodeError;
use crate::types::Frame;
use base64::Engine;
use std::path::Path;

/// Media type for a supported image path, `None` when unsupported.
pub fn media_type(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Encodes frame images into inline base64 data URIs.
///
/// Handles both local files and `http(s)` sources transparently.
#[derive(Debug, Clone, Default)]
pub struct FrameEncoder {
    http: reqwest::Client,
}

impl FrameEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode every frame with a supported image type, preserving the
    /// frames' relative order.
    ///
    /// Unsupported extensions are skipped silently; a supported image
    /// that cannot be read or fetched is an error.
    pub async fn encode_frames(&self, frames: &[Frame]) -> Result<Vec<String>, EncodeError> {
        let mut encoded = Vec::with_capacity(frames.len());
        for frame in frames {
            match media_type(&frame.image) {
                Some(media) => encoded.push(self.encode(&frame.image, media).await?),
                None => {
                    tracing::debug!("Skipping unsupported image type: {:?}", frame.image);
                }
            }
        }
        Ok(encoded)
    }

    /// Encode one image source as a data URI with the given media type.
    pub async fn encode(&self, source: &Path, media: &str) -> Result<String, EncodeError> {
        let bytes = self.read(source).await?;
        let content = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(format!("data:{media};base64,{content}"))
    }

    async fn read(&self, source: &Path) -> Result<Vec<u8>, EncodeError> {
        let text = source.to_string_lossy();
        if text.starts_with("http://") || text.starts_with("https://") {
            let url = text.to_string();
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| EncodeError::Fetch {
                    url: url.clone(),
                    message: e.to_string(),
                })?;
            let bytes = response.bytes().await.map_err(|e| EncodeError::Fetch {
                url,
                message: e.to_string(),
            })?;
            Ok(bytes.to_vec())
        } else {
            tokio::fs::read(source).await.map_err(|e| EncodeError::Read {
                path: source.to_path_buf(),
                source: e,
            })
        }
    }
}
