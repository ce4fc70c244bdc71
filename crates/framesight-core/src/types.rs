//! Core data types shared across the Framesight pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single still image sampled from a video.
///
/// Produced by an external frame sampler and consumed read-only by the
/// analysis pipeline. `image` is either a local path or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds into the source video (>= 0)
    pub offset: f64,

    /// Where the sampled still is stored
    pub image: PathBuf,
}

impl Frame {
    pub fn new(offset: f64, image: impl Into<PathBuf>) -> Self {
        Self {
            offset,
            image: image.into(),
        }
    }
}

/// Metadata record for one sampling run, persisted as `metadata.json`
/// alongside the extracted frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Source file name
    pub name: String,

    /// Path to the source video
    pub path: PathBuf,

    /// Sampled frames in temporal order
    pub frames: Vec<Frame>,
}

/// Marker for success/failure in canonical failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
}

/// The canonical failure value produced when a model reply does not
/// conform to the expected schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub status: Status,
    pub message: String,
}

impl FailureReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            message: message.into(),
        }
    }
}

/// The structured result for one frame: either a validated instance of
/// the expected schema or a failure marker carrying the diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Parsed(T),
    Failed(FailureReport),
}

impl<T> Outcome<T> {
    /// Returns the parsed value, if validation succeeded.
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Outcome::Parsed(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}
