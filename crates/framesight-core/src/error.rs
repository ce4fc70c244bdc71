//! Error types for the Framesight analysis pipeline.
//!
//! Errors are organized by concern: configuration problems fail fast,
//! transport problems are retried and only surface as typed errors,
//! and per-frame validation problems never become errors at all — they
//! are absorbed into `Outcome::Failed` values at the instruction boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Framesight operations.
#[derive(Error, Debug)]
pub enum FramesightError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Frame analysis pipeline errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Video download errors
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Transport-level errors from chat-completion calls.
///
/// Everything here is a failure to obtain a raw reply at all. A reply
/// that arrives but does not match the expected schema is not an
/// `LlmError` — that is contained by `Instruction::parse`.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The HTTP request failed or returned a non-2xx status
    #[error("LLM request failed: {message}")]
    Request {
        message: String,
        status_code: Option<u16>,
    },

    /// The response body could not be decoded as a chat completion
    #[error("Failed to decode LLM response: {message}")]
    Decode { message: String },

    /// The configured retry cap was reached without a successful reply
    #[error("Gave up after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
}

/// Errors from encoding frame images into inline payloads.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// A supported local image could not be read
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A remote image could not be fetched
    #[error("Failed to fetch image {url}: {message}")]
    Fetch { url: String, message: String },
}

/// Template rendering errors.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template references a placeholder with no binding
    #[error("Template references unbound placeholder '{{{0}}}'")]
    MissingBinding(String),
}

/// Pipeline-level errors for a whole analysis run.
///
/// Any of these aborts the batch — partial results are never returned.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The instruction template could not be rendered
    #[error("Instruction error: {0}")]
    Template(#[from] TemplateError),

    /// A frame image could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// A chat-completion call failed past the retry policy
    #[error("Transport error: {0}")]
    Transport(#[from] LlmError),
}

/// Video download errors.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The URL does not match any allowed host pattern
    #[error("Unsupported URL '{0}': only allow-listed hosts may be downloaded")]
    UnsupportedUrl(String),

    /// The external download tool failed
    #[error("Download tool failed: {message}")]
    Tool { message: String },

    /// Filesystem or process spawn failure
    #[error("IO error during download: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Framesight results.
pub type Result<T> = std::result::Result<T, FramesightError>;
