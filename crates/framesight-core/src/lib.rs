//! Framesight Core - video-frame analysis over vision-capable LLMs.
//!
//! Framesight takes frames sampled from a video, sends each one to a
//! chat-completion endpoint for structured analysis, and returns the
//! validated results in the frames' original temporal order.
//!
//! # Architecture
//!
//! ```text
//! Frames → Encode (data URIs) → Concurrent LLM calls (retry + cache)
//!        → Decode/Validate replies → Restore source order → Outcomes
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use framesight_core::{
//!     AnalyzeOptions, ChatClientFactory, Config, FrameAnalyzer, Instruction, Video,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> framesight_core::Result<()> {
//!     let config = Config::load()?;
//!     let client = Arc::new(ChatClientFactory::create(&config)?);
//!     let instruction = Instruction::with_example(PROMPT, &EXAMPLE);
//!
//!     let video = Video::load("frames/metadata.json".as_ref()).await?;
//!     let analyzer = FrameAnalyzer::new(instruction, client, AnalyzeOptions::default());
//!     let results = analyzer.analyze(&video.frames).await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod analyzer;
pub mod config;
pub mod download;
pub mod encode;
pub mod error;
pub mod instruction;
pub mod llm;
pub mod storage;
pub mod types;

// Re-exports for convenient access
pub use analyzer::{AnalyzeOptions, FrameAnalyzer};
pub use config::Config;
pub use download::{DownloadRequest, VideoDownloader};
pub use encode::FrameEncoder;
pub use error::{
    AnalysisError, ConfigError, DownloadError, EncodeError, FramesightError, LlmError, Result,
    TemplateError,
};
pub use instruction::Instruction;
pub use llm::{ChatApi, ChatClientFactory, HttpChatClient, ResponseCache, RetryPolicy};
pub use types::{FailureReport, Frame, Outcome, Status, Video};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
