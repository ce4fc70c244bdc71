//! Concurrent frame-analysis pipeline.
//!
//! Orchestrates one analysis run: encode the frames, build one
//! chat-completion envelope per encoded frame, dispatch everything with
//! bounded concurrency, validate each reply, and restore source order.
//!
//! Ordering is the central correctness property: completion order is
//! unconstrained, so every envelope carries its origin `index` and the
//! collected results are sorted by it before being returned. A transport
//! failure aborts the whole run; a reply that fails validation only marks
//! its own position. Dropping the returned future cancels all in-flight
//! calls and pending backoff sleeps — the fan-out is a stream over plain
//! futures, not detached tasks.

use crate::encode::FrameEncoder;
use crate::error::AnalysisError;
use crate::instruction::Instruction;
use crate::llm::{ChatApi, ChatRequest, Detail, Message};
use crate::types::{Frame, Outcome};
use futures_util::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Per-run settings for the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Model identifier sent in every envelope
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Image fidelity requested from the vision endpoint
    pub detail: Detail,

    /// Maximum concurrent chat-completion calls
    pub parallel: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.0,
            detail: Detail::Low,
            parallel: 8,
        }
    }
}

/// Analyzes sampled video frames with a shared instruction and a
/// chat-completion backend.
pub struct FrameAnalyzer<T> {
    instruction: Instruction<T>,
    client: Arc<dyn ChatApi>,
    encoder: FrameEncoder,
    options: AnalyzeOptions,
}

impl<T: DeserializeOwned + Default> FrameAnalyzer<T> {
    pub fn new(
        instruction: Instruction<T>,
        client: Arc<dyn ChatApi>,
        options: AnalyzeOptions,
    ) -> Self {
        Self {
            instruction,
            client,
            encoder: FrameEncoder::new(),
            options,
        }
    }

    /// Analyze a batch of frames, returning one outcome per encodable
    /// frame in the frames' original order.
    pub async fn analyze(&self, frames: &[Frame]) -> Result<Vec<Outcome<T>>, AnalysisError> {
        self.analyze_with_progress(frames, |_, _| {}).await
    }

    /// Like [`analyze`](Self::analyze), reporting `(completed, total)`
    /// after each call finishes. Progress is informational only.
    pub async fn analyze_with_progress<F>(
        &self,
        frames: &[Frame],
        mut on_progress: F,
    ) -> Result<Vec<Outcome<T>>, AnalysisError>
    where
        F: FnMut(usize, usize),
    {
        tracing::info!("Analyzing {} video frames", frames.len());

        let encoded = self.encoder.encode_frames(frames).await?;
        let prompt = self.instruction.render()?;
        let total = encoded.len();
        if total < frames.len() {
            tracing::warn!(
                "{} of {} frames skipped (unsupported image types)",
                frames.len() - total,
                frames.len()
            );
        }

        let requests: Vec<ChatRequest> = encoded
            .into_iter()
            .enumerate()
            .map(|(index, payload)| ChatRequest {
                index,
                model: self.options.model.clone(),
                messages: vec![Message::vision(&prompt, payload, self.options.detail)],
                temperature: self.options.temperature,
            })
            .collect();

        let mut in_flight = stream::iter(requests.into_iter().map(|request| {
            let client = Arc::clone(&self.client);
            async move { client.completion(&request).await }
        }))
        .buffer_unordered(self.options.parallel.max(1));

        let mut indexed = Vec::with_capacity(total);
        let mut completed = 0usize;
        while let Some(result) = in_flight.next().await {
            // A transport failure aborts the run; dropping the stream
            // here cancels everything still in flight.
            let completion = result?;
            completed += 1;
            on_progress(completed, total);
            indexed.push((
                completion.index,
                self.instruction.parse(completion.content()),
            ));
        }
        drop(in_flight);

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, outcome)| outcome).collect())
    }
}
