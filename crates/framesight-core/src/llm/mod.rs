//! Chat-completion transport for vision analysis.
//!
//! Wire types shared by OpenAI-compatible vendors, a retrying HTTP client
//! with a pluggable auth scheme, and a durable content-addressed response
//! cache.

pub mod cache;
pub mod chat;
pub mod client;
pub mod factory;
pub mod retry;

pub use cache::ResponseCache;
pub use chat::{ChatCompletion, ChatRequest, ContentPart, Detail, Message, MessageContent, Role};
pub use client::{Auth, ChatApi, HttpChatClient, OPENAI_ENDPOINT};
pub use factory::{resolve_env_var, ChatClientFactory};
pub use retry::RetryPolicy;
