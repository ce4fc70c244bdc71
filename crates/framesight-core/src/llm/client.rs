//! Chat-completion transport: authenticated requests, retry, caching.
//!
//! [`ChatApi`] is the seam the pipeline depends on; [`HttpChatClient`] is
//! the one REST implementation. Vendors differ only in how they
//! authenticate, so vendor selection is an [`Auth`] variant plus a
//! constructor, not a parallel client implementation.

use super::cache::ResponseCache;
use super::chat::{ChatCompletion, ChatRequest};
use super::retry::RetryPolicy;
use crate::error::LlmError;
use async_trait::async_trait;
use serde_json::Value;

/// Default OpenAI chat-completions endpoint.
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Transport abstraction for chat-completion calls.
///
/// Uses `async_trait` because the pipeline holds `Arc<dyn ChatApi>` for
/// dynamic dispatch (and tests substitute mocks through the same seam).
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Vendor name for logging (e.g., "openai", "azure").
    fn name(&self) -> &str;

    /// Send one request envelope and return the typed response with the
    /// envelope's `index` attached.
    async fn completion(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError>;
}

/// Vendor authentication scheme — the only point where vendors diverge.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Bearer token plus optional organization header (OpenAI)
    Bearer {
        api_key: String,
        organization: Option<String>,
    },
    /// Vendor-specific `api-key` header (Azure OpenAI)
    ApiKey { api_key: String },
}

impl Auth {
    /// The request headers this scheme contributes.
    fn headers(&self) -> Vec<(&'static str, String)> {
        match self {
            Auth::Bearer {
                api_key,
                organization,
            } => {
                let mut headers = vec![("Authorization", format!("Bearer {api_key}"))];
                if let Some(org) = organization {
                    headers.push(("OpenAI-Organization", org.clone()));
                }
                headers
            }
            Auth::ApiKey { api_key } => vec![("api-key", api_key.clone())],
        }
    }
}

/// REST client for OpenAI-compatible chat endpoints with retry/backoff
/// and an optional content-addressed response cache.
#[derive(Debug)]
pub struct HttpChatClient {
    name: String,
    endpoint: String,
    auth: Auth,
    http: reqwest::Client,
    cache: Option<ResponseCache>,
    retry: RetryPolicy,
}

impl HttpChatClient {
    /// Client for the OpenAI API (bearer token + organization header).
    pub fn openai(api_key: &str, organization: Option<&str>) -> Self {
        Self {
            name: "openai".to_string(),
            endpoint: OPENAI_ENDPOINT.to_string(),
            auth: Auth::Bearer {
                api_key: api_key.to_string(),
                organization: organization.map(String::from),
            },
            http: reqwest::Client::new(),
            cache: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Client for an Azure OpenAI deployment (caller-supplied endpoint,
    /// `api-key` header).
    pub fn azure(endpoint: &str, api_key: &str) -> Self {
        Self {
            name: "azure".to_string(),
            endpoint: endpoint.to_string(),
            auth: Auth::ApiKey {
                api_key: api_key.to_string(),
            },
            http: reqwest::Client::new(),
            cache: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the endpoint (OpenAI-compatible proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Enable response caching backed by the given store.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the default retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST attempt. Non-2xx statuses are errors so that they enter
    /// the same retry path as connection failures.
    async fn post_once(&self, request: &ChatRequest) -> Result<Value, LlmError> {
        let mut builder = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        for (name, value) in self.auth.headers() {
            builder = builder.header(name, value);
        }

        let response = builder
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                message: format!("{} request failed: {e}", self.name),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Request {
                message: format!("{} HTTP {status}: {text}", self.name),
                status_code: Some(status.as_u16()),
            });
        }

        response.json().await.map_err(|e| LlmError::Decode {
            message: e.to_string(),
        })
    }

    async fn post_with_retry(&self, request: &ChatRequest) -> Result<Value, LlmError> {
        let mut attempts: u32 = 0;
        loop {
            match self.post_once(request).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempts += 1;
                    if !self.retry.allows(attempts) {
                        return Err(LlmError::RetriesExhausted {
                            attempts,
                            message: e.to_string(),
                        });
                    }
                    let delay = self.retry.delay_for(attempts - 1);
                    tracing::warn!(
                        "{} call {} failed (attempt {attempts}): {e}, retrying in {delay:?}",
                        self.name,
                        request.index
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl ChatApi for HttpChatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn completion(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        let key = ResponseCache::key(&self.endpoint, request);

        let raw = match &self.cache {
            Some(cache) => match cache.get(&key).await {
                Some(value) => {
                    tracing::debug!("Cache hit for call {} ({key})", request.index);
                    value
                }
                None => {
                    let value = self.post_with_retry(request).await?;
                    cache.put(&key, &value).await;
                    value
                }
            },
            None => self.post_with_retry(request).await?,
        };

        let mut completion: ChatCompletion =
            serde_json::from_value(raw).map_err(|e| LlmError::Decode {
                message: e.to_string(),
            })?;
        completion.index = request.index;
        Ok(completion)
    }
}
