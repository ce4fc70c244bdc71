//! Content-addressed cache for raw chat-completion responses.
//!
//! Keys are a blake3 digest over the destination endpoint and the
//! canonical JSON serialization of the request payload, so an identical
//! call always maps to the same file across process restarts. The cache
//! is pure memoization: no TTL, no eviction, last writer wins on the
//! (idempotent) rare race where two misses store the same key.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Durable response store under `<app-data>/llm_cache`.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// A cache rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Deterministic content key for a (destination, payload) pair.
    pub fn key<P: Serialize>(endpoint: &str, payload: &P) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(endpoint.as_bytes());
        // serde_json preserves struct field order, so serialization is canonical
        if let Ok(bytes) = serde_json::to_vec(payload) {
            hasher.update(&bytes);
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Fetch a previously stored response, if any.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let bytes = tokio::fs::read(self.entry_path(key)).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    /// Store a response under its key, overwriting any previous value.
    ///
    /// Cache writes are best-effort: an I/O failure is logged and
    /// swallowed, never failing the call that produced the response.
    pub async fn put(&self, key: &str, value: &Value) {
        if let Err(e) = self.try_put(key, value).await {
            tracing::warn!("Failed to write cache entry {key}: {e}");
        }
    }

    async fn try_put(&self, key: &str, value: &Value) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec(value)?;
        tokio::fs::write(self.entry_path(key), bytes).await
    }

    /// Remove every stored entry.
    pub async fn clear(&self) -> std::io::Result<()> {
        if self.dir.exists() {
            tokio::fs::remove_dir_all(&self.dir).await?;
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_is_deterministic() {
        let payload = json!({"model": "gpt-4o", "temperature": 0.0});
        let a = ResponseCache::key("https://api.example/v1", &payload);
        let b = ResponseCache::key("https://api.example/v1", &payload);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_differs_by_payload() {
        let a = ResponseCache::key("https://api.example/v1", &json!({"temperature": 0.0}));
        let b = ResponseCache::key("https://api.example/v1", &json!({"temperature": 0.5}));
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_differs_by_endpoint() {
        let payload = json!({"model": "gpt-4o"});
        let a = ResponseCache::key("https://a.example", &payload);
        let b = ResponseCache::key("https://b.example", &payload);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_is_hex() {
        let key = ResponseCache::key("e", &json!({}));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("llm_cache"));
        let value = json!({"choices": [{"message": {"content": "hi"}}]});
        let key = ResponseCache::key("https://api.example", &json!({"q": 1}));

        assert!(cache.get(&key).await.is_none());
        cache.put(&key, &value).await;
        assert_eq!(cache.get(&key).await, Some(value));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());
        cache.put("k", &json!({"v": 1})).await;
        cache.put("k", &json!({"v": 2})).await;
        assert_eq!(cache.get("k").await, Some(json!({"v": 2})));
    }

    #[tokio::test]
    async fn test_clear_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("llm_cache"));
        cache.put("k", &json!({"v": 1})).await;
        cache.clear().await.unwrap();
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_treated_as_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());
        tokio::fs::write(dir.path().join("bad"), b"not json")
            .await
            .unwrap();
        assert!(cache.get("bad").await.is_none());
    }
}
