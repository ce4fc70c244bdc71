//! Wire types for OpenAI-compatible chat-completion endpoints.
//!
//! The request body is `{model, messages, temperature}` where a message's
//! content is either plain text or an ordered list of typed parts (text
//! and inline images). The `index` field is the pipeline's ordering key:
//! it never goes over the wire, but rides along with the request and is
//! attached to the typed response so results can be re-ordered after
//! out-of-order completion.

use serde::{Deserialize, Serialize};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// Requested image fidelity for vision parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    Low,
    High,
}

/// An inline image reference (data URI or remote URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    pub detail: Detail,
}

/// One typed part of a vision message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

/// Message content: a bare string or an ordered list of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// A plain text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// A user message mixing an instruction with an inline image.
    pub fn vision(text: impl Into<String>, image_url: impl Into<String>, detail: Detail) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                        detail,
                    },
                },
            ]),
        }
    }
}

/// The per-call request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Origin position of this call within the batch. Not serialized —
    /// carried alongside and echoed onto the response.
    #[serde(skip)]
    pub index: usize,

    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// The assistant message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

/// A typed chat-completion response.
///
/// Vendors return more fields than these; everything the pipeline needs
/// is the first choice's content and the attached origin index.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    /// Origin index copied from the request by the client.
    #[serde(skip, default)]
    pub index: usize,

    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    /// The first choice's message content, or empty when the vendor
    /// returned no choices.
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_without_index() {
        let request = ChatRequest {
            index: 4,
            model: "gpt-4o".to_string(),
            messages: vec![Message::user("hello")],
            temperature: 0.0,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("index").is_none());
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_vision_message_wire_shape() {
        let message = Message::vision("describe", "data:image/png;base64,AAAA", Detail::Low);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][1]["type"], "image_url");
        assert_eq!(value["content"][1]["image_url"]["detail"], "low");
    }

    #[test]
    fn test_completion_content_extraction() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{"message": {"content": "a reply", "role": "assistant"}}],
            "model": "gpt-4o",
            "usage": {"total_tokens": 12}
        }))
        .unwrap();
        assert_eq!(completion.content(), "a reply");
        assert_eq!(completion.index, 0);
    }

    #[test]
    fn test_completion_empty_choices() {
        let completion: ChatCompletion = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(completion.content(), "");
    }
}
