//! Prompt instructions bound to expected result schemas.
//!
//! An [`Instruction`] pairs a prompt template with the schema type the
//! model is asked to answer in. Rendering substitutes a serialized example
//! into the `{schema}` placeholder; parsing validates the raw reply into
//! the schema type and degrades to a [`FailureReport`] on any mismatch.
//! One instruction instance is shared across every frame of a run.

pub mod decoder;

use crate::error::TemplateError;
use crate::types::{FailureReport, Outcome};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Name of the placeholder the schema example is substituted into.
pub const SCHEMA_PLACEHOLDER: &str = "schema";

/// A reusable prompt template with an optional expected result schema.
#[derive(Debug, Clone)]
pub struct Instruction<T> {
    template: String,
    schema_example: Option<serde_json::Value>,
    _result: PhantomData<fn() -> T>,
}

impl<T> Instruction<T> {
    /// An instruction with no expected schema: the template is sent
    /// verbatim and replies are accepted without validation.
    pub fn plain(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            schema_example: None,
            _result: PhantomData,
        }
    }

    /// Render the prompt text with no extra bindings.
    pub fn render(&self) -> Result<String, TemplateError> {
        self.render_with(&[])
    }

    /// Render the prompt text, substituting `{schema}` and any extra
    /// named bindings.
    ///
    /// Fails if the template references a placeholder that is neither
    /// `schema` nor supplied in `extra`.
    pub fn render_with(&self, extra: &[(&str, &str)]) -> Result<String, TemplateError> {
        let Some(example) = &self.schema_example else {
            return Ok(self.template.clone());
        };

        let schema = example.to_string();
        let mut bindings: HashMap<&str, &str> = HashMap::with_capacity(extra.len() + 1);
        bindings.insert(SCHEMA_PLACEHOLDER, &schema);
        for (name, value) in extra {
            bindings.insert(name, value);
        }
        substitute(&self.template, &bindings)
    }
}

impl<T: Serialize> Instruction<T> {
    /// An instruction whose replies must validate as `T`.
    ///
    /// `example` is serialized and substituted into the `{schema}`
    /// placeholder when rendering, showing the model the exact shape
    /// expected back.
    pub fn with_example(template: impl Into<String>, example: &T) -> Self {
        let value = serde_json::to_value(example)
            .unwrap_or_else(|e| serde_json::Value::String(format!("unserializable example: {e}")));
        Self {
            template: template.into(),
            schema_example: Some(value),
            _result: PhantomData,
        }
    }
}

impl<T: DeserializeOwned + Default> Instruction<T> {
    /// Parse and validate a raw model reply.
    ///
    /// This is the pipeline's sole error-containment boundary for model
    /// output: decode or validation problems become an
    /// [`Outcome::Failed`] carrying the diagnostic, never an error.
    pub fn parse(&self, reply: &str) -> Outcome<T> {
        if self.schema_example.is_none() {
            return Outcome::Parsed(T::default());
        }
        let decoded = decoder::decode(reply);
        match serde_json::from_value::<T>(decoded) {
            Ok(value) => Outcome::Parsed(value),
            Err(e) => {
                tracing::debug!("Reply failed schema validation: {e}");
                Outcome::Failed(FailureReport::new(e.to_string()))
            }
        }
    }
}

/// Substitute `{name}` placeholders from `bindings`.
///
/// `{{` and `}}` escape to literal braces. An unbound placeholder is an
/// error, not a silent no-op.
fn substitute(template: &str, bindings: &HashMap<&str, &str>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    name.push(c);
                }
                match bindings.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => return Err(TemplateError::MissingBinding(name)),
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct SceneCount {
        people_count: u32,
        scene_description: String,
    }

    fn example() -> SceneCount {
        SceneCount {
            people_count: 7,
            scene_description: "A group in a conference room.".to_string(),
        }
    }

    #[test]
    fn test_plain_renders_verbatim() {
        let instruction: Instruction<()> = Instruction::plain("Describe the frame. {anything}");
        // No schema set: placeholders are left untouched
        assert_eq!(
            instruction.render().unwrap(),
            "Describe the frame. {anything}"
        );
    }

    #[test]
    fn test_render_substitutes_schema_example() {
        let instruction = Instruction::with_example("Answer as JSON: {schema}", &example());
        let rendered = instruction.render().unwrap();
        assert!(rendered.contains("\"people_count\":7"));
        assert!(!rendered.contains("{schema}"));
    }

    #[test]
    fn test_render_with_extra_bindings() {
        let instruction =
            Instruction::with_example("Focus on {subject}. Answer as {schema}", &example());
        let rendered = instruction.render_with(&[("subject", "faces")]).unwrap();
        assert!(rendered.contains("Focus on faces."));
    }

    #[test]
    fn test_render_missing_binding_is_error() {
        let instruction = Instruction::with_example("{schema} and {missing}", &example());
        match instruction.render() {
            Err(TemplateError::MissingBinding(name)) => assert_eq!(name, "missing"),
            other => panic!("Expected MissingBinding, got {other:?}"),
        }
    }

    #[test]
    fn test_render_escaped_braces() {
        let instruction =
            Instruction::with_example("Use {{curly}} braces. Schema: {schema}", &example());
        let rendered = instruction.render().unwrap();
        assert!(rendered.contains("Use {curly} braces."));
    }

    #[test]
    fn test_parse_valid_reply() {
        let instruction = Instruction::with_example("{schema}", &example());
        let reply = "```json\n{\"people_count\": 2, \"scene_description\": \"Two people\"}\n```";
        match instruction.parse(reply) {
            Outcome::Parsed(result) => assert_eq!(result.people_count, 2),
            Outcome::Failed(report) => panic!("Expected success: {}", report.message),
        }
    }

    #[test]
    fn test_parse_missing_field_contained() {
        let instruction = Instruction::with_example("{schema}", &example());
        // Valid JSON, but scene_description is absent
        let outcome = instruction.parse("{\"people_count\": 2}");
        match outcome {
            Outcome::Failed(report) => {
                assert!(report.message.contains("scene_description"), "{}", report.message);
            }
            Outcome::Parsed(_) => panic!("Expected containment failure"),
        }
    }

    #[test]
    fn test_parse_non_json_contained() {
        let instruction = Instruction::with_example("{schema}", &example());
        assert!(instruction.parse("I cannot answer that.").is_failed());
    }

    #[test]
    fn test_parse_without_schema_returns_default() {
        let instruction: Instruction<SceneCount> = Instruction::plain("Describe the frame.");
        match instruction.parse("anything at all") {
            Outcome::Parsed(result) => assert_eq!(result, SceneCount::default()),
            Outcome::Failed(_) => panic!("Schema-less parse must not fail"),
        }
    }
}
