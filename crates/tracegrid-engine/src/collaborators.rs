//! Interfaces to the policy layers cells are routed through, with the default
//! implementations the CLI uses.

use serde_json::Value;

use crate::cell::Cell;
use crate::format::text::{single_line, truncate};

/// Masks sensitive text before display
pub trait Redactor: Send + Sync {
    fn redact(&self, text: &str) -> String;
}

/// Displays text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRedactor;

impl Redactor for PassthroughRedactor {
    fn redact(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Replaces every non-whitespace character with `*`
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskRedactor;

impl Redactor for MaskRedactor {
    fn redact(&self, text: &str) -> String {
        text.chars()
            .map(|c| if c.is_whitespace() { c } else { '*' })
            .collect()
    }
}

/// Renders arbitrary structured payloads (prompts, completions, tool calls)
pub trait PayloadViewer: Send + Sync {
    fn view(&self, payload: Option<&Value>, error: Option<&Value>, compact: bool) -> Cell;
}

/// One-line JSON preview that understands chat message lists
#[derive(Debug, Clone, Copy)]
pub struct CompactJsonViewer {
    pub max_chars: usize,
}

impl Default for CompactJsonViewer {
    fn default() -> Self {
        Self { max_chars: 80 }
    }
}

impl CompactJsonViewer {
    fn preview(&self, value: &Value, compact: bool) -> String {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Array(items) if items.iter().all(is_message) && !items.is_empty() => {
                // Compact view shows the most recent message only
                let shown: Vec<&Value> = if compact {
                    items.last().into_iter().collect()
                } else {
                    items.iter().collect()
                };
                shown
                    .into_iter()
                    .map(message_line)
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
            Value::Object(_) if is_message(value) => message_line(value),
            other => other.to_string(),
        };

        let text = single_line(&text);
        if compact {
            truncate(&text, self.max_chars)
        } else {
            text
        }
    }
}

impl PayloadViewer for CompactJsonViewer {
    fn view(&self, payload: Option<&Value>, error: Option<&Value>, compact: bool) -> Cell {
        if let Some(error) = error.filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.preview(error, compact));
            return Cell::Payload {
                text: message,
                is_error: true,
            };
        }

        match payload {
            None | Some(Value::Null) => Cell::Empty,
            Some(value) => {
                let text = self.preview(value, compact);
                if text.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Payload {
                        text,
                        is_error: false,
                    }
                }
            }
        }
    }
}

fn is_message(value: &Value) -> bool {
    value.get("role").is_some_and(Value::is_string)
        && value.get("content").is_some()
}

fn message_line(message: &Value) -> String {
    let role = message
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let content = match message.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    format!("{role}: {content}")
}

/// Resolves navigation targets
pub trait Navigator: Send + Sync {
    fn template_route(&self, template_version_id: &str) -> String;
}

/// `{base}/prompts/{id}` routes
#[derive(Debug, Clone, Default)]
pub struct PromptRoutes {
    pub base: String,
}

impl PromptRoutes {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Navigator for PromptRoutes {
    fn template_route(&self, template_version_id: &str) -> String {
        format!("{}/prompts/{}", self.base, template_version_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mask_keeps_whitespace() {
        assert_eq!(MaskRedactor.redact("top secret"), "*** ******");
        assert_eq!(PassthroughRedactor.redact("top secret"), "top secret");
    }

    #[test]
    fn test_viewer_prefers_error() {
        let viewer = CompactJsonViewer::default();
        let cell = viewer.view(
            Some(&json!("partial output")),
            Some(&json!({ "message": "rate limited", "stack": "..." })),
            true,
        );
        assert_eq!(
            cell,
            Cell::Payload {
                text: "rate limited".to_string(),
                is_error: true,
            }
        );
    }

    #[test]
    fn test_viewer_chat_messages() {
        let viewer = CompactJsonViewer::default();
        let messages = json!([
            { "role": "system", "content": "be brief" },
            { "role": "user", "content": "hello\nthere" }
        ]);

        assert_eq!(
            viewer.view(Some(&messages), None, true).plain_text(),
            "user: hello there"
        );
        assert_eq!(
            viewer.view(Some(&messages), None, false).plain_text(),
            "system: be brief | user: hello there"
        );
    }

    #[test]
    fn test_viewer_truncates_and_handles_absent() {
        let viewer = CompactJsonViewer { max_chars: 10 };
        assert_eq!(
            viewer.view(Some(&json!({ "a": 1, "b": 2 })), None, true).plain_text(),
            "{\"a\":1,..."
        );
        assert_eq!(viewer.view(None, None, true), Cell::Empty);
        assert_eq!(viewer.view(Some(&json!(null)), Some(&json!(null)), true), Cell::Empty);
    }

    #[test]
    fn test_prompt_routes() {
        assert_eq!(
            PromptRoutes::new("https://app.example.com/").template_route("tv_1"),
            "https://app.example.com/prompts/tv_1"
        );
        assert_eq!(PromptRoutes::default().template_route("tv_1"), "/prompts/tv_1");
    }
}
