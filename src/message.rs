// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_context")]
    pub context: Option<ChatContext>,
}

/// UI hints describing what the caller is looking at. Values are opaque
/// identifiers and are never checked against the knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatContext {
    pub active_tab: Option<String>,
    pub selected_vertical: Option<String>,
    pub selected_layer: Option<String>,
    pub selected_player: Option<String>,
}

impl ChatContext {
    /// Keeps the string hints of a context object; anything else is dropped.
    pub fn from_value(value: &Value) -> Self {
        let hint = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            active_tab: hint("activeTab"),
            selected_vertical: hint("selectedVertical"),
            selected_layer: hint("selectedLayer"),
            selected_player: hint("selectedPlayer"),
        }
    }
}

// A context of any shape is accepted; only `null` counts as absent.
fn lenient_context<'de, D>(deserializer: D) -> Result<Option<ChatContext>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .filter(|v| !v.is_null())
        .map(|v| ChatContext::from_value(&v)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ChatRequest {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn string_hints_are_read() {
        let req = parse(r#"{"message":"hi","context":{"activeTab":"players","selectedPlayer":"nvidia"}}"#);
        let ctx = req.context.unwrap();
        assert_eq!(ctx.active_tab.as_deref(), Some("players"));
        assert_eq!(ctx.selected_player.as_deref(), Some("nvidia"));
        assert!(ctx.selected_layer.is_none());
    }

    #[test]
    fn unusable_context_values_are_dropped() {
        let req = parse(r#"{"message":"hi","context":{"activeTab":7,"selectedLayer":["a"],"selectedVertical":"automotive"}}"#);
        assert_eq!(
            req.context,
            Some(ChatContext {
                selected_vertical: Some("automotive".into()),
                ..Default::default()
            })
        );

        let req = parse(r#"{"message":"hi","context":"matrix"}"#);
        assert_eq!(req.context, Some(ChatContext::default()));
    }

    #[test]
    fn null_or_missing_context_is_absent() {
        assert!(parse(r#"{"message":"hi","context":null}"#).context.is_none());
        assert!(parse(r#"{"message":"hi"}"#).context.is_none());
    }
}
