//! Request and response bodies of the chat endpoints

use serde::{Deserialize, Serialize};

/// `POST /chat` body. A missing message is treated as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// `POST /chat` reply; failures are rendered into `response` as well
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub response: String,
}

impl ChatMessageResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// `GET /` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_mode_is_optional() {
        let request: ChatMessageRequest =
            serde_json::from_str(r#"{"message":"hello"}"#).unwrap();

        assert_eq!(request.message, "hello");
        assert_eq!(request.mode, None);
    }

    #[test]
    fn test_request_without_message() {
        let request: ChatMessageRequest = serde_json::from_str(r#"{"mode":"libre"}"#).unwrap();

        assert_eq!(request.message, "");
        assert_eq!(request.mode.as_deref(), Some("libre"));
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_string(&ChatMessageResponse::new("hi there")).unwrap();
        assert_eq!(json, r#"{"response":"hi there"}"#);
    }
}
