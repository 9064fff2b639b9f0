use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::CredentialPair;

pub const SOS_SOURCE: &str = "web";
pub const FALLBACK_SOS_MESSAGE: &str = "SOS from web UI";

#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub phone_number: String,
    pub password: String,
}

/// Register and login both answer with the freshly issued token pair.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub tokens: CredentialPair,
}

#[derive(Debug, Serialize)]
pub struct LogoutRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PermissionGrant {
    pub location: bool,
    pub microphone: bool,
    pub notifications: bool,
}

impl PermissionGrant {
    pub fn all_granted() -> Self {
        Self {
            location: true,
            microphone: true,
            notifications: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SosTrigger {
    pub source: &'static str,
}

/// Payload sent to the voice pipeline when the primary SOS call fails.
#[derive(Debug, Serialize)]
pub struct EmergencyReport {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct JournalEntry {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChatbotRequest {
    pub message: String,
}

/// Pulls the assistant's text out of a chatbot response: a bare string,
/// else the `reply` field, else the compact JSON of the whole body.
pub fn chatbot_reply_text(body: &Value) -> String {
    if let Some(text) = body.as_str() {
        return text.to_string();
    }
    match body
        .get("reply")
        .and_then(Value::as_str)
        .filter(|reply| !reply.is_empty())
    {
        Some(reply) => reply.to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_text_prefers_reply_field() {
        assert_eq!(chatbot_reply_text(&json!({"reply": "hi"})), "hi");
        assert_eq!(chatbot_reply_text(&json!("plain")), "plain");
        assert_eq!(chatbot_reply_text(&json!({"other": 1})), r#"{"other":1}"#);
        assert_eq!(chatbot_reply_text(&json!({"reply": ""})), r#"{"reply":""}"#);
    }

    #[test]
    fn non_string_reply_falls_back_to_json() {
        assert_eq!(chatbot_reply_text(&json!({"reply": 3})), r#"{"reply":3}"#);
    }
}
