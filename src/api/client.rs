use std::time::Duration;

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Value, json};

use super::endpoints;
use super::models::{
    AuthRequest, AuthResponse, ChatbotRequest, EmergencyContact, EmergencyReport, JournalEntry,
    LogoutRequest, PermissionGrant, SOS_SOURCE, SosTrigger, chatbot_reply_text,
};
use crate::config::Config;
use crate::error::ClientError;
use crate::executor::with_timeout;
use crate::session::{Coordinate, CredentialPair, CredentialStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Authenticated REST API holding the core app state.
    Primary,
    /// Unauthenticated voice pipeline and dashboard service.
    Secondary,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    backend: Backend,
    auth: bool,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            backend: Backend::Primary,
            auth: true,
        }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get(path)
        })
    }

    /// Targets the secondary backend. Requests there never carry a token.
    pub fn secondary(mut self) -> Self {
        self.backend = Backend::Secondary;
        self.auth = false;
        self
    }

    pub fn unauthenticated(mut self) -> Self {
        self.auth = false;
        self
    }
}

/// REST client for both backends. Every call is bounded by the request
/// timeout and carries the stored access token when one is present.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    primary_base: String,
    secondary_base: String,
    default_timeout: Duration,
    credentials: CredentialStore,
}

impl ApiClient {
    pub fn new(config: &Config, credentials: CredentialStore) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            primary_base: config.primary_api_url.trim_end_matches('/').to_string(),
            secondary_base: config.secondary_api_url.trim_end_matches('/').to_string(),
            default_timeout: config.request_timeout(),
            credentials,
        })
    }

    fn base_url(&self, backend: Backend) -> &str {
        match backend {
            Backend::Primary => &self.primary_base,
            Backend::Secondary => &self.secondary_base,
        }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url(request.backend), request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        // Token is read once, before the request suspends.
        if request.auth
            && let Some(access) = self.credentials.access_token()
        {
            builder = builder.bearer_auth(access);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        tracing::debug!(method = %request.method, url = %url, backend = ?request.backend, "Sending request");

        let result = with_timeout(
            async move {
                let response = builder.send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ClientError::http_status(status));
                }
                let text = response.text().await?;
                Ok(parse_body(&text))
            },
            self.default_timeout,
        )
        .await;

        if let Err(e) = &result {
            tracing::warn!(method = %request.method, url = %url, error = %e, "Request failed");
        }
        result
    }

    pub async fn register(&self, request: &AuthRequest) -> Result<CredentialPair, ClientError> {
        let body = self
            .send(ApiRequest::post(endpoints::REGISTER, request)?.unauthenticated())
            .await?;
        issued_tokens(body)
    }

    pub async fn login(&self, request: &AuthRequest) -> Result<CredentialPair, ClientError> {
        let body = self
            .send(ApiRequest::post(endpoints::LOGIN, request)?.unauthenticated())
            .await?;
        issued_tokens(body)
    }

    pub async fn logout(&self, refresh: &str) -> Result<Value, ClientError> {
        let request = LogoutRequest {
            refresh: refresh.to_string(),
        };
        self.send(ApiRequest::post(endpoints::LOGOUT, &request)?).await
    }

    pub async fn add_emergency_contact(
        &self,
        contact: &EmergencyContact,
    ) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(endpoints::EMERGENCY_CONTACT, contact)?)
            .await
    }

    pub async fn fetch_policy(&self) -> Result<Value, ClientError> {
        self.send(ApiRequest::get(endpoints::POLICY)).await
    }

    pub async fn record_permissions(&self, grant: PermissionGrant) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(endpoints::PERMISSIONS, &grant)?)
            .await
    }

    pub async fn trigger_sos(&self) -> Result<Value, ClientError> {
        let trigger = SosTrigger { source: SOS_SOURCE };
        self.send(ApiRequest::post(endpoints::SOS_TRIGGER, &trigger)?)
            .await
    }

    pub async fn process_emergency(&self, report: &EmergencyReport) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(endpoints::PROCESS_EMERGENCY, report)?.secondary())
            .await
    }

    pub async fn send_gps(&self, coordinate: Coordinate) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(endpoints::GPS_TRACKING, &coordinate)?)
            .await
    }

    pub async fn save_journal(&self, text: &str) -> Result<Value, ClientError> {
        let entry = JournalEntry {
            text: text.to_string(),
        };
        self.send(ApiRequest::post(endpoints::JOURNAL, &entry)?).await
    }

    pub async fn gbv_resources(&self) -> Result<Value, ClientError> {
        self.send(ApiRequest::get(endpoints::GBV_RESOURCES)).await
    }

    pub async fn legal_aid(&self) -> Result<Value, ClientError> {
        self.send(ApiRequest::get(endpoints::LEGAL_AID)).await
    }

    /// Raw chatbot response body.
    pub async fn chatbot(&self, message: &str) -> Result<Value, ClientError> {
        let request = ChatbotRequest {
            message: message.to_string(),
        };
        self.send(ApiRequest::post(endpoints::CHATBOT, &request)?)
            .await
    }

    pub async fn chatbot_reply(&self, message: &str) -> Result<String, ClientError> {
        let body = self.chatbot(message).await?;
        Ok(chatbot_reply_text(&body))
    }

    pub async fn dashboard_data(&self) -> Result<Value, ClientError> {
        self.send(ApiRequest::get(endpoints::DASHBOARD_DATA).secondary())
            .await
    }
}

/// Empty bodies become `{}`. Bodies that are not JSON are passed through as
/// `{"raw": <text>}`; the voice pipeline answers SOS reports with TwiML.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Response body is not JSON, passing it through raw");
            json!({ "raw": text })
        }
    }
}

fn issued_tokens(body: Value) -> Result<CredentialPair, ClientError> {
    serde_json::from_value::<AuthResponse>(body)
        .map(|response| response.tokens)
        .map_err(|e| ClientError::Parse(format!("missing tokens in auth response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_parses_to_empty_object() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body("  \n"), json!({}));
    }

    #[test]
    fn malformed_body_is_passed_through_raw() {
        assert_eq!(
            parse_body("<Response/>"),
            json!({ "raw": "<Response/>" })
        );
    }

    #[test]
    fn auth_response_without_tokens_is_a_parse_error() {
        let err = issued_tokens(json!({ "detail": "ok" })).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn secondary_requests_never_authenticate() {
        let request = ApiRequest::get(endpoints::DASHBOARD_DATA).secondary();
        assert_eq!(request.backend, Backend::Secondary);
        assert!(!request.auth);
    }
}
