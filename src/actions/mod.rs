//! Typed user actions and the dispatcher that turns each one into backend
//! calls and status text.

mod geolocation;

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{ApiClient, AuthRequest, EmergencyContact, PermissionGrant};
use crate::config::Config;
use crate::dispatch::{
    ChatRetryPolicy, ChatTranscript, ChatWidget, QuickAction, SosDispatch, SosOutcome,
};
use crate::error::ClientError;
use crate::session::SessionContext;
use crate::ui::{Section, StatusSink, StatusTarget};

pub use geolocation::{Geolocator, PositionUnavailable};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Init,
    Register { phone_number: String, password: String },
    Login { phone_number: String, password: String },
    Logout,
    AddEmergencyContact { name: String, phone: String },
    FetchPolicy,
    RequestPermissions,
    SosRequested,
    LocationRequested,
    SendLocation,
    JournalSubmitted { text: String },
    FetchGbvResources,
    FetchLegalAid,
    InlineChat { message: String },
    ChatOpened,
    ChatMessageSent { message: String },
    QuickAction(QuickAction),
    RefreshDashboard,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Init => "init",
            Action::Register { .. } => "register",
            Action::Login { .. } => "login",
            Action::Logout => "logout",
            Action::AddEmergencyContact { .. } => "add_emergency_contact",
            Action::FetchPolicy => "fetch_policy",
            Action::RequestPermissions => "request_permissions",
            Action::SosRequested => "sos_requested",
            Action::LocationRequested => "location_requested",
            Action::SendLocation => "send_location",
            Action::JournalSubmitted { .. } => "journal_submitted",
            Action::FetchGbvResources => "fetch_gbv_resources",
            Action::FetchLegalAid => "fetch_legal_aid",
            Action::InlineChat { .. } => "inline_chat",
            Action::ChatOpened => "chat_opened",
            Action::ChatMessageSent { .. } => "chat_message_sent",
            Action::QuickAction(_) => "quick_action",
            Action::RefreshDashboard => "refresh_dashboard",
        }
    }
}

/// The alert dispatcher. Owns the session context and the chat widget and
/// reports every outcome through the interface sink. Handlers catch at their
/// own boundary, so [`Dispatcher::handle`] never fails.
pub struct Dispatcher {
    api: ApiClient,
    session: Arc<SessionContext>,
    chat: ChatWidget,
    sink: Arc<dyn StatusSink>,
    geolocator: Option<Arc<dyn Geolocator>>,
}

impl Dispatcher {
    pub fn new(
        config: &Config,
        session: Arc<SessionContext>,
        sink: Arc<dyn StatusSink>,
    ) -> Result<Self, ClientError> {
        let api = ApiClient::new(config, session.credentials().clone())?;
        Ok(Self {
            api,
            session,
            chat: ChatWidget::new(ChatRetryPolicy::from(config)),
            sink,
            geolocator: None,
        })
    }

    pub fn with_geolocator(mut self, geolocator: Arc<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn transcript(&self) -> &ChatTranscript {
        self.chat.transcript()
    }

    pub async fn handle(&self, action: Action) {
        let flow_id = Uuid::new_v4();
        let span = tracing::info_span!("action", %flow_id, name = action.name());
        self.route(action).instrument(span).await
    }

    async fn route(&self, action: Action) {
        match action {
            Action::Init => self.init(),
            Action::Register {
                phone_number,
                password,
            } => self.register(auth_request(phone_number, password)).await,
            Action::Login {
                phone_number,
                password,
            } => self.login(auth_request(phone_number, password)).await,
            Action::Logout => self.logout().await,
            Action::AddEmergencyContact { name, phone } => {
                let contact = EmergencyContact {
                    name: name.trim().to_string(),
                    phone: phone.trim().to_string(),
                };
                self.add_emergency_contact(contact).await
            }
            Action::FetchPolicy => self.fetch_policy().await,
            Action::RequestPermissions => self.request_permissions().await,
            Action::SosRequested => {
                self.sos().await;
            }
            Action::LocationRequested => self.locate().await,
            Action::SendLocation => self.send_location().await,
            Action::JournalSubmitted { text } => self.save_journal(&text).await,
            Action::FetchGbvResources => {
                self.show_resources("Loading GBV resources...", self.api.gbv_resources())
                    .await
            }
            Action::FetchLegalAid => {
                self.show_resources("Finding legal aid...", self.api.legal_aid())
                    .await
            }
            Action::InlineChat { message } => self.inline_chat(&message).await,
            Action::ChatOpened => self.chat.open(),
            Action::ChatMessageSent { message } => {
                self.chat.send(&self.api, &message).await;
            }
            Action::QuickAction(action) => self.quick_action(action).await,
            Action::RefreshDashboard => self.refresh_dashboard().await,
        }
    }

    fn init(&self) {
        let status = if self.session.credentials().access_token().is_some() {
            "Authenticated"
        } else {
            "Not logged in"
        };
        self.sink.set_status(StatusTarget::Auth, status);
    }

    async fn register(&self, request: AuthRequest) {
        self.sink.set_status(StatusTarget::Auth, "Registering...");
        let result = async {
            let tokens = self.api.register(&request).await?;
            self.session.credentials().save(&tokens)
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!("Registered and stored credentials");
                self.sink.set_status(StatusTarget::Auth, "Registered and logged in.");
            }
            Err(e) => self
                .sink
                .set_status(StatusTarget::Auth, &format!("Register failed: {e}")),
        }
    }

    async fn login(&self, request: AuthRequest) {
        self.sink.set_status(StatusTarget::Auth, "Logging in...");
        let result = async {
            let tokens = self.api.login(&request).await?;
            self.session.credentials().save(&tokens)
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!("Logged in and stored credentials");
                self.sink.set_status(StatusTarget::Auth, "Logged in.");
            }
            Err(e) => self
                .sink
                .set_status(StatusTarget::Auth, &format!("Login failed: {e}")),
        }
    }

    async fn logout(&self) {
        let Some(refresh) = self.session.credentials().refresh_token() else {
            self.sink.set_status(StatusTarget::Auth, "Not logged in.");
            return;
        };

        let result = async {
            self.api.logout(&refresh).await?;
            self.session.credentials().clear()
        }
        .await;

        match result {
            Ok(()) => self.sink.set_status(StatusTarget::Auth, "Logged out."),
            Err(e) => self
                .sink
                .set_status(StatusTarget::Auth, &format!("Logout failed: {e}")),
        }
    }

    async fn add_emergency_contact(&self, contact: EmergencyContact) {
        match self.api.add_emergency_contact(&contact).await {
            Ok(_) => self.sink.notify("Contact added"),
            Err(e) => self.sink.notify(&format!("Failed to add contact: {e}")),
        }
    }

    async fn fetch_policy(&self) {
        self.sink.set_status(StatusTarget::Policy, "Loading policy...");
        match self.api.fetch_policy().await {
            Ok(body) => self.sink.set_status(StatusTarget::Policy, &pretty(&body)),
            Err(e) => self
                .sink
                .set_status(StatusTarget::Policy, &format!("Failed to load policy: {e}")),
        }
    }

    async fn request_permissions(&self) {
        match self.api.record_permissions(PermissionGrant::all_granted()).await {
            Ok(_) => self.sink.notify("Permissions recorded"),
            Err(e) => self
                .sink
                .notify(&format!("Failed to record permissions: {e}")),
        }
    }

    async fn sos(&self) -> SosOutcome {
        SosDispatch::new(&self.api).run(self.sink.as_ref()).await
    }

    async fn locate(&self) {
        let Some(geolocator) = &self.geolocator else {
            self.sink
                .set_status(StatusTarget::Location, "Geolocation not supported.");
            return;
        };

        match geolocator.current_position().await {
            Ok(coordinate) => {
                self.session.set_last_coordinate(coordinate);
                self.sink.set_status(
                    StatusTarget::Location,
                    &format!("Lat: {}, Lng: {}", coordinate.latitude, coordinate.longitude),
                );
            }
            Err(e) => {
                tracing::debug!(error = %e, "No position fix");
                self.sink
                    .set_status(StatusTarget::Location, "Unable to retrieve your location.");
            }
        }
    }

    async fn send_location(&self) {
        let Some(coordinate) = self.session.last_coordinate() else {
            self.sink.notify("Get location first");
            return;
        };

        match self.api.send_gps(coordinate).await {
            Ok(_) => self.sink.notify("Location sent"),
            Err(e) => self.sink.notify(&format!("Failed to send location: {e}")),
        }
    }

    async fn save_journal(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.sink
                .set_status(StatusTarget::Journal, "Please write something.");
            return;
        }

        self.sink.set_status(StatusTarget::Journal, "Saving...");
        match self.api.save_journal(text).await {
            Ok(_) => self.sink.set_status(StatusTarget::Journal, "Saved."),
            Err(e) => self
                .sink
                .set_status(StatusTarget::Journal, &format!("Failed: {e}")),
        }
    }

    async fn show_resources(
        &self,
        loading: &str,
        request: impl Future<Output = Result<Value, ClientError>>,
    ) {
        self.sink.set_status(StatusTarget::Resources, loading);
        match request.await {
            Ok(body) => self.sink.set_status(StatusTarget::Resources, &pretty(&body)),
            Err(e) => self
                .sink
                .set_status(StatusTarget::Resources, &format!("Failed: {e}")),
        }
    }

    /// Single attempt, no local fallback.
    async fn inline_chat(&self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }

        self.sink.set_status(StatusTarget::InlineChat, "Sending...");
        match self.api.chatbot(message).await {
            Ok(body) => self.sink.set_status(StatusTarget::InlineChat, &pretty(&body)),
            Err(_) => self.sink.set_status(
                StatusTarget::InlineChat,
                "Sorry, I could not reach the assistant.",
            ),
        }
    }

    async fn quick_action(&self, action: QuickAction) {
        match action {
            QuickAction::SendSos => {
                self.sos().await;
            }
            QuickAction::ShareLocation => self.locate().await,
            QuickAction::OpenResources => self.sink.focus(Section::Resources),
        }
    }

    async fn refresh_dashboard(&self) {
        self.sink.set_status(StatusTarget::Dashboard, "Loading dashboard...");
        match self.api.dashboard_data().await {
            Ok(body) => self.sink.set_status(StatusTarget::Dashboard, &pretty(&body)),
            Err(e) => self
                .sink
                .set_status(StatusTarget::Dashboard, &format!("Failed: {e}")),
        }
    }
}

fn auth_request(phone_number: String, password: String) -> AuthRequest {
    AuthRequest {
        phone_number: phone_number.trim().to_string(),
        password,
    }
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}
