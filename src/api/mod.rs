mod client;
pub mod endpoints;
mod models;

pub use client::{ApiClient, ApiRequest, Backend};
pub use models::{
    AuthRequest, EmergencyContact, EmergencyReport, FALLBACK_SOS_MESSAGE, PermissionGrant,
    SOS_SOURCE, chatbot_reply_text,
};
