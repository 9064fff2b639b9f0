use std::time::Duration;

use tokio::time::sleep;

use super::responder::{LocalReply, local_reply};
use super::transcript::{ChatTranscript, Sender};
use crate::api::ApiClient;
use crate::config::{Config, MAX_CHAT_ATTEMPTS};
use crate::error::ClientError;

pub const GREETING: &str = "Hi, I'm your EveShield assistant. How can I help today?";
pub const TYPING_PLACEHOLDER: &str = "Typing...";

#[derive(Debug, Clone, Copy)]
pub struct ChatRetryPolicy {
    /// Total remote attempts, first try included.
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for ChatRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            retry_delay: Duration::from_millis(600),
        }
    }
}

impl From<&Config> for ChatRetryPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.chat_max_attempts.clamp(1, MAX_CHAT_ATTEMPTS),
            retry_delay: config.chat_retry_delay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Remote(String),
    Local(LocalReply),
}

impl ChatReply {
    pub fn text(&self) -> &str {
        match self {
            ChatReply::Remote(text) => text,
            ChatReply::Local(reply) => reply.text,
        }
    }
}

/// Asks the remote assistant, retrying with a fixed delay, and falls back
/// to the local responder once every attempt has failed.
pub async fn request_reply(api: &ApiClient, message: &str, policy: &ChatRetryPolicy) -> ChatReply {
    match send_with_retry(api, message, policy).await {
        Ok(reply) => ChatReply::Remote(reply),
        Err(e) => {
            tracing::info!(error = %e, "Assistant unreachable, answering locally");
            ChatReply::Local(local_reply(message))
        }
    }
}

async fn send_with_retry(
    api: &ApiClient,
    message: &str,
    policy: &ChatRetryPolicy,
) -> Result<String, ClientError> {
    let mut attempt = 1_u32;
    loop {
        match api.chatbot_reply(message).await {
            Ok(reply) => return Ok(reply),
            Err(e) if attempt < policy.max_attempts => {
                tracing::debug!(attempt, error = %e, "Chatbot attempt failed, retrying");
                sleep(policy.retry_delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Floating chat widget state: the transcript plus the retry policy used
/// for every message sent through it.
#[derive(Debug, Default)]
pub struct ChatWidget {
    transcript: ChatTranscript,
    policy: ChatRetryPolicy,
}

impl ChatWidget {
    pub fn new(policy: ChatRetryPolicy) -> Self {
        Self {
            transcript: ChatTranscript::new(),
            policy,
        }
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Greets on first open.
    pub fn open(&self) {
        if self.transcript.is_empty() {
            self.transcript.append(Sender::Assistant, GREETING);
        }
    }

    /// Sends a user message. Blank input is ignored and yields `None`.
    pub async fn send(&self, api: &ApiClient, message: &str) -> Option<ChatReply> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript.append(Sender::User, message);
        let pending = self.transcript.append(Sender::Assistant, TYPING_PLACEHOLDER);

        let reply = request_reply(api, message, &self.policy).await;
        self.transcript.replace_text(pending, reply.text());
        if let ChatReply::Local(local) = &reply
            && !local.quick_actions.is_empty()
        {
            self.transcript.append_quick_actions(local.quick_actions.clone());
        }

        Some(reply)
    }
}
