use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::responder::QuickAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    QuickActions(Vec<QuickAction>),
}

impl TranscriptEntry {
    pub fn as_message(&self) -> Option<&ChatMessage> {
        match self {
            TranscriptEntry::Message(message) => Some(message),
            TranscriptEntry::QuickActions(_) => None,
        }
    }
}

/// In-memory chat history. Entries are only ever appended; the one
/// exception is a pending assistant placeholder, which is rewritten in
/// place once its reply is known.
#[derive(Debug, Default)]
pub struct ChatTranscript {
    entries: Mutex<Vec<TranscriptEntry>>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its position.
    pub fn append(&self, sender: Sender, text: impl Into<String>) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(TranscriptEntry::Message(ChatMessage {
            text: text.into(),
            sender,
            sent_at: Utc::now(),
        }));
        entries.len() - 1
    }

    pub fn append_quick_actions(&self, actions: Vec<QuickAction>) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TranscriptEntry::QuickActions(actions));
    }

    /// Rewrites the text of the message at `index`. Returns false when there
    /// is no message there.
    pub fn replace_text(&self, index: usize, text: impl Into<String>) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get_mut(index) {
            Some(TranscriptEntry::Message(message)) => {
                message.text = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
