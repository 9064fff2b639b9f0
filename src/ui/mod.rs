//! Interface layer seam. Dispatch flows report through [`StatusSink`]
//! instead of touching any widget directly.

use std::sync::Mutex;

/// Named output slots the interface exposes for status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTarget {
    Auth,
    Policy,
    Sos,
    Location,
    Journal,
    Resources,
    InlineChat,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Resources,
}

pub trait StatusSink: Send + Sync {
    fn set_status(&self, target: StatusTarget, text: &str);

    /// Modal notice, for flows that have no status slot of their own.
    fn notify(&self, text: &str);

    fn focus(&self, _section: Section) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Status(StatusTarget, String),
    Notice(String),
    Focus(Section),
}

/// Sink that keeps every event in order. Used by headless drivers and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn statuses(&self, target: StatusTarget) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Status(t, text) if t == target => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self, target: StatusTarget) -> Option<String> {
        self.statuses(target).pop()
    }

    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Notice(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: UiEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl StatusSink for RecordingSink {
    fn set_status(&self, target: StatusTarget, text: &str) {
        self.push(UiEvent::Status(target, text.to_string()));
    }

    fn notify(&self, text: &str) {
        self.push(UiEvent::Notice(text.to_string()));
    }

    fn focus(&self, section: Section) {
        self.push(UiEvent::Focus(section));
    }
}
