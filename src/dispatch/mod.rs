mod chat;
mod responder;
mod sos;
mod transcript;

pub use chat::{ChatReply, ChatRetryPolicy, ChatWidget, GREETING, TYPING_PLACEHOLDER, request_reply};
pub use responder::{
    GENERAL_REPLY, JOURNAL_REPLY, LEGAL_REPLY, LocalReply, LocalRule, QuickAction,
    SAFETY_TRIAGE_REPLY, classify, local_reply,
};
pub use sos::{FAILOVER_STATUS, SENDING_STATUS, SosDispatch, SosOutcome, SosState};
pub use transcript::{ChatMessage, ChatTranscript, Sender, TranscriptEntry};
