/// Shortcuts offered under a safety-triage reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    SendSos,
    ShareLocation,
    OpenResources,
}

impl QuickAction {
    pub const ALL: [QuickAction; 3] = [
        QuickAction::SendSos,
        QuickAction::ShareLocation,
        QuickAction::OpenResources,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::SendSos => "Send SOS",
            QuickAction::ShareLocation => "Share Location",
            QuickAction::OpenResources => "Open Resources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRule {
    SafetyTriage,
    Legal,
    Journal,
    General,
}

const SAFETY_KEYWORDS: [&str; 4] = ["assault", "danger", "help", "safety"];

pub const SAFETY_TRIAGE_REPLY: &str = "I'm here with you. If you're in immediate danger, press ‘Send SOS’. I can also share your location and list nearby resources. Would you like me to do that now?";
pub const LEGAL_REPLY: &str = "I can help you find legal aid resources. Tap “Open Resources”.";
pub const JOURNAL_REPLY: &str =
    "You can record what happened in the Journal section. I can open it for you if you want.";
pub const GENERAL_REPLY: &str = "I’m here to help. Tell me what you’re experiencing, and I’ll guide you to SOS, location sharing, or resources.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalReply {
    pub rule: LocalRule,
    pub text: &'static str,
    pub quick_actions: Vec<QuickAction>,
}

/// First matching rule wins, in this order: safety keywords, "legal",
/// "journal", then the general reply.
pub fn classify(message: &str) -> LocalRule {
    let text = message.to_lowercase();
    if SAFETY_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        LocalRule::SafetyTriage
    } else if text.contains("legal") {
        LocalRule::Legal
    } else if text.contains("journal") {
        LocalRule::Journal
    } else {
        LocalRule::General
    }
}

pub fn local_reply(message: &str) -> LocalReply {
    let rule = classify(message);
    let (text, quick_actions) = match rule {
        LocalRule::SafetyTriage => (SAFETY_TRIAGE_REPLY, QuickAction::ALL.to_vec()),
        LocalRule::Legal => (LEGAL_REPLY, Vec::new()),
        LocalRule::Journal => (JOURNAL_REPLY, Vec::new()),
        LocalRule::General => (GENERAL_REPLY, Vec::new()),
    };
    LocalReply {
        rule,
        text,
        quick_actions,
    }
}
