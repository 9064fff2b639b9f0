use std::fmt;

use uuid::Uuid;

use crate::api::{ApiClient, EmergencyReport, FALLBACK_SOS_MESSAGE};
use crate::ui::{StatusSink, StatusTarget};

pub const SENDING_STATUS: &str = "Sending SOS...";
pub const FAILOVER_STATUS: &str =
    "SOS failed on primary backend, attempting fallback pipeline...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SosState {
    Idle,
    PrimaryAttempt,
    SecondaryAttempt,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SosOutcome {
    Sent,
    RecordedViaFallback,
    Failed(String),
}

impl fmt::Display for SosOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SosOutcome::Sent => write!(f, "SOS sent."),
            SosOutcome::RecordedViaFallback => write!(f, "SOS recorded via fallback pipeline."),
            SosOutcome::Failed(reason) => write!(f, "SOS failed: {reason}"),
        }
    }
}

/// One SOS flow: a single primary attempt and at most one failover hop to
/// the secondary backend. No retries inside either attempt.
pub struct SosDispatch<'a> {
    api: &'a ApiClient,
    flow_id: Uuid,
    state: SosState,
}

impl<'a> SosDispatch<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            flow_id: Uuid::new_v4(),
            state: SosState::Idle,
        }
    }

    fn transition(&mut self, next: SosState) {
        tracing::debug!(flow_id = %self.flow_id, from = ?self.state, to = ?next, "SOS state change");
        self.state = next;
    }

    pub async fn run(mut self, sink: &dyn StatusSink) -> SosOutcome {
        sink.set_status(StatusTarget::Sos, SENDING_STATUS);
        self.transition(SosState::PrimaryAttempt);

        let outcome = match self.api.trigger_sos().await {
            Ok(_) => {
                self.transition(SosState::Done);
                SosOutcome::Sent
            }
            Err(primary_err) => {
                tracing::warn!(flow_id = %self.flow_id, error = %primary_err, "Primary SOS failed, failing over");
                sink.set_status(StatusTarget::Sos, FAILOVER_STATUS);
                self.transition(SosState::SecondaryAttempt);

                let report = EmergencyReport {
                    message: FALLBACK_SOS_MESSAGE.to_string(),
                };
                match self.api.process_emergency(&report).await {
                    Ok(_) => {
                        self.transition(SosState::Done);
                        SosOutcome::RecordedViaFallback
                    }
                    Err(secondary_err) => {
                        tracing::error!(flow_id = %self.flow_id, error = %secondary_err, "SOS fallback failed");
                        self.transition(SosState::Failed);
                        SosOutcome::Failed(secondary_err.to_string())
                    }
                }
            }
        };

        tracing::info!(flow_id = %self.flow_id, outcome = %outcome, "SOS flow finished");
        sink.set_status(StatusTarget::Sos, &outcome.to_string());
        outcome
    }
}
