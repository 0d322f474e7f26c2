use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CheckInRecord, Classification, Component, SessionId};

/// Storage capability for check-in records, keyed by session.
pub trait CheckInStore: Send + Sync {
    fn get(&self, session_id: &SessionId) -> Result<Option<CheckInRecord>, StoreError>;
    fn put(&self, session_id: SessionId, record: CheckInRecord) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("check-in store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for supervisor notification when a check-out escalates.
pub trait SupervisorNotifier: Send + Sync {
    fn notify(&self, alert: EscalationAlert) -> Result<(), NotifyError>;
}

/// Payload describing an escalated check-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationAlert {
    pub session_id: SessionId,
    pub checkin_session_id: SessionId,
    pub total_score: u8,
    pub classification: Classification,
    pub delta_total: i8,
    pub critical_components: Vec<Component>,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
