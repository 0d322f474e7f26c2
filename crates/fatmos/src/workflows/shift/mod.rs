//! Shift fatigue assessment: check-in and check-out scoring, comparison, and guidance.
//!
//! Scoring is pure and synchronous. The only shared state is the check-in store, which the
//! service writes after a check-in has been fully validated and scored.

pub mod comparison;
pub mod domain;
pub mod intake;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use comparison::{ComparisonEngine, ComparisonResult};
pub use domain::{
    BiometricReading, BiometricScores, CheckInRecord, Classification, Component,
    ComponentDeltas, FacialFatigue, QuestionnaireAnswers, QuestionnaireScores, RiskLevel,
    ScoreSnapshot, SessionId, SubScores,
};
pub use intake::{
    BiometricPayload, CheckInRequest, CheckOutRequest, IntakeError, QuestionnaireRequest,
    ValidationError,
};
pub use recommendations::recommend;
pub use repository::{CheckInStore, EscalationAlert, NotifyError, StoreError, SupervisorNotifier};
pub use router::shift_router;
pub use scoring::ScoringEngine;
pub use service::{
    default_checkin, BaselineSource, CheckOutReport, QuestionnaireReport,
    ShiftAssessmentService, ShiftServiceError,
};
pub use store::InMemoryCheckInStore;
