use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::workflows::shift::domain::{
    BiometricReading, CheckInRecord, FacialFatigue, RiskLevel, ScoreSnapshot, SessionId,
    SubScores,
};
use crate::workflows::shift::intake::{BiometricPayload, CheckInRequest, CheckOutRequest};
use crate::workflows::shift::repository::{
    CheckInStore, EscalationAlert, NotifyError, StoreError, SupervisorNotifier,
};
use crate::workflows::shift::scoring::snapshot;
use crate::workflows::shift::{shift_router, InMemoryCheckInStore, ShiftAssessmentService};

pub(super) const CHECKIN_AT: &str = "2025-01-15T07:00:00Z";
pub(super) const CHECKOUT_AT: &str = "2025-01-15T19:00:00Z";

pub(super) fn instant(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid instant")
        .with_timezone(&Utc)
}

pub(super) fn reading(sbp: f64, dbp: f64, bpm: f64, temp: f64, face: &str) -> BiometricReading {
    BiometricReading {
        sbp,
        dbp,
        bpm,
        temp,
        face_label: face.to_string(),
        face: FacialFatigue::from_label(face),
    }
}

pub(super) fn neutral_payload() -> BiometricPayload {
    BiometricPayload {
        sbp: Some(120.0),
        dbp: Some(80.0),
        bpm: Some(72.0),
        temp: Some(36.8),
        face_label: Some("Neutral".to_string()),
    }
}

/// Vitals from the end-of-shift scenario: bp 2, hr 1, temp 2, face 3.
pub(super) fn strained_payload() -> BiometricPayload {
    BiometricPayload {
        sbp: Some(165.0),
        dbp: Some(105.0),
        bpm: Some(110.0),
        temp: Some(38.1),
        face_label: Some("Severe Fatigue".to_string()),
    }
}

pub(super) fn check_in_request(session: &str) -> CheckInRequest {
    CheckInRequest {
        session_id: Some(session.to_string()),
        timestamp: Some(CHECKIN_AT.to_string()),
        biometrics: Some(neutral_payload()),
    }
}

/// Questionnaire answers scoring fas 0, psqi 0, pa 0.
pub(super) fn rested_check_out_request(session: &str, checkin: Option<&str>) -> CheckOutRequest {
    CheckOutRequest {
        session_id: Some(session.to_string()),
        checkin_session_id: checkin.map(str::to_string),
        biometrics: Some(neutral_payload()),
        fas_answers: Some(vec![1, 1, 1]),
        psqi_answers: Some(vec![1, 1, 1, 1]),
        pa_answer: Some(0),
        timestamp: Some(CHECKOUT_AT.to_string()),
    }
}

/// End-of-shift scenario totalling 16 ("Severe Fatigue").
pub(super) fn strained_check_out_request(session: &str, checkin: Option<&str>) -> CheckOutRequest {
    CheckOutRequest {
        session_id: Some(session.to_string()),
        checkin_session_id: checkin.map(str::to_string),
        biometrics: Some(strained_payload()),
        fas_answers: Some(vec![5, 5, 4]),
        psqi_answers: Some(vec![4, 4, 4, 3]),
        pa_answer: Some(2),
        timestamp: Some(CHECKOUT_AT.to_string()),
    }
}

/// Build sub-scores in `fas, psqi, pa, bp, hr, temp, face` order.
pub(super) fn scores(levels: [u8; 7]) -> SubScores {
    let level = |value: u8| RiskLevel::new(value).expect("level within 0..=3");
    SubScores {
        fas: level(levels[0]),
        psqi: level(levels[1]),
        pa: level(levels[2]),
        bp: level(levels[3]),
        hr: level(levels[4]),
        temp: level(levels[5]),
        face: level(levels[6]),
    }
}

pub(super) fn snapshot_of(session: &str, at: &str, levels: [u8; 7]) -> ScoreSnapshot {
    snapshot(SessionId(session.to_string()), instant(at), scores(levels))
}

pub(super) type TestService = ShiftAssessmentService<InMemoryCheckInStore, MemoryNotifier>;

pub(super) fn build_service() -> (TestService, Arc<InMemoryCheckInStore>, Arc<MemoryNotifier>) {
    let store = Arc::new(InMemoryCheckInStore::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ShiftAssessmentService::new(store.clone(), notifier.clone());
    (service, store, notifier)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    shift_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    alerts: Arc<Mutex<Vec<EscalationAlert>>>,
}

impl MemoryNotifier {
    pub(super) fn alerts(&self) -> Vec<EscalationAlert> {
        self.alerts.lock().expect("notifier mutex poisoned").clone()
    }
}

impl SupervisorNotifier for MemoryNotifier {
    fn notify(&self, alert: EscalationAlert) -> Result<(), NotifyError> {
        self.alerts
            .lock()
            .expect("notifier mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl SupervisorNotifier for OfflineNotifier {
    fn notify(&self, _alert: EscalationAlert) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("pager offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl CheckInStore for UnavailableStore {
    fn get(&self, _session_id: &SessionId) -> Result<Option<CheckInRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn put(&self, _session_id: SessionId, _record: CheckInRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
