use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::comparison::{ComparisonEngine, ComparisonResult};
use super::domain::{
    BiometricReading, CheckInRecord, Classification, FacialFatigue, QuestionnaireScores,
    RiskLevel, ScoreSnapshot, SessionId, SubScores,
};
use super::intake::{CheckInRequest, CheckOutRequest, IntakeError, QuestionnaireRequest};
use super::recommendations::recommend;
use super::repository::{CheckInStore, EscalationAlert, StoreError, SupervisorNotifier};
use super::scoring::{classify, score_questionnaire, snapshot, ScoringEngine};

/// Where the check-in baseline for a comparison came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineSource {
    Stored,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutReport {
    pub session_id: SessionId,
    pub scores: SubScores,
    pub total_score: u8,
    pub classification: Classification,
    pub delta_from_checkin: i8,
    pub baseline: BaselineSource,
    pub comparison: ComparisonResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireReport {
    pub session_id: SessionId,
    pub scores: QuestionnaireScores,
    pub total_score: u8,
    pub classification: Classification,
    pub recommendations: Vec<String>,
}

/// Baseline substituted when no check-in is on record for a session.
pub fn default_checkin(session_id: SessionId, timestamp: DateTime<Utc>) -> CheckInRecord {
    let scores = SubScores {
        fas: RiskLevel::MONITOR,
        psqi: RiskLevel::HIGH,
        pa: RiskLevel::NONE,
        bp: RiskLevel::MONITOR,
        hr: RiskLevel::MONITOR,
        temp: RiskLevel::NONE,
        face: RiskLevel::MONITOR,
    };
    CheckInRecord {
        snapshot: snapshot(session_id, timestamp, scores),
        biometrics: BiometricReading {
            sbp: 120.0,
            dbp: 80.0,
            bpm: 72.0,
            temp: 36.8,
            face_label: "Neutral".to_string(),
            face: FacialFatigue::Neutral,
        },
    }
}

/// Service composing intake validation, scoring, the check-in store, and notification.
pub struct ShiftAssessmentService<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
    scoring: ScoringEngine,
    comparison: ComparisonEngine,
}

impl<S, N> ShiftAssessmentService<S, N>
where
    S: CheckInStore + 'static,
    N: SupervisorNotifier + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            store,
            notifier,
            scoring: ScoringEngine::new(),
            comparison: ComparisonEngine::new(),
        }
    }

    /// Score a check-in and record it as the baseline for its session.
    pub fn check_in(&self, request: CheckInRequest) -> Result<CheckInRecord, ShiftServiceError> {
        let submission = request.validate()?;
        let snapshot = self.scoring.check_in(
            submission.session_id.clone(),
            submission.timestamp,
            &submission.reading,
        );

        let record = CheckInRecord {
            snapshot,
            biometrics: submission.reading,
        };
        self.store.put(submission.session_id, record.clone())?;

        info!(
            session_id = %record.snapshot.session_id,
            total_score = record.snapshot.total_score,
            classification = %record.snapshot.classification,
            face_label = %record.biometrics.face_label,
            "check-in scored"
        );

        Ok(record)
    }

    /// Score a check-out and compare it with the session's check-in.
    pub fn check_out(
        &self,
        request: CheckOutRequest,
    ) -> Result<CheckOutReport, ShiftServiceError> {
        let submission = request.validate(Utc::now())?;
        let baseline_key = submission
            .checkin_session_id
            .clone()
            .unwrap_or_else(|| submission.session_id.clone());
        let (record, baseline) = self.baseline(&baseline_key, submission.timestamp)?;
        let checkin = record.snapshot;

        let checkout = self.scoring.check_out(
            submission.session_id,
            submission.timestamp,
            &submission.reading,
            &submission.answers,
        );
        let comparison = self.comparison.compare(&checkin, &checkout);

        info!(
            session_id = %checkout.session_id,
            checkin_session_id = %checkin.session_id,
            total_score = checkout.total_score,
            classification = %checkout.classification,
            delta = comparison.delta_total,
            escalation = comparison.risk_escalation,
            "check-out scored"
        );

        if comparison.risk_escalation {
            self.escalate(&checkin, &checkout, &comparison);
        }

        Ok(CheckOutReport {
            session_id: checkout.session_id,
            scores: checkout.scores,
            total_score: checkout.total_score,
            classification: checkout.classification,
            delta_from_checkin: comparison.delta_total,
            baseline,
            comparison,
        })
    }

    /// Score a standalone questionnaire; biometric components are not part of the total.
    pub fn questionnaire(
        &self,
        request: QuestionnaireRequest,
    ) -> Result<QuestionnaireReport, ShiftServiceError> {
        let submission = request.validate(Utc::now())?;
        let scores = score_questionnaire(&submission.answers);
        let total_score = scores.total();
        let classification = classify(total_score);
        let recommendations = recommend(
            &SubScores::from_parts(scores, Default::default()),
            total_score,
            None,
        );

        info!(
            session_id = %submission.session_id,
            total_score,
            classification = %classification,
            duration_ms = submission.duration_ms,
            "questionnaire scored"
        );

        Ok(QuestionnaireReport {
            session_id: submission.session_id,
            scores,
            total_score,
            classification,
            recommendations,
        })
    }

    /// Look up the stored check-in for a session, falling back to the default baseline.
    pub fn checkin_record(
        &self,
        session_id: &SessionId,
    ) -> Result<(CheckInRecord, BaselineSource), ShiftServiceError> {
        self.baseline(session_id, Utc::now())
    }

    fn baseline(
        &self,
        session_id: &SessionId,
        timestamp: DateTime<Utc>,
    ) -> Result<(CheckInRecord, BaselineSource), ShiftServiceError> {
        match self.store.get(session_id)? {
            Some(record) => Ok((record, BaselineSource::Stored)),
            None => Ok((
                default_checkin(session_id.clone(), timestamp),
                BaselineSource::Default,
            )),
        }
    }

    fn escalate(
        &self,
        checkin: &ScoreSnapshot,
        checkout: &ScoreSnapshot,
        comparison: &ComparisonResult,
    ) {
        let alert = EscalationAlert {
            session_id: checkout.session_id.clone(),
            checkin_session_id: checkin.session_id.clone(),
            total_score: checkout.total_score,
            classification: checkout.classification,
            delta_total: comparison.delta_total,
            critical_components: checkout.scores.critical(),
            raised_at: checkout.timestamp,
        };

        warn!(session_id = %alert.session_id, "risk escalation detected, notifying supervisor");
        if let Err(err) = self.notifier.notify(alert) {
            warn!(
                session_id = %checkout.session_id,
                error = %err,
                "supervisor notification failed"
            );
        }
    }
}

/// Error raised by the shift assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ShiftServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
