mod aggregate;
mod biometrics;
mod questionnaire;

pub use aggregate::{aggregate, classify};
pub use biometrics::{blood_pressure_risk, heart_rate_risk, score_biometrics, temperature_risk};
pub use questionnaire::{score_fas, score_physical_activity, score_psqi, score_questionnaire};

use chrono::{DateTime, Utc};

use super::domain::{
    BiometricReading, QuestionnaireAnswers, QuestionnaireScores, ScoreSnapshot, SessionId,
    SubScores,
};

/// Stateless scorer turning validated readings into immutable snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Biometrics only; questionnaire components stay at zero at check-in.
    pub fn check_in(
        &self,
        session_id: SessionId,
        timestamp: DateTime<Utc>,
        reading: &BiometricReading,
    ) -> ScoreSnapshot {
        let scores =
            SubScores::from_parts(QuestionnaireScores::default(), score_biometrics(reading));
        snapshot(session_id, timestamp, scores)
    }

    pub fn check_out(
        &self,
        session_id: SessionId,
        timestamp: DateTime<Utc>,
        reading: &BiometricReading,
        answers: &QuestionnaireAnswers,
    ) -> ScoreSnapshot {
        let scores = SubScores::from_parts(score_questionnaire(answers), score_biometrics(reading));
        snapshot(session_id, timestamp, scores)
    }
}

pub fn snapshot(
    session_id: SessionId,
    timestamp: DateTime<Utc>,
    scores: SubScores,
) -> ScoreSnapshot {
    let (total_score, classification) = aggregate(&scores);
    ScoreSnapshot {
        session_id,
        timestamp,
        scores,
        total_score,
        classification,
    }
}
