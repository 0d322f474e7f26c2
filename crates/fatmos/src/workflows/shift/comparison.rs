use serde::{Deserialize, Serialize};

use super::domain::{Classification, ComponentDeltas, RiskLevel, ScoreSnapshot};
use super::recommendations::recommend;

/// Rise in total score that escalates on its own.
pub const ESCALATION_DELTA: i8 = 3;

/// Shift-over-shift comparison between a check-in and a check-out snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub delta_total: i8,
    pub delta_components: ComponentDeltas,
    pub risk_escalation: bool,
    pub recommendations: Vec<String>,
}

/// Stateless comparison of a check-out against its check-in baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine;

impl ComparisonEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compare(&self, checkin: &ScoreSnapshot, checkout: &ScoreSnapshot) -> ComparisonResult {
        let delta_total = checkout.total_score as i8 - checkin.total_score as i8;
        let delta_components = checkout.scores.delta_from(&checkin.scores);

        ComparisonResult {
            delta_total,
            delta_components,
            risk_escalation: escalates(delta_total, checkout),
            recommendations: recommend(&checkout.scores, checkout.total_score, Some(delta_total)),
        }
    }
}

/// Any one trigger escalates; only check-out severity and a rising total count.
pub fn escalates(delta_total: i8, checkout: &ScoreSnapshot) -> bool {
    delta_total >= ESCALATION_DELTA
        || checkout
            .scores
            .iter()
            .any(|(_, level)| level == RiskLevel::CRITICAL)
        || checkout.classification == Classification::SevereFatigue
}
