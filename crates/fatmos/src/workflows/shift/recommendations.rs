//! Rule table turning scores into ordered, human-readable guidance.
//!
//! The same tiers serve both the baseline variant (questionnaire or check-in, no
//! comparison available) and the check-out variant (a delta from check-in is known).
//! Total tiers carry a separate message set per variant. Tiers are evaluated in order
//! and append independently; within a tier the first matching rule wins.

use super::domain::{Component, RiskLevel, SubScores};

struct TotalTier {
    min_total: u8,
    with_delta: &'static [&'static str],
    baseline: &'static [&'static str],
}

impl TotalTier {
    fn messages(&self, has_delta: bool) -> &'static [&'static str] {
        if has_delta {
            self.with_delta
        } else {
            self.baseline
        }
    }
}

const TOTAL_TIERS: [TotalTier; 3] = [
    TotalTier {
        min_total: 15,
        with_delta: &[
            "Seek medical screening or referral immediately",
            "Consider rotation or leave before the next shift",
        ],
        baseline: &[
            "Seek medical screening or referral immediately",
            "Consider rotation or leave",
            "Consult your supervisor about adjusting the workload",
        ],
    },
    TotalTier {
        min_total: 10,
        with_delta: &[
            "Review shift pattern and workload with your supervisor",
            "Get adequate rest before the next shift",
        ],
        baseline: &[
            "Review shift pattern and workload with your supervisor",
            "Get adequate rest",
            "Monitor your condition more closely",
        ],
    },
    TotalTier {
        min_total: 6,
        with_delta: &[
            "Make sure to get adequate rest",
            "Monitor your condition more closely",
        ],
        baseline: &[
            "Take active rest every 2 hours",
            "Make sure to stay well hydrated",
            "Monitor your condition again at check-out",
        ],
    },
];

const BASELINE_MAINTAIN: [&str; 2] = [
    "Maintain good work and rest patterns",
    "Keep monitoring your health condition",
];

enum DeltaBound {
    AtLeast(i8),
    AtMost(i8),
}

struct DeltaTier {
    bound: DeltaBound,
    messages: [&'static str; 2],
}

const DELTA_TIERS: [DeltaTier; 3] = [
    DeltaTier {
        bound: DeltaBound::AtLeast(6),
        messages: [
            "Fatigue increased significantly during the shift",
            "Consider adjusting the schedule or workload",
        ],
    },
    DeltaTier {
        bound: DeltaBound::AtLeast(3),
        messages: [
            "Fatigue increased during the shift",
            "Adequate rest is recommended",
        ],
    },
    DeltaTier {
        bound: DeltaBound::AtMost(-2),
        messages: [
            "Condition improved during the shift",
            "Keep up the current work pattern",
        ],
    },
];

struct ComponentCaution {
    component: Component,
    threshold: RiskLevel,
    message: &'static str,
}

const BIOMETRIC_CAUTIONS: [ComponentCaution; 4] = [
    ComponentCaution {
        component: Component::Bp,
        threshold: RiskLevel::HIGH,
        message: "Blood pressure needs attention - consult a clinician if it persists",
    },
    ComponentCaution {
        component: Component::Hr,
        threshold: RiskLevel::HIGH,
        message: "Abnormal heart rate - rest and keep well hydrated",
    },
    ComponentCaution {
        component: Component::Temp,
        threshold: RiskLevel::HIGH,
        message: "Abnormal body temperature - monitor your health and rest",
    },
    ComponentCaution {
        component: Component::Face,
        threshold: RiskLevel::HIGH,
        message: "Facial signs of fatigue - take a break immediately",
    },
];

// Only consulted when no comparison is available.
const QUESTIONNAIRE_CAUTIONS: [ComponentCaution; 3] = [
    ComponentCaution {
        component: Component::Fas,
        threshold: RiskLevel::HIGH,
        message: "Watch for signs of physical and mental fatigue",
    },
    ComponentCaution {
        component: Component::Psqi,
        threshold: RiskLevel::HIGH,
        message: "Improve sleep quality with good sleep hygiene",
    },
    ComponentCaution {
        component: Component::Pa,
        threshold: RiskLevel::CRITICAL,
        message: "Reduce excessive physical activity and take regular breaks",
    },
];

const STABLE: &str = "Condition stable, rest well";

/// Build the ordered recommendation list.
///
/// `delta_total` is `Some` when a check-in comparison is available (check-out variant)
/// and `None` for the baseline variant. The baseline variant always emits a total-tier
/// message, so it is never empty.
pub fn recommend(scores: &SubScores, total: u8, delta_total: Option<i8>) -> Vec<String> {
    let mut recommendations = Vec::new();

    match TOTAL_TIERS.iter().find(|tier| total >= tier.min_total) {
        Some(tier) => recommendations.extend(tier.messages(delta_total.is_some()).iter().copied()),
        None if delta_total.is_none() => recommendations.extend(BASELINE_MAINTAIN),
        None => {}
    }

    if let Some(delta) = delta_total {
        let tier = DELTA_TIERS.iter().find(|tier| match tier.bound {
            DeltaBound::AtLeast(min) => delta >= min,
            DeltaBound::AtMost(max) => delta <= max,
        });
        if let Some(tier) = tier {
            recommendations.extend(tier.messages);
        }
    }

    let questionnaire_cautions: &[ComponentCaution] = if delta_total.is_none() {
        &QUESTIONNAIRE_CAUTIONS
    } else {
        &[]
    };
    recommendations.extend(
        BIOMETRIC_CAUTIONS
            .iter()
            .chain(questionnaire_cautions)
            .filter(|caution| scores.get(caution.component) >= caution.threshold)
            .map(|caution| caution.message),
    );

    if recommendations.is_empty() {
        recommendations.push(STABLE);
    }

    recommendations.into_iter().map(str::to_string).collect()
}
