use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for check-in and check-out sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordinal risk value for a single component: 0 = no concern, 3 = critical.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskLevel(u8);

impl RiskLevel {
    pub const NONE: Self = Self(0);
    pub const MONITOR: Self = Self(1);
    pub const HIGH: Self = Self(2);
    pub const CRITICAL: Self = Self(3);

    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::CRITICAL.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("risk level {0} is outside 0..=3")]
pub struct RiskLevelOutOfRange(pub u8);

impl TryFrom<u8> for RiskLevel {
    type Error = RiskLevelOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(RiskLevelOutOfRange(value))
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.0
    }
}

/// Facial-fatigue classification produced upstream of the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacialFatigue {
    Neutral,
    Mild,
    Moderate,
    Severe,
}

impl FacialFatigue {
    const SEVERE_KEYWORDS: [&'static str; 2] = ["severe", "exhausted"];
    const MODERATE_KEYWORDS: [&'static str; 2] = ["moderate", "tired"];
    const MILD_KEYWORDS: [&'static str; 2] = ["mild", "slight"];

    /// Map a free-text expression label onto the closed classification.
    ///
    /// Matching is a case-insensitive substring search checked from the most severe
    /// keywords down, so "Severe Fatigue" resolves to `Severe` and anything without a
    /// keyword (including "Neutral") resolves to `Neutral`.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| label.contains(*keyword));

        if mentions(&Self::SEVERE_KEYWORDS) {
            Self::Severe
        } else if mentions(&Self::MODERATE_KEYWORDS) {
            Self::Moderate
        } else if mentions(&Self::MILD_KEYWORDS) {
            Self::Mild
        } else {
            Self::Neutral
        }
    }

    pub const fn risk(self) -> RiskLevel {
        match self {
            FacialFatigue::Neutral => RiskLevel::NONE,
            FacialFatigue::Mild => RiskLevel::MONITOR,
            FacialFatigue::Moderate => RiskLevel::HIGH,
            FacialFatigue::Severe => RiskLevel::CRITICAL,
        }
    }
}

/// Vitals captured at the start or end of a shift after intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricReading {
    /// Systolic blood pressure in mmHg.
    pub sbp: f64,
    /// Diastolic blood pressure in mmHg.
    pub dbp: f64,
    /// Heart rate in beats per minute.
    pub bpm: f64,
    /// Body temperature in degrees Celsius.
    pub temp: f64,
    /// Facial fatigue label exactly as captured.
    pub face_label: String,
    pub face: FacialFatigue,
}

/// Validated questionnaire answers collected at check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    pub fas: [i32; 3],
    pub psqi: [i32; 4],
    pub physical_activity: RiskLevel,
}

/// The seven scored components, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Fas,
    Psqi,
    Pa,
    Bp,
    Hr,
    Temp,
    Face,
}

impl Component {
    pub const ALL: [Component; 7] = [
        Component::Fas,
        Component::Psqi,
        Component::Pa,
        Component::Bp,
        Component::Hr,
        Component::Temp,
        Component::Face,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Component::Fas => "fas",
            Component::Psqi => "psqi",
            Component::Pa => "pa",
            Component::Bp => "bp",
            Component::Hr => "hr",
            Component::Temp => "temp",
            Component::Face => "face",
        }
    }
}

/// Biometric half of the sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiometricScores {
    pub bp: RiskLevel,
    pub hr: RiskLevel,
    pub temp: RiskLevel,
    pub face: RiskLevel,
}

/// Questionnaire half of the sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireScores {
    pub fas: RiskLevel,
    pub psqi: RiskLevel,
    pub pa: RiskLevel,
}

impl QuestionnaireScores {
    pub fn total(&self) -> u8 {
        self.fas.value() + self.psqi.value() + self.pa.value()
    }
}

/// Full set of component scores; every component is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub fas: RiskLevel,
    pub psqi: RiskLevel,
    pub pa: RiskLevel,
    pub bp: RiskLevel,
    pub hr: RiskLevel,
    pub temp: RiskLevel,
    pub face: RiskLevel,
}

impl SubScores {
    pub fn from_parts(questionnaire: QuestionnaireScores, biometrics: BiometricScores) -> Self {
        Self {
            fas: questionnaire.fas,
            psqi: questionnaire.psqi,
            pa: questionnaire.pa,
            bp: biometrics.bp,
            hr: biometrics.hr,
            temp: biometrics.temp,
            face: biometrics.face,
        }
    }

    pub fn get(&self, component: Component) -> RiskLevel {
        match component {
            Component::Fas => self.fas,
            Component::Psqi => self.psqi,
            Component::Pa => self.pa,
            Component::Bp => self.bp,
            Component::Hr => self.hr,
            Component::Temp => self.temp,
            Component::Face => self.face,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, RiskLevel)> + '_ {
        Component::ALL
            .into_iter()
            .map(move |component| (component, self.get(component)))
    }

    pub fn total(&self) -> u8 {
        self.iter().map(|(_, level)| level.value()).sum()
    }

    /// Components currently at the critical level.
    pub fn critical(&self) -> Vec<Component> {
        self.iter()
            .filter(|(_, level)| *level == RiskLevel::CRITICAL)
            .map(|(component, _)| component)
            .collect()
    }

    pub fn delta_from(&self, baseline: &SubScores) -> ComponentDeltas {
        let delta = |component| {
            self.get(component).value() as i8 - baseline.get(component).value() as i8
        };
        ComponentDeltas {
            fas: delta(Component::Fas),
            psqi: delta(Component::Psqi),
            pa: delta(Component::Pa),
            bp: delta(Component::Bp),
            hr: delta(Component::Hr),
            temp: delta(Component::Temp),
            face: delta(Component::Face),
        }
    }
}

/// Signed per-component change between two snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDeltas {
    pub fas: i8,
    pub psqi: i8,
    pub pa: i8,
    pub bp: i8,
    pub hr: i8,
    pub temp: i8,
    pub face: i8,
}

/// Four-level fatigue classification derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Fit")]
    Fit,
    #[serde(rename = "Mild Fatigue")]
    MildFatigue,
    #[serde(rename = "Moderate Fatigue")]
    ModerateFatigue,
    #[serde(rename = "Severe Fatigue")]
    SevereFatigue,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Classification::Fit => "Fit",
            Classification::MildFatigue => "Mild Fatigue",
            Classification::ModerateFatigue => "Moderate Fatigue",
            Classification::SevereFatigue => "Severe Fatigue",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable scoring result for a single check-in or check-out event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub scores: SubScores,
    pub total_score: u8,
    pub classification: Classification,
}

/// Check-in kept for a session: its scores plus the vitals they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRecord {
    #[serde(flatten)]
    pub snapshot: ScoreSnapshot,
    pub biometrics: BiometricReading,
}
