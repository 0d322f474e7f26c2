use super::super::domain::{QuestionnaireAnswers, QuestionnaireScores, RiskLevel};
use super::super::intake::{
    validate_fas, validate_physical_activity, validate_psqi, ValidationError,
};

/// Score the three-item Fatigue Assessment Scale (sum 3..=15).
pub fn score_fas(answers: &[i32]) -> Result<RiskLevel, ValidationError> {
    validate_fas(answers).map(|answers| fas_level(answers.iter().sum()))
}

/// Score the four-item sleep quality block (sum 4..=16).
pub fn score_psqi(answers: &[i32]) -> Result<RiskLevel, ValidationError> {
    validate_psqi(answers).map(|answers| psqi_level(answers.iter().sum()))
}

/// Physical activity arrives pre-scored; only the range is checked.
pub fn score_physical_activity(answer: i32) -> Result<RiskLevel, ValidationError> {
    validate_physical_activity(answer)
}

pub fn score_questionnaire(answers: &QuestionnaireAnswers) -> QuestionnaireScores {
    QuestionnaireScores {
        fas: fas_level(answers.fas.iter().sum()),
        psqi: psqi_level(answers.psqi.iter().sum()),
        pa: answers.physical_activity,
    }
}

fn fas_level(sum: i32) -> RiskLevel {
    match sum {
        i32::MIN..=5 => RiskLevel::NONE,
        6..=8 => RiskLevel::MONITOR,
        9..=11 => RiskLevel::HIGH,
        _ => RiskLevel::CRITICAL,
    }
}

fn psqi_level(sum: i32) -> RiskLevel {
    match sum {
        i32::MIN..=6 => RiskLevel::NONE,
        7..=9 => RiskLevel::MONITOR,
        10..=12 => RiskLevel::HIGH,
        _ => RiskLevel::CRITICAL,
    }
}
