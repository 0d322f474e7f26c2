//! Boundary validation for inbound check-in, check-out, and questionnaire payloads.
//!
//! Every request field is optional at the serde layer so that absent fields surface as
//! [`IntakeError::MissingField`] instead of a generic deserialization failure. Validation
//! completes before any scoring runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{BiometricReading, FacialFatigue, QuestionnaireAnswers, RiskLevel, SessionId};

pub const FAS_ITEMS: usize = 3;
pub const PSQI_ITEMS: usize = 4;
const FAS_RANGE: (i32, i32) = (1, 5);
const PSQI_RANGE: (i32, i32) = (1, 4);

/// Errors raised when a payload is well-formed but carries invalid values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{instrument} requires exactly {expected} answers, found {found}")]
    AnswerCount {
        instrument: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{instrument} answer {value} is outside {min}..={max}")]
    AnswerRange {
        instrument: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("physical activity answer {0} is outside 0..=3")]
    PhysicalActivityRange(i32),
    #[error("biometric field {0} must be a finite number")]
    NonFiniteBiometric(&'static str),
    #[error("timestamp '{0}' is not an ISO-8601 instant")]
    Timestamp(String),
    #[error("invalid request body: {0}")]
    MalformedBody(String),
    #[error("invalid query string: {0}")]
    MalformedQuery(String),
}

/// Intake failure reported once per request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Raw vitals as posted by the capture form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiometricPayload {
    #[serde(default)]
    pub sbp: Option<f64>,
    #[serde(default)]
    pub dbp: Option<f64>,
    #[serde(default)]
    pub bpm: Option<f64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub face_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub biometrics: Option<BiometricPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckOutRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub checkin_session_id: Option<String>,
    #[serde(default)]
    pub biometrics: Option<BiometricPayload>,
    #[serde(default)]
    pub fas_answers: Option<Vec<i32>>,
    #[serde(default)]
    pub psqi_answers: Option<Vec<i32>>,
    #[serde(default)]
    pub pa_answer: Option<i32>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub fas_answers: Option<Vec<i32>>,
    #[serde(default)]
    pub psqi_answers: Option<Vec<i32>>,
    #[serde(default)]
    pub pa_answer: Option<i32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInSubmission {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub reading: BiometricReading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutSubmission {
    pub session_id: SessionId,
    pub checkin_session_id: Option<SessionId>,
    pub timestamp: DateTime<Utc>,
    pub reading: BiometricReading,
    pub answers: QuestionnaireAnswers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireSubmission {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub answers: QuestionnaireAnswers,
    pub duration_ms: Option<u64>,
}

impl CheckInRequest {
    pub fn validate(self) -> Result<CheckInSubmission, IntakeError> {
        let session_id = required_session(self.session_id, "session_id")?;
        let biometrics = self.biometrics.ok_or(IntakeError::MissingField("biometrics"))?;
        let timestamp = self.timestamp.ok_or(IntakeError::MissingField("timestamp"))?;

        Ok(CheckInSubmission {
            session_id,
            timestamp: parse_timestamp(&timestamp)?,
            reading: biometrics.into_reading()?,
        })
    }
}

impl CheckOutRequest {
    /// Validate the payload; `now` stands in for an absent timestamp.
    pub fn validate(self, now: DateTime<Utc>) -> Result<CheckOutSubmission, IntakeError> {
        let session_id = required_session(self.session_id, "session_id")?;
        let biometrics = self.biometrics.ok_or(IntakeError::MissingField("biometrics"))?;
        let fas = self.fas_answers.ok_or(IntakeError::MissingField("fas_answers"))?;
        let psqi = self
            .psqi_answers
            .ok_or(IntakeError::MissingField("psqi_answers"))?;
        let pa = self.pa_answer.ok_or(IntakeError::MissingField("pa_answer"))?;

        let checkin_session_id = self
            .checkin_session_id
            .filter(|value| !value.trim().is_empty())
            .map(SessionId);
        let timestamp = optional_timestamp(self.timestamp, now)?;
        let reading = biometrics.into_reading()?;
        let answers = QuestionnaireAnswers::try_new(&fas, &psqi, pa)?;

        Ok(CheckOutSubmission {
            session_id,
            checkin_session_id,
            timestamp,
            reading,
            answers,
        })
    }
}

impl QuestionnaireRequest {
    pub fn validate(self, now: DateTime<Utc>) -> Result<QuestionnaireSubmission, IntakeError> {
        let session_id = required_session(self.session_id, "session_id")?;
        let fas = self.fas_answers.ok_or(IntakeError::MissingField("fas_answers"))?;
        let psqi = self
            .psqi_answers
            .ok_or(IntakeError::MissingField("psqi_answers"))?;
        let pa = self.pa_answer.ok_or(IntakeError::MissingField("pa_answer"))?;

        Ok(QuestionnaireSubmission {
            session_id,
            timestamp: optional_timestamp(self.timestamp, now)?,
            answers: QuestionnaireAnswers::try_new(&fas, &psqi, pa)?,
            duration_ms: self.duration_ms,
        })
    }
}

impl BiometricPayload {
    pub fn into_reading(self) -> Result<BiometricReading, IntakeError> {
        let face_label = self
            .face_label
            .ok_or(IntakeError::MissingField("biometrics.face_label"))?;

        Ok(BiometricReading {
            sbp: finite(self.sbp, "sbp")?,
            dbp: finite(self.dbp, "dbp")?,
            bpm: finite(self.bpm, "bpm")?,
            temp: finite(self.temp, "temp")?,
            face: FacialFatigue::from_label(&face_label),
            face_label,
        })
    }
}

impl QuestionnaireAnswers {
    pub fn try_new(fas: &[i32], psqi: &[i32], pa: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            fas: validate_fas(fas)?,
            psqi: validate_psqi(psqi)?,
            physical_activity: validate_physical_activity(pa)?,
        })
    }
}

pub fn validate_fas(answers: &[i32]) -> Result<[i32; FAS_ITEMS], ValidationError> {
    validate_answers("FAS", answers, FAS_RANGE)
}

pub fn validate_psqi(answers: &[i32]) -> Result<[i32; PSQI_ITEMS], ValidationError> {
    validate_answers("PSQI", answers, PSQI_RANGE)
}

pub fn validate_physical_activity(answer: i32) -> Result<RiskLevel, ValidationError> {
    u8::try_from(answer)
        .ok()
        .and_then(RiskLevel::new)
        .ok_or(ValidationError::PhysicalActivityRange(answer))
}

fn validate_answers<const N: usize>(
    instrument: &'static str,
    answers: &[i32],
    (min, max): (i32, i32),
) -> Result<[i32; N], ValidationError> {
    let answers: [i32; N] = answers
        .try_into()
        .map_err(|_| ValidationError::AnswerCount {
            instrument,
            expected: N,
            found: answers.len(),
        })?;

    if let Some(&value) = answers
        .iter()
        .find(|value| !(min..=max).contains(*value))
    {
        return Err(ValidationError::AnswerRange {
            instrument,
            value,
            min,
            max,
        });
    }

    Ok(answers)
}

fn required_session(value: Option<String>, field: &'static str) -> Result<SessionId, IntakeError> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(SessionId)
        .ok_or(IntakeError::MissingField(field))
}

fn finite(value: Option<f64>, field: &'static str) -> Result<f64, IntakeError> {
    match value {
        Some(value) if value.is_finite() => Ok(value),
        Some(_) => Err(ValidationError::NonFiniteBiometric(field).into()),
        None => Err(IntakeError::MissingField(field)),
    }
}

fn optional_timestamp(
    value: Option<String>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationError> {
    value.map_or(Ok(now), |raw| parse_timestamp(&raw))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| ValidationError::Timestamp(raw.to_string()))
}
