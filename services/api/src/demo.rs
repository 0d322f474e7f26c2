use crate::infra::InMemorySupervisorNotifier;
use chrono::{Duration, SecondsFormat, Utc};
use clap::Args;
use fatmos::error::AppError;
use fatmos::workflows::shift::{
    recommend, BiometricPayload, CheckInRecord, CheckInRequest, CheckOutReport, CheckOutRequest,
    EscalationAlert, InMemoryCheckInStore, IntakeError, QuestionnaireAnswers, ScoreSnapshot,
    ScoringEngine, SessionId, ShiftAssessmentService, ShiftServiceError,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Session identifier used for both the check-in and the check-out.
    #[arg(long, default_value = "demo-shift")]
    pub(crate) session: String,
    /// End the shift with rested answers instead of the strained scenario.
    #[arg(long)]
    pub(crate) rested: bool,
    /// Print the check-out report as JSON after the summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Systolic blood pressure (mmHg)
    #[arg(long)]
    pub(crate) sbp: f64,
    /// Diastolic blood pressure (mmHg)
    #[arg(long)]
    pub(crate) dbp: f64,
    /// Heart rate (beats per minute)
    #[arg(long)]
    pub(crate) bpm: f64,
    /// Body temperature (degrees Celsius)
    #[arg(long)]
    pub(crate) temp: f64,
    /// Facial fatigue label from the capture form
    #[arg(long, default_value = "Neutral")]
    pub(crate) face: String,
    /// FAS answers, comma separated (three values in 1..=5)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub(crate) fas: Vec<i32>,
    /// PSQI answers, comma separated (four values in 1..=4)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub(crate) psqi: Vec<i32>,
    /// Physical activity answer (0..=3)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) pa: Option<i32>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let snapshot = score_once(args)?;
    let recommendations = recommend(&snapshot.scores, snapshot.total_score, None);

    println!(
        "Total score {} -> {}",
        snapshot.total_score, snapshot.classification
    );
    println!("Component scores:");
    for (component, level) in snapshot.scores.iter() {
        println!("  - {}: {}", component.key(), level.value());
    }
    println!("Recommendations:");
    for message in &recommendations {
        println!("  - {message}");
    }

    Ok(())
}

/// Vitals only score like a check-in; any questionnaire input scores like a check-out.
fn score_once(args: ScoreArgs) -> Result<ScoreSnapshot, AppError> {
    let ScoreArgs {
        sbp,
        dbp,
        bpm,
        temp,
        face,
        fas,
        psqi,
        pa,
    } = args;

    let reading = BiometricPayload {
        sbp: Some(sbp),
        dbp: Some(dbp),
        bpm: Some(bpm),
        temp: Some(temp),
        face_label: Some(face),
    }
    .into_reading()
    .map_err(intake_error)?;

    let engine = ScoringEngine::new();
    let session_id = SessionId("cli".to_string());
    let now = Utc::now();

    if fas.is_empty() && psqi.is_empty() && pa.is_none() {
        return Ok(engine.check_in(session_id, now, &reading));
    }

    let pa = pa.ok_or_else(|| intake_error(IntakeError::MissingField("pa")))?;
    let answers = QuestionnaireAnswers::try_new(&fas, &psqi, pa).map_err(intake_error)?;
    Ok(engine.check_out(session_id, now, &reading, &answers))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        session,
        rested,
        json,
    } = args;

    println!("Shift fatigue demo for session '{session}'");
    let (checkin, report, alerts) = shift_scenario(&session, rested)?;

    println!(
        "- Check-in: total {} -> {}",
        checkin.snapshot.total_score, checkin.snapshot.classification
    );
    println!(
        "- Check-out: total {} -> {} ({:+} from check-in, {:?} baseline)",
        report.total_score, report.classification, report.delta_from_checkin, report.baseline
    );
    println!(
        "- Risk escalation: {}",
        if report.comparison.risk_escalation {
            "yes"
        } else {
            "no"
        }
    );
    println!("  Recommendations:");
    for message in &report.comparison.recommendations {
        println!("    - {message}");
    }

    if alerts.is_empty() {
        println!("  Supervisor alerts: none raised");
    } else {
        println!("  Supervisor alerts:");
        for alert in &alerts {
            let critical: Vec<&str> = alert
                .critical_components
                .iter()
                .map(|component| component.key())
                .collect();
            println!(
                "    - {} (total {}, critical: {})",
                alert.session_id,
                alert.total_score,
                if critical.is_empty() {
                    "none".to_string()
                } else {
                    critical.join(", ")
                }
            );
        }
    }

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("  Check-out payload:\n{payload}"),
            Err(err) => println!("  Check-out payload unavailable: {err}"),
        }
    }

    Ok(())
}

fn shift_scenario(
    session: &str,
    rested: bool,
) -> Result<(CheckInRecord, CheckOutReport, Vec<EscalationAlert>), AppError> {
    let store = Arc::new(InMemoryCheckInStore::default());
    let notifier = Arc::new(InMemorySupervisorNotifier::default());
    let service = ShiftAssessmentService::new(store, notifier.clone());

    let checkout_at = Utc::now();
    let checkin_at = checkout_at - Duration::hours(12);

    let checkin = service.check_in(CheckInRequest {
        session_id: Some(session.to_string()),
        timestamp: Some(checkin_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        biometrics: Some(vitals(118.0, 76.0, 70.0, 36.7, "Neutral")),
    })?;

    let (biometrics, fas, psqi, pa) = if rested {
        (
            vitals(121.0, 79.0, 74.0, 36.8, "Neutral"),
            vec![2, 1, 2],
            vec![1, 2, 1, 1],
            0,
        )
    } else {
        (
            vitals(165.0, 105.0, 110.0, 38.1, "Severe Fatigue"),
            vec![5, 5, 4],
            vec![4, 4, 4, 3],
            2,
        )
    };

    let report = service.check_out(CheckOutRequest {
        session_id: Some(session.to_string()),
        checkin_session_id: None,
        biometrics: Some(biometrics),
        fas_answers: Some(fas),
        psqi_answers: Some(psqi),
        pa_answer: Some(pa),
        timestamp: Some(checkout_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    })?;

    Ok((checkin, report, notifier.alerts()))
}

fn vitals(sbp: f64, dbp: f64, bpm: f64, temp: f64, face: &str) -> BiometricPayload {
    BiometricPayload {
        sbp: Some(sbp),
        dbp: Some(dbp),
        bpm: Some(bpm),
        temp: Some(temp),
        face_label: Some(face.to_string()),
    }
}

fn intake_error(err: impl Into<IntakeError>) -> AppError {
    AppError::Shift(ShiftServiceError::Intake(err.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatmos::workflows::shift::{BaselineSource, Classification, ValidationError};

    fn strained_args() -> ScoreArgs {
        ScoreArgs {
            sbp: 165.0,
            dbp: 105.0,
            bpm: 110.0,
            temp: 38.1,
            face: "Severe Fatigue".to_string(),
            fas: vec![5, 5, 4],
            psqi: vec![4, 4, 4, 3],
            pa: Some(2),
        }
    }

    #[test]
    fn strained_scenario_escalates_to_supervisor() {
        let (checkin, report, alerts) = shift_scenario("demo-test", false).expect("scenario runs");

        assert_eq!(checkin.snapshot.classification, Classification::Fit);
        assert_eq!(report.baseline, BaselineSource::Stored);
        assert_eq!(report.total_score, 16);
        assert_eq!(report.delta_from_checkin, 16);
        assert!(report.comparison.risk_escalation);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].session_id, SessionId("demo-test".to_string()));
    }

    #[test]
    fn rested_scenario_stays_stable() {
        let (_, report, alerts) = shift_scenario("demo-rested", true).expect("scenario runs");

        assert_eq!(report.total_score, 0);
        assert_eq!(report.delta_from_checkin, 0);
        assert!(!report.comparison.risk_escalation);
        assert_eq!(
            report.comparison.recommendations,
            vec!["Condition stable, rest well"]
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn score_once_uses_check_out_scoring_with_answers() {
        let snapshot = score_once(strained_args()).expect("scores");

        assert_eq!(snapshot.total_score, 16);
        assert_eq!(snapshot.classification, Classification::SevereFatigue);
    }

    #[test]
    fn score_once_without_answers_scores_vitals_only() {
        let args = ScoreArgs {
            fas: Vec::new(),
            psqi: Vec::new(),
            pa: None,
            ..strained_args()
        };

        let snapshot = score_once(args).expect("scores");

        assert_eq!(snapshot.scores.fas.value(), 0);
        assert_eq!(snapshot.total_score, 8);
        assert_eq!(snapshot.classification, Classification::MildFatigue);
    }

    #[test]
    fn score_once_rejects_short_answer_lists() {
        let args = ScoreArgs {
            fas: vec![5, 5],
            ..strained_args()
        };

        let err = score_once(args).expect_err("invalid answers");

        assert!(matches!(
            err,
            AppError::Shift(ShiftServiceError::Intake(IntakeError::Validation(
                ValidationError::AnswerCount { found: 2, .. }
            )))
        ));
    }

    #[test]
    fn run_score_and_run_demo_complete() {
        run_score(strained_args()).expect("score prints");
        run_demo(DemoArgs {
            session: "demo-print".to_string(),
            rested: false,
            json: true,
        })
        .expect("demo prints");
    }
}
