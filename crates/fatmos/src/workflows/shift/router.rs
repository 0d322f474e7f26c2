use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{CheckInRecord, SessionId};
use super::intake::{
    CheckInRequest, CheckOutRequest, IntakeError, QuestionnaireRequest, ValidationError,
};
use super::repository::{CheckInStore, SupervisorNotifier};
use super::service::{BaselineSource, ShiftAssessmentService, ShiftServiceError};

/// Router builder exposing check-in, check-out, and questionnaire endpoints.
pub fn shift_router<S, N>(service: Arc<ShiftAssessmentService<S, N>>) -> Router
where
    S: CheckInStore + 'static,
    N: SupervisorNotifier + 'static,
{
    Router::new()
        .route("/api/v1/checkin", post(check_in_handler::<S, N>))
        .route("/api/v1/checkout", post(check_out_handler::<S, N>))
        .route("/api/v1/questionnaires", post(questionnaire_handler::<S, N>))
        .route("/api/v1/checkin-data", get(checkin_data_handler::<S, N>))
        .with_state(service)
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
struct Success<T> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Success<T> {
    fn respond(body: T) -> Response {
        (
            StatusCode::OK,
            Json(Success {
                status: "success",
                body,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct CheckInBody {
    checkin: CheckInRecord,
}

#[derive(Debug, Serialize)]
struct CheckInDataBody {
    checkin_data: CheckInRecord,
    baseline: BaselineSource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckInLookup {
    #[serde(default)]
    pub(crate) session_id: Option<String>,
}

pub(crate) async fn check_in_handler<S, N>(
    State(service): State<Arc<ShiftAssessmentService<S, N>>>,
    payload: Result<Json<CheckInRequest>, JsonRejection>,
) -> Response
where
    S: CheckInStore + 'static,
    N: SupervisorNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return body_rejection(rejection),
    };

    match service.check_in(request) {
        Ok(checkin) => Success::respond(CheckInBody { checkin }),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn check_out_handler<S, N>(
    State(service): State<Arc<ShiftAssessmentService<S, N>>>,
    payload: Result<Json<CheckOutRequest>, JsonRejection>,
) -> Response
where
    S: CheckInStore + 'static,
    N: SupervisorNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return body_rejection(rejection),
    };

    match service.check_out(request) {
        Ok(report) => Success::respond(report),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn questionnaire_handler<S, N>(
    State(service): State<Arc<ShiftAssessmentService<S, N>>>,
    payload: Result<Json<QuestionnaireRequest>, JsonRejection>,
) -> Response
where
    S: CheckInStore + 'static,
    N: SupervisorNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return body_rejection(rejection),
    };

    match service.questionnaire(request) {
        Ok(report) => Success::respond(report),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn checkin_data_handler<S, N>(
    State(service): State<Arc<ShiftAssessmentService<S, N>>>,
    lookup: Result<Query<CheckInLookup>, QueryRejection>,
) -> Response
where
    S: CheckInStore + 'static,
    N: SupervisorNotifier + 'static,
{
    let Query(lookup) = match lookup {
        Ok(lookup) => lookup,
        Err(rejection) => return query_rejection(rejection),
    };

    let Some(session_id) = lookup
        .session_id
        .filter(|value| !value.trim().is_empty())
        .map(SessionId)
    else {
        return error_response(IntakeError::MissingField("session_id").into());
    };

    match service.checkin_record(&session_id) {
        Ok((checkin_data, baseline)) => Success::respond(CheckInDataBody {
            checkin_data,
            baseline,
        }),
        Err(err) => error_response(err),
    }
}

fn body_rejection(rejection: JsonRejection) -> Response {
    let err = IntakeError::from(ValidationError::MalformedBody(rejection.body_text()));
    error_response(err.into())
}

fn query_rejection(rejection: QueryRejection) -> Response {
    let err = IntakeError::from(ValidationError::MalformedQuery(rejection.body_text()));
    error_response(err.into())
}

fn error_response(err: ShiftServiceError) -> Response {
    match err {
        ShiftServiceError::Intake(err) => {
            let payload = json!({
                "status": "error",
                "message": err.to_string(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        ShiftServiceError::Store(err) => {
            error!(error = %err, "check-in store failure");
            let payload = json!({
                "status": "error",
                "message": "Internal server error",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
