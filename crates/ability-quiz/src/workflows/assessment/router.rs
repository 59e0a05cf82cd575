use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerSet, ResultId};
use super::repository::{RepositoryError, ResultRepository};
use super::service::{ResultService, ResultServiceError};

/// Router builder exposing the questionnaire catalog and result lifecycle.
pub fn result_router<R>(service: Arc<ResultService<R>>) -> Router
where
    R: ResultRepository + 'static,
{
    Router::new()
        .route("/api/v1/questions", get(catalog_handler::<R>))
        .route("/api/v1/results", post(create_handler::<R>))
        .route("/api/v1/results/:result_id", get(get_handler::<R>))
        .route(
            "/api/v1/results/:result_id/email",
            post(email_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateResultRequest {
    pub(crate) answers: AnswerSet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachEmailRequest {
    pub(crate) email: String,
}

pub(crate) async fn catalog_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let payload = json!({ "questions": service.catalog().questions() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
    axum::Json(request): axum::Json<CreateResultRequest>,
) -> Response
where
    R: ResultRepository + 'static,
{
    match service.create(request.answers) {
        Ok(record) => {
            let payload = json!({ "result_id": record.id });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(ResultServiceError::MissingAnswers { missing }) => {
            let payload = json!({
                "error": "missing required answers",
                "missing": missing,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
    Path(result_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let Some(id) = ResultId::parse(&result_id) else {
        return invalid_id_response();
    };

    match service.get(id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.api_view())).into_response(),
        Err(ResultServiceError::Repository(RepositoryError::NotFound)) => not_found_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn email_handler<R>(
    State(service): State<Arc<ResultService<R>>>,
    Path(result_id): Path<String>,
    axum::Json(request): axum::Json<AttachEmailRequest>,
) -> Response
where
    R: ResultRepository + 'static,
{
    let Some(id) = ResultId::parse(&result_id) else {
        return invalid_id_response();
    };

    match service.attach_email(id, &request.email) {
        Ok(()) => {
            let payload = json!({ "success": true, "result_id": id });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ResultServiceError::InvalidEmail) => {
            let payload = json!({ "error": "invalid email address" });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(ResultServiceError::Repository(RepositoryError::NotFound)) => not_found_response(),
        Err(other) => internal_error(other),
    }
}

fn invalid_id_response() -> Response {
    let payload = json!({ "error": "invalid result id" });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn not_found_response() -> Response {
    let payload = json!({ "error": "result not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: ResultServiceError) -> Response {
    tracing::error!(%error, "result operation failed");
    let payload = json!({ "error": "internal error" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
