use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::{BenefitId, CitizenProfile};
use super::service::{CriteriaRequest, ScreeningRequest, ServiceError, TriagemService};

/// Router builder exposing the screening endpoints.
pub fn triagem_router(service: Arc<TriagemService>) -> Router {
    Router::new()
        .route("/api/v1/beneficios", get(catalog_handler))
        .route("/api/v1/triagem", post(screening_handler))
        .route(
            "/api/v1/beneficios/:benefit_id/criterios",
            post(criteria_handler),
        )
        .route("/api/v1/perguntas", post(questions_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionsRequest {
    #[serde(default, rename = "perfil")]
    pub(crate) profile: Option<CitizenProfile>,
}

pub(crate) async fn catalog_handler(State(service): State<Arc<TriagemService>>) -> Response {
    let payload = json!({ "beneficios": service.summaries() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn screening_handler(
    State(service): State<Arc<TriagemService>>,
    axum::Json(request): axum::Json<ScreeningRequest>,
) -> Response {
    let today = Local::now().date_naive();
    let result = service.screen(&request, today);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn criteria_handler(
    State(service): State<Arc<TriagemService>>,
    Path(benefit_id): Path<String>,
    axum::Json(request): axum::Json<CriteriaRequest>,
) -> Response {
    let id = BenefitId(benefit_id);
    let today = Local::now().date_naive();
    match service.criteria(&id, &request, today) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error @ ServiceError::BenefitNotFound(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn questions_handler(
    State(service): State<Arc<TriagemService>>,
    axum::Json(request): axum::Json<QuestionsRequest>,
) -> Response {
    let questions = service.questions(request.profile.as_ref());
    let payload = json!({ "perguntas": questions });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
