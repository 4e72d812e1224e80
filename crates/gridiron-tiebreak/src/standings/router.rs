use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::alignment::MembershipLookup;
use super::records::TiebreakError;
use super::service::{CompareRequest, ReportRequest, TiebreakService, TiebreakServiceError};

/// Router builder exposing the report and pairwise comparison endpoints.
pub fn tiebreak_router<L>(service: Arc<TiebreakService<L>>) -> Router
where
    L: MembershipLookup + 'static,
{
    Router::new()
        .route("/api/v1/tiebreak/report", post(report_handler::<L>))
        .route("/api/v1/tiebreak/compare", post(compare_handler::<L>))
        .with_state(service)
}

pub(crate) async fn report_handler<L>(
    State(service): State<Arc<TiebreakService<L>>>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    L: MembershipLookup + 'static,
{
    match service.report(request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn compare_handler<L>(
    State(service): State<Arc<TiebreakService<L>>>,
    axum::Json(request): axum::Json<CompareRequest>,
) -> Response
where
    L: MembershipLookup + 'static,
{
    match service.compare(request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: TiebreakServiceError) -> Response {
    let status = match &err {
        TiebreakServiceError::Tiebreak(TiebreakError::TeamNotFound(_)) => StatusCode::NOT_FOUND,
        TiebreakServiceError::NoSharedScenario { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
