use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::standings::router::{compare_handler, report_handler, tiebreak_router};
use crate::standings::service::{CompareRequest, ReportRequest, TiebreakService};

fn schedule_json() -> Value {
    json!({
        "reg": {
            "1": {
                "m1": {
                    "homeTeamName": "A",
                    "awayTeamName": "B",
                    "status": 2,
                    "A Score": 24,
                    "B Score": 17
                },
                "m2": {
                    "homeTeamName": "W",
                    "awayTeamName": "E",
                    "status": 2,
                    "W Score": 3,
                    "E Score": 9
                }
            },
            "9": {
                "m1": {
                    "homeTeamName": "B",
                    "awayTeamName": "A",
                    "status": 3,
                    "B Score": 10,
                    "A Score": 20
                }
            }
        }
    })
}

fn service() -> Arc<TiebreakService<crate::standings::alignment::LeagueAlignment>> {
    Arc::new(TiebreakService::new(Arc::new(league())))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn compare_endpoint_infers_division_scenario() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/tiebreak/compare")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "schedule": schedule_json(), "team_a": "A", "team_b": "B" }).to_string(),
        ))
        .expect("request builds");

    let response = tiebreak_router(service())
        .oneshot(request)
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["scenario"], "division");
    assert_eq!(body["winner"], "A");
    assert_eq!(body["decisive_criterion"], "Head-to-head");
    assert_eq!(body["head_to_head"]["clinched"], true);
    assert_eq!(body["trace"]["steps"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn compare_handler_rejects_cross_conference_pairs_without_scenario() {
    let request = CompareRequest {
        schedule: schedule_json(),
        team_a: "A".to_string(),
        team_b: "W".to_string(),
        scenario: None,
    };

    let response = compare_handler(State(service()), axum::Json(request)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn report_handler_returns_not_found_for_unknown_team() {
    let request = ReportRequest {
        schedule: schedule_json(),
        team: "Nobody".to_string(),
        include_division: true,
        include_wildcard: true,
    };

    let response = report_handler(State(service()), axum::Json(request)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("Nobody"));
}

#[tokio::test]
async fn report_endpoint_returns_summary_and_trace() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/tiebreak/report")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "schedule": schedule_json(), "team": "A" }).to_string(),
        ))
        .expect("request builds");

    let response = tiebreak_router(service())
        .oneshot(request)
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["summary"]["team"], "A");
    assert_eq!(body["summary"]["division_rivals"][0]["opponent"], "B");
    assert_eq!(
        body["summary"]["division_rivals"][0]["head_to_head"],
        "2-0 (W 24-17, W 20-10)"
    );
    assert_eq!(body["summary"]["wildcard_opponents"][0]["opponent"], "E");
    assert_eq!(
        body["report"]["division_rivals"][0]["trace"]["steps"][0]["criterion"],
        "head_to_head"
    );
}
