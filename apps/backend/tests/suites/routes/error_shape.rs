// Problem+json contract for every HTTP failure path.

use actix_web::http::StatusCode;
use actix_web::test;
use bunker_backend::domain::SessionId;
use bunker_backend::state::app_state::AppState;
use bunker_test_support::problem_details::assert_problem_details_from_parts;
use serde_json::json;

use super::create_test_app;

async fn post_create(body: serde_json::Value) -> (StatusCode, actix_web::http::header::HeaderMap, Vec<u8>) {
    let app = create_test_app(AppState::for_tests()).await;
    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await.to_vec();
    (status, headers, body)
}

#[actix_web::test]
async fn unsupported_pairing_is_invalid_configuration() {
    let (status, headers, body) =
        post_create(json!({"player_count": 8, "bunker_spots": 6, "creator_name": "Alice"})).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_CONFIGURATION",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("bunker spots"),
    );
}

#[actix_web::test]
async fn blank_creator_name_is_invalid_name() {
    let (status, headers, body) =
        post_create(json!({"player_count": 8, "bunker_spots": 2, "creator_name": "  "})).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_NAME",
        StatusCode::UNPROCESSABLE_ENTITY,
        None,
    );
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let app = create_test_app(AppState::for_tests()).await;
    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"player_count": 8, "bunker_spots": "two""#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    let problem = assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    );
    // RequestTrace scopes the handler, so the trace id is real.
    assert_ne!(problem.trace_id, "unknown");
    assert_eq!(
        headers.get("x-request-id").unwrap().to_str().unwrap(),
        problem.trace_id
    );
}

#[actix_web::test]
async fn missing_field_is_bad_request() {
    let (status, headers, body) = post_create(json!({"player_count": 8, "bunker_spots": 2})).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        None,
    );
}

#[actix_web::test]
async fn unknown_and_malformed_game_ids() {
    let app = create_test_app(AppState::for_tests()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", SessionId::random()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let (status, headers) = (resp.status(), resp.headers().clone());
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "SESSION_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("not found"),
    );

    let req = test::TestRequest::get().uri("/api/games/42").to_request();
    let resp = test::call_service(&app, req).await;
    let (status, headers) = (resp.status(), resp.headers().clone());
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        Some("42"),
    );
}
