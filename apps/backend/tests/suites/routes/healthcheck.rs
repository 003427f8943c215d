use actix_web::http::StatusCode;
use actix_web::test;
use bunker_backend::domain::ParticipantId;
use bunker_backend::state::app_state::AppState;

use super::create_test_app;
use crate::common::read_json;

#[actix_web::test]
async fn test_health_endpoint() {
    let state = AppState::for_tests();
    state
        .sessions()
        .create_and_join(8, 2, ParticipantId::random(), "Alice")
        .unwrap();
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["sessions"], 1);
    assert_eq!(body["connections"], 0);
    assert_eq!(body["reveal_policy"], "full_rotation");
    assert!(body["uptime_secs"].is_u64());
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
}

#[actix_web::test]
async fn test_root_greeting_and_request_id() {
    let app = create_test_app(AppState::for_tests()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-request-id"));

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Bunker"));
}
