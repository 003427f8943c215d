#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;


// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    bunker_test_support::logging::init();
}

/// Read a JSON body from a test response.
pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body should be JSON")
}
