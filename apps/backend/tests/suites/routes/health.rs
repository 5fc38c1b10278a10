use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use crate::support::test_state::build_test_state_without_db;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20250302_000001_create_users");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("db_error").is_none());
    Ok(())
}

#[actix_web::test]
async fn health_is_up_without_a_database() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["db_error"], "DB unavailable");
    Ok(())
}

#[actix_web::test]
async fn health_needs_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
    Ok(())
}
