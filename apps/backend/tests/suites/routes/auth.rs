use actix_web::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_user_id;
use jsonwebtoken::{encode, EncodingKey, Header};
use tankard_backend::Claims;

use crate::support::auth::{bearer_header, mint_expired_token};
use crate::support::test_state::{test_security, TEST_SECRET};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn missing_bearer_is_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;

    for header in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer")] {
        let mut req = test::TestRequest::get().uri("/api/games");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(
            resp.headers().get("x-trace-id").unwrap(),
            resp.headers().get("x-request-id").unwrap(),
            "rejections are rendered inside the request's trace scope"
        );

        assert_problem_details_from_service_response(
            resp,
            "UNAUTHORIZED_MISSING_BEARER",
            StatusCode::UNAUTHORIZED,
            None,
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn expired_and_foreign_tokens_are_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;

    let expired = mint_expired_token(unique_user_id(), &test_security());
    let req = test::TestRequest::delete()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, format!("Bearer {expired}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_EXPIRED_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let foreign = bearer_header(
        unique_user_id(),
        &tankard_backend::SecurityConfig::new("some-other-secret".as_bytes()),
    );
    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, foreign))
        .set_json(serde_json::json!([]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn non_uuid_subject_is_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;

    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: "google-oauth2|1234".to_string(),
        iat: now,
        exp: now + 600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )?;

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "FORBIDDEN", StatusCode::FORBIDDEN, None)
        .await;
    Ok(())
}
