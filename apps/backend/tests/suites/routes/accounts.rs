use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::{unique_str, unique_user_id};
use serde_json::{json, Value};
use tankard_backend::verify_access_token;

use crate::support::auth::bearer_header;
use crate::support::test_state::test_security;
use crate::support::{build_test_state, create_test_app};

const PASSWORD: &str = "correct horse battery";

/// Fits the username rules once lowercased.
fn fresh_username() -> String {
    unique_str("u")
}

#[actix_web::test]
async fn signup_then_signin_issue_tokens_for_the_same_user(
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let username = fresh_username();

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let signed_up: Value = test::read_body_json(resp).await;
    assert_eq!(signed_up["user"]["username"], username.to_lowercase());
    assert!(signed_up.get("password_hash").is_none());
    assert!(signed_up["user"].get("password_hash").is_none());

    let claims = verify_access_token(signed_up["token"].as_str().unwrap(), &test_security())?;
    assert_eq!(claims.sub, signed_up["user"]["id"].as_str().unwrap());

    // usernames are case-insensitive
    let req = test::TestRequest::post()
        .uri("/api/signin")
        .set_json(json!({ "username": username.to_uppercase(), "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let signed_in: Value = test::read_body_json(resp).await;
    assert_eq!(signed_in["user"]["id"], signed_up["user"]["id"]);

    let claims = verify_access_token(signed_in["token"].as_str().unwrap(), &test_security())?;
    assert_eq!(claims.sub, signed_up["user"]["id"].as_str().unwrap());
    Ok(())
}

#[actix_web::test]
async fn signup_token_reaches_games_and_profile() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let username = fresh_username();

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let auth = format!("Bearer {}", body["token"].as_str().unwrap());

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((AUTHORIZATION, auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile, body["user"]);

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let games: Value = test::read_body_json(resp).await;
    assert_eq!(games, json!([]));
    Ok(())
}

#[actix_web::test]
async fn taken_username_is_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let username = fresh_username();

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "username": format!("  {}  ", username.to_uppercase()), "password": "another password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_ALREADY_EXISTS",
        StatusCode::CONFLICT,
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn wrong_password_and_unknown_user_look_the_same(
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let username = fresh_username();

    let req = test::TestRequest::post()
        .uri("/api/signup")
        .set_json(json!({ "username": username, "password": PASSWORD }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    for (who, password) in [
        (username.clone(), "not the password"),
        (fresh_username(), PASSWORD),
        ("x".to_string(), PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/signin")
            .set_json(json!({ "username": who, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_CREDENTIALS",
            StatusCode::UNAUTHORIZED,
            Some("Invalid username or password"),
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn signup_validates_username_and_password() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;

    let cases = [
        (json!({ "username": "ab", "password": PASSWORD }), "INVALID_USERNAME"),
        (json!({ "username": "no spaces", "password": PASSWORD }), "INVALID_USERNAME"),
        (json!({ "password": PASSWORD }), "INVALID_USERNAME"),
        (json!({ "username": fresh_username(), "password": "short" }), "INVALID_PASSWORD"),
        (json!({ "username": fresh_username() }), "INVALID_PASSWORD"),
    ];

    for (body, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/signup")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(resp, code, StatusCode::BAD_REQUEST, None)
            .await;
    }
    Ok(())
}

#[actix_web::test]
async fn profile_requires_a_token_for_an_existing_user() -> Result<(), Box<dyn std::error::Error>>
{
    let app = create_test_app(build_test_state().await?).await;

    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    // a well-signed token whose subject never signed up
    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((AUTHORIZATION, bearer_header(unique_user_id(), &test_security())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
    Ok(())
}
