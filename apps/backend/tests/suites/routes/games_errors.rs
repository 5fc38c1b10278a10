use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_user_id;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::ids_of;
use crate::support::auth::bearer_header;
use crate::support::test_state::{build_test_state_without_db, test_security};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn malformed_delete_id_is_invalid_game_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let auth = bearer_header(unique_user_id(), &test_security());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games?ids={}&ids=not-a-uuid", Uuid::new_v4()))
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        Some("not-a-uuid"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let auth = bearer_header(unique_user_id(), &test_security());

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth.clone()))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload(r#"[{"id": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;

    // an object where an array is expected
    let req = test::TestRequest::put()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth))
        .set_json(json!({ "id": Uuid::new_v4(), "name": "Dune" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("wrong types"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn blank_or_missing_name_rejects_the_whole_batch() -> Result<(), Box<dyn std::error::Error>>
{
    let app = create_test_app(build_test_state().await?).await;
    let auth = bearer_header(unique_user_id(), &test_security());

    for bad in [json!({ "id": Uuid::new_v4(), "name": "   " }), json!({ "id": Uuid::new_v4() })] {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(json!([{ "id": Uuid::new_v4(), "name": "Valid" }, bad]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_GAME_NAME",
            StatusCode::BAD_REQUEST,
            None,
        )
        .await;
    }

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert!(ids_of(&listed).is_empty(), "nothing from a rejected batch is stored");
    Ok(())
}

#[actix_web::test]
async fn duplicate_ids_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let auth = bearer_header(unique_user_id(), &test_security());
    let id = Uuid::new_v4();

    // twice in one batch
    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth.clone()))
        .set_json(json!([{ "id": id, "name": "Ark Nova" }, { "id": id, "name": "Ark Nova" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_ALREADY_EXISTS",
        StatusCode::CONFLICT,
        Some("more than once"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth.clone()))
        .set_json(json!([{ "id": id, "name": "Ark Nova" }]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    // already stored: the fresh row in the same batch rolls back with it
    let fresh = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth.clone()))
        .set_json(json!([{ "id": fresh, "name": "Cartographers" }, { "id": id, "name": "Again" }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_ALREADY_EXISTS",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids_of(&listed), vec![id.to_string()]);
    assert_eq!(listed[0]["name"], "Ark Nova");
    Ok(())
}

#[actix_web::test]
async fn update_of_unowned_game_applies_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let owner = bearer_header(unique_user_id(), &test_security());
    let intruder = bearer_header(unique_user_id(), &test_security());

    let mine = Uuid::new_v4();
    let theirs = Uuid::new_v4();
    for (auth, id, name) in [(&owner, mine, "Patchwork"), (&intruder, theirs, "Jaipur")] {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .insert_header((AUTHORIZATION, auth.clone()))
            .set_json(json!([{ "id": id, "name": name }]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::put()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, owner.clone()))
        .set_json(json!([
            { "id": mine, "name": "Patchwork Doodle" },
            { "id": theirs, "name": "Stolen" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some(&theirs.to_string()),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, owner))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed[0]["name"], "Patchwork");

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, intruder))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed[0]["name"], "Jaipur");
    Ok(())
}

#[actix_web::test]
async fn oversized_description_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).await;
    let auth = bearer_header(unique_user_id(), &test_security());

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth))
        .set_json(json!([{ "id": Uuid::new_v4(), "name": "Gloomhaven", "description": "x".repeat(2001) }]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_GAME_DESCRIPTION",
        StatusCode::BAD_REQUEST,
        Some("2000"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn missing_database_is_service_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state_without_db().await?).await;
    let auth = bearer_header(unique_user_id(), &test_security());

    let req = test::TestRequest::get()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(RETRY_AFTER).unwrap(), "1");

    assert_problem_details_from_service_response(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
    Ok(())
}
