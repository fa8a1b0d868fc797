use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_username;
use rps_backend::AppError;
use serde_json::json;

use crate::common::assert_problem;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn create_and_fetch_participant() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let name = unique_username("http");

    let req = test::TestRequest::post()
        .uri("/api/participants")
        .set_json(json!({ "username": name }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["username"], name.as_str());
    let id = created["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/participants/{id}"))
        .to_request();
    let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["id"], id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/participants/{id}/matches"))
        .to_request();
    let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));

    Ok(())
}

#[actix_web::test]
async fn duplicate_username_is_409() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;
    let name = unique_username("twice");

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/participants")
            .set_json(json!({ "username": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        if expected == StatusCode::CONFLICT {
            assert_problem(resp, expected, "USERNAME_TAKEN").await;
        } else {
            assert_eq!(resp.status(), expected);
        }
    }
    Ok(())
}

#[actix_web::test]
async fn unknown_participant_is_404() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/participants/424242")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "PARTICIPANT_NOT_FOUND").await;
    Ok(())
}
