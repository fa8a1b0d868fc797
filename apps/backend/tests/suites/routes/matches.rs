use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::unique_helpers::unique_username;
use rps_backend::store::{SeaStore, Store};
use rps_backend::AppError;
use serde_json::json;

use crate::common::assert_problem;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn create_match_then_open_round() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (one, two) = {
        let store = SeaStore::new(&state);
        (
            store.create_participant(&unique_username("left")).await?,
            store.create_participant(&unique_username("right")).await?,
        )
    };
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({
            "total_rounds": 3,
            "participant_one_id": one.id,
            "participant_two_id": two.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["current_round"], 1);
    assert_eq!(created["finished"], false);
    assert_eq!(created["winner_id"], serde_json::Value::Null);
    assert!(created.get("lock_version").is_none());
    let match_id = created["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/rounds"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let round: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(round["round_no"], 1);
    assert_eq!(round["hand_one"], "none");
    assert_eq!(round["hand_two"], "none");

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/rounds"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "ROUND_IN_PROGRESS").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/matches/{match_id}"))
        .to_request();
    let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["id"], match_id);
    assert_eq!(detail["rounds"].as_array().map(Vec::len), Some(1));

    Ok(())
}

#[actix_web::test]
async fn invalid_total_rounds_is_422() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({
            "total_rounds": 0,
            "participant_one_id": 1,
            "participant_two_id": 2,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::UNPROCESSABLE_ENTITY, "INVALID_TOTAL_ROUNDS").await;
    Ok(())
}

#[actix_web::test]
async fn non_positive_match_id_is_400() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for uri in ["/api/matches/0", "/api/matches/-5", "/api/matches/abc"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_ID").await;
    }
    Ok(())
}

#[actix_web::test]
async fn unknown_match_is_404() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/matches/9999/rounds")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::NOT_FOUND, "MATCH_NOT_FOUND").await;
    Ok(())
}
