use actix_web::http::StatusCode;
use actix_web::test;
use rps_backend::AppError;

use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_ne!(body["migrations"], "unknown");
    Ok(())
}

#[actix_web::test]
async fn health_without_db_still_answers() {
    let state = rps_backend::AppState::without_db(rps_backend::RetryPolicy::default());
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "unavailable");
}
