use migration::count_applied_migrations;
use rps_backend::db::require_db;
use rps_backend::AppError;
use sea_orm::{ConnectionTrait, Statement};

use crate::support::build_test_state;

#[tokio::test]
async fn bootstrap_applies_schema() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let applied = count_applied_migrations(db)
        .await
        .map_err(|e| AppError::db(e.to_string()))?;
    assert!(applied >= 1);

    for table in ["participants", "matches", "rounds"] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT COUNT(*) FROM {table}"),
        ))
        .await?;
    }
    Ok(())
}

#[tokio::test]
async fn state_without_db_reports_unavailable() {
    let state = rps_backend::infra::state::build_state()
        .build()
        .await
        .expect("state without db always builds");

    let Err(err) = require_db(&state) else {
        panic!("state was built without a database");
    };
    assert_eq!(err.code(), rps_backend::errors::ErrorCode::DbUnavailable);
}
