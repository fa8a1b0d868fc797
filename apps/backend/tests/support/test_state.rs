use std::env;
use std::env::VarError;
use std::str::FromStr;

use rps_backend::config::db::{DbKind, RuntimeEnv};
use rps_backend::db::retry::RetryPolicy;
use rps_backend::infra::state::{build_state, StateBuilder};
use rps_backend::state::app_state::AppState;
use rps_backend::AppError;

/// `RPS_TEST_DB_KIND` selects the backend; unset means in-memory SQLite,
/// which gives every test its own empty database.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match env::var("RPS_TEST_DB_KIND") {
        Ok(raw) => DbKind::from_str(&raw),
        Err(VarError::NotPresent) => Ok(DbKind::SqliteMemory),
        Err(err) => Err(AppError::config(format!(
            "failed to read RPS_TEST_DB_KIND: {err}"
        ))),
    }
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(db_kind)
        .with_retry(RetryPolicy::new(5)))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}
