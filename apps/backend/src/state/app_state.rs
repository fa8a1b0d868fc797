use sea_orm::DatabaseConnection;

use crate::config::db::DbKind;
use crate::db::retry::RetryPolicy;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in some test scenarios)
    db: Option<DatabaseConnection>,
    db_kind: Option<DbKind>,
    /// Budget for re-running transactions that lost a race
    retry: RetryPolicy,
}

impl AppState {
    pub fn new(db: DatabaseConnection, db_kind: DbKind, retry: RetryPolicy) -> Self {
        Self {
            db: Some(db),
            db_kind: Some(db_kind),
            retry,
        }
    }

    /// State with no database; every persistence call fails with `DB_UNAVAILABLE`.
    pub fn without_db(retry: RetryPolicy) -> Self {
        Self {
            db: None,
            db_kind: None,
            retry,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn db_kind(&self) -> Option<DbKind> {
        self.db_kind
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}
