use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A shared transaction wrapper that can be injected into request extensions
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a transaction the caller owns; `with_txn` never ends it.
    pub async fn open(conn: &DatabaseConnection) -> Result<Self, AppError> {
        Ok(Self(Arc::new(conn.begin().await?)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Make `with_txn` calls for this request run inside this transaction.
    pub fn inject(&self, req: &HttpRequest) {
        req.extensions_mut().insert(self.clone());
    }

    /// Roll back. Fails if another clone (e.g. in a live request) still exists.
    pub async fn rollback(self) -> Result<(), DbErr> {
        let txn = Arc::try_unwrap(self.0).map_err(|_| {
            DbErr::Custom("Cannot rollback: transaction is still shared".to_string())
        })?;
        txn.rollback().await
    }
}

/// Whether `req` carries an injected [`SharedTxn`].
pub fn has_shared_txn(req: Option<&HttpRequest>) -> bool {
    req.is_some_and(|r| r.extensions().contains::<SharedTxn>())
}

/// Execute a function within a database transaction
///
/// 1) If a SharedTxn is in request extensions → use it (no commit/rollback here)
/// 2) Otherwise → begin txn, run closure, apply policy on Ok / rollback on Err
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> LocalBoxFuture<'c, Result<R, AppError>>,
{
    // Clone out of the extensions before awaiting; holding the RefCell borrow
    // across an await would panic on re-entry.
    let shared_txn: Option<SharedTxn> = req.and_then(|r| r.extensions().get::<SharedTxn>().cloned());

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => txn.commit().await?,
                txn_policy::TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
