//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; services convert it here, and higher
//! layers map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Prefix of the structured `DbErr::Custom` raised when a compare-and-set
/// on `lock_version` matches no row.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let (_, rest) = error_msg.split_once("UNIQUE constraint failed: ")?;
    rest.split_whitespace().next()
}

fn unique_conflict_for(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    let sqlite_target = extract_sqlite_table_column(error_msg);

    if error_msg.contains("participants_username_key")
        || sqlite_target == Some("participants.username")
    {
        return Some((ConflictKind::UniqueUsername, "Username already taken"));
    }

    // Two OpenRound calls raced for the same sequence number
    if error_msg.contains("rounds_match_id_round_no_key")
        || sqlite_target.is_some_and(|t| t.starts_with("rounds.match_id"))
    {
        return Some((
            ConflictKind::OptimisticLock,
            "Round was opened concurrently; please retry",
        ));
    }

    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            #[derive(serde::Deserialize)]
            struct LockInfo {
                entity: String,
                id: i64,
                expected: i32,
                actual: i32,
            }

            let parsed = msg
                .strip_prefix(OPTIMISTIC_LOCK_PREFIX)
                .and_then(|json| serde_json::from_str::<LockInfo>(json).ok());

            return match parsed {
                Some(info) => {
                    warn!(
                        trace_id = %trace_id,
                        entity = %info.entity,
                        id = info.id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "{} {} was modified concurrently (expected version {}); please retry",
                            info.entity, info.id, info.expected
                        ),
                    )
                }
                None => {
                    warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
                    DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        "Resource was modified by another transaction; please retry",
                    )
                }
            };
        }
        // A stored value the model cannot decode, e.g. an unknown `DbHand` token
        sea_orm::DbErr::Type(msg) => {
            error!(trace_id = %trace_id, raw_error = %Redacted(msg), "Stored row failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is invalid");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some((kind, detail)) = unique_conflict_for(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    // 40001 serialization failure, 40P01 deadlock: both safe to re-run
    if mentions_sqlstate(&error_msg, "40001") || mentions_sqlstate(&error_msg, "40P01") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Serialization failure");
        return DomainError::conflict(
            ConflictKind::OptimisticLock,
            "Concurrent update detected; please retry",
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("database is locked")
        || mentions_sqlstate(&error_msg, "57014")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or lock wait");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
