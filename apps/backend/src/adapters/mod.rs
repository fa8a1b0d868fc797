//! SeaORM adapters. Functions are generic over `ConnectionTrait` and return
//! `DbErr`; the repos layer maps to `DomainError`.

pub mod matches_sea;
pub mod participants_sea;
pub mod rounds_sea;

use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

/// Build the structured error raised when a `lock_version` compare-and-set
/// matched no row even though the row exists.
pub(crate) fn optimistic_lock_error(
    entity: &str,
    id: i64,
    expected: i32,
    actual: i32,
) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!(
        "{OPTIMISTIC_LOCK_PREFIX}{}",
        serde_json::json!({
            "entity": entity,
            "id": id,
            "expected": expected,
            "actual": actual,
        })
    ))
}
