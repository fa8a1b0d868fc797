//! Participant service.

use sea_orm::DatabaseTransaction;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::logging::pii::mask_username;
use crate::repos::matches::{self, Match};
use crate::repos::participants::{self, Participant};

pub const MAX_USERNAME_CHARS: usize = 64;

/// Trim, NFC-normalize and validate a username.
pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.trim().nfc().collect();
    let len = normalized.chars().count();

    if len == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            "Username must not be empty",
        ));
    }
    if len > MAX_USERNAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!("Username must be at most {MAX_USERNAME_CHARS} characters"),
        ));
    }
    if normalized.chars().any(char::is_control) {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            "Username must not contain control characters",
        ));
    }
    Ok(normalized)
}

pub async fn create_participant(
    txn: &DatabaseTransaction,
    raw_username: &str,
) -> Result<Participant, AppError> {
    let username = normalize_username(raw_username)?;

    // The unique index is authoritative; this only gives a clean error on the common path.
    if participants::find_by_username(txn, &username).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueUsername,
            "Username already taken",
        )
        .into());
    }

    let participant = participants::create_participant(txn, &username).await?;
    info!(
        participant_id = participant.id,
        username = %mask_username(&participant.username),
        "Participant created"
    );
    Ok(participant)
}

pub async fn get_participant(
    txn: &DatabaseTransaction,
    participant_id: i64,
) -> Result<Participant, AppError> {
    Ok(participants::require_participant(txn, participant_id).await?)
}

/// Every match the participant plays in, newest first.
pub async fn list_participant_matches(
    txn: &DatabaseTransaction,
    participant_id: i64,
) -> Result<Vec<Match>, AppError> {
    participants::require_participant(txn, participant_id).await?;
    Ok(matches::list_for_participant(txn, participant_id).await?)
}
