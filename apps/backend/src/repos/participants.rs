//! Participant repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::participants_sea as participants_adapter;
use crate::entities::participants;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: i64,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

impl From<participants::Model> for Participant {
    fn from(model: participants::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Participant, DomainError> {
    let model = participants_adapter::create_participant(
        conn,
        participants_adapter::ParticipantCreate::new(username),
    )
    .await?;
    Ok(Participant::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Option<Participant>, DomainError> {
    let model = participants_adapter::find_by_id(conn, participant_id).await?;
    Ok(model.map(Participant::from))
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<Participant>, DomainError> {
    let model = participants_adapter::find_by_username(conn, username).await?;
    Ok(model.map(Participant::from))
}

pub async fn require_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
) -> Result<Participant, DomainError> {
    find_by_id(conn, participant_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Participant,
            format!("Participant {participant_id} not found"),
        )
    })
}
