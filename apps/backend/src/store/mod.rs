//! Operation entry points for the request layer.
//!
//! Each call is one transactional unit against the database; implementations
//! re-read authoritative state and never cache rows across calls.

mod sea_store;

use async_trait::async_trait;

pub use sea_store::SeaStore;

use crate::domain::Hand;
use crate::error::AppError;
use crate::repos::matches::Match;
use crate::repos::participants::Participant;
use crate::repos::rounds::Round;
use crate::services::matches::MatchDetail;
use crate::services::Submission;

#[async_trait(?Send)]
pub trait Store {
    async fn create_match(
        &self,
        total_rounds: i32,
        participant_one_id: i64,
        participant_two_id: i64,
    ) -> Result<Match, AppError>;

    async fn get_match(&self, match_id: i64) -> Result<Match, AppError>;

    /// The match together with its rounds ordered by sequence number.
    async fn get_match_detail(&self, match_id: i64) -> Result<MatchDetail, AppError>;

    /// Open the next round of a match.
    async fn create_round(&self, match_id: i64) -> Result<Round, AppError>;

    async fn get_round(&self, round_id: i64) -> Result<Round, AppError>;

    /// Record a hand; resolves the round and updates the match when it is
    /// the second hand. All-or-nothing.
    async fn submit_hand(
        &self,
        round_id: i64,
        participant_id: i64,
        hand: Hand,
    ) -> Result<Submission, AppError>;

    async fn create_participant(&self, username: &str) -> Result<Participant, AppError>;

    async fn get_participant(&self, participant_id: i64) -> Result<Participant, AppError>;

    async fn list_participant_matches(&self, participant_id: i64)
        -> Result<Vec<Match>, AppError>;
}
