//! Round engine: opens rounds and records hands against persisted state.
//!
//! Every mutation runs inside the caller's transaction and re-reads the
//! authoritative rows first. Row locks are always taken match-then-round so
//! concurrent submissions and round openings cannot deadlock, and every
//! write is a `lock_version` compare-and-set.

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::Hand;
use crate::error::AppError;
use crate::repos::matches::{self, Match};
use crate::repos::rounds::{self, Round};

/// Result of a hand submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    #[serde(flatten)]
    pub round: Round,
    /// Present when this submission resolved the round
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub updated_match: Option<Match>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoundEngine;

impl RoundEngine {
    pub fn new() -> Self {
        Self
    }

    /// Open the next round of `match_id`, seated with the match's participants.
    ///
    /// Does not mutate the match.
    pub async fn open_round(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
    ) -> Result<Round, AppError> {
        let m = matches::lock_match(txn, match_id).await?;

        let rounds_opened = rounds::count_by_match(txn, match_id).await?;
        let current_round_open =
            rounds::find_by_match_and_round_no(txn, match_id, m.state.current_round)
                .await?
                .is_some_and(|r| !r.state.finished);

        let round_no = m.state.next_round_no(rounds_opened, current_round_open)?;

        let round = rounds::create_round(
            txn,
            match_id,
            round_no,
            m.state.participant_one_id,
            m.state.participant_two_id,
        )
        .await?;

        info!(match_id, round_id = round.state.id, round_no, "Round opened");
        Ok(round)
    }

    /// Record `hand` for `participant_id` and, if it completes the round,
    /// resolve it and fold the result into the match.
    ///
    /// Either everything is written or, on error, nothing is.
    pub async fn submit_hand(
        &self,
        txn: &DatabaseTransaction,
        round_id: i64,
        participant_id: i64,
        hand: Hand,
    ) -> Result<Submission, AppError> {
        debug!(round_id, participant_id, %hand, "Submitting hand");

        // Unlocked read only to learn the owning match; the locked re-read
        // below is what decisions are made on.
        let match_id = rounds::require_round(txn, round_id).await?.state.match_id;

        let mut m = matches::lock_match(txn, match_id).await?;
        let locked = rounds::lock_round(txn, round_id).await?;

        let mut state = locked.state.clone();
        let outcome = state.record_hand(participant_id, hand)?;

        let round = rounds::save_hands(txn, &state, locked.lock_version).await?;

        let Some(outcome) = outcome else {
            debug!(round_id, participant_id, "Hand recorded; waiting for opponent");
            return Ok(Submission {
                round,
                updated_match: None,
            });
        };

        m.state.apply_resolution(outcome)?;
        let updated = matches::save_progress(txn, &m.state, m.lock_version).await?;

        info!(
            match_id,
            round_id,
            round_no = round.state.round_no,
            outcome = ?outcome,
            winner_id = ?round.state.winner_id,
            score_one = updated.state.score_one,
            score_two = updated.state.score_two,
            match_finished = updated.state.finished,
            "Round resolved"
        );

        Ok(Submission {
            round,
            updated_match: Some(updated),
        })
    }
}
