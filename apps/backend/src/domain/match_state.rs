use serde::Serialize;

use super::hand::Outcome;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

pub const MAX_TOTAL_ROUNDS: i32 = 99;

/// A best-of-N contest between two participants.
///
/// `finished` holds exactly when `current_round > total_rounds`; both move
/// forward only through [`MatchState::apply_resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub id: i64,
    pub total_rounds: i32,
    pub current_round: i32,
    pub participant_one_id: i64,
    pub participant_two_id: i64,
    pub score_one: i32,
    pub score_two: i32,
    /// `None` until finished, and after a tied finish
    pub winner_id: Option<i64>,
    pub finished: bool,
}

/// Checks the arguments of a new match.
pub fn validate_match_setup(
    total_rounds: i32,
    participant_one_id: i64,
    participant_two_id: i64,
) -> Result<(), DomainError> {
    if !(1..=MAX_TOTAL_ROUNDS).contains(&total_rounds) {
        return Err(DomainError::validation(
            ValidationKind::InvalidTotalRounds,
            format!("total_rounds must be between 1 and {MAX_TOTAL_ROUNDS}, got {total_rounds}"),
        ));
    }
    if participant_one_id == participant_two_id {
        return Err(DomainError::validation(
            ValidationKind::SameParticipant,
            "A match needs two different participants",
        ));
    }
    Ok(())
}

impl MatchState {
    /// Sequence number for a new round, given how many rounds the match
    /// already has and whether the round for `current_round` is still open.
    pub fn next_round_no(
        &self,
        rounds_opened: u64,
        current_round_open: bool,
    ) -> Result<i32, DomainError> {
        if self.finished {
            return Err(DomainError::conflict(
                ConflictKind::MatchFinished,
                format!("Match {} is already finished", self.id),
            ));
        }
        if rounds_opened >= self.total_rounds as u64 || self.current_round > self.total_rounds {
            return Err(DomainError::conflict(
                ConflictKind::RoundLimitReached,
                format!(
                    "Match {} already has all {} rounds",
                    self.id, self.total_rounds
                ),
            ));
        }
        if current_round_open {
            return Err(DomainError::conflict(
                ConflictKind::RoundInProgress,
                format!(
                    "Round {} of match {} is still being played",
                    self.current_round, self.id
                ),
            ));
        }
        Ok(self.current_round)
    }

    /// Fold a resolved round into the match: score, counter and, after the
    /// last round, the finished flag and overall winner.
    pub fn apply_resolution(&mut self, outcome: Outcome) -> Result<(), DomainError> {
        if self.finished {
            return Err(DomainError::conflict(
                ConflictKind::MatchFinished,
                format!("Match {} is already finished", self.id),
            ));
        }

        match outcome {
            Outcome::Draw => {}
            Outcome::FirstWins => self.score_one += 1,
            Outcome::SecondWins => self.score_two += 1,
        }
        self.current_round += 1;

        if self.current_round > self.total_rounds {
            self.finished = true;
            self.winner_id = match self.score_one.cmp(&self.score_two) {
                std::cmp::Ordering::Greater => Some(self.participant_one_id),
                std::cmp::Ordering::Less => Some(self.participant_two_id),
                std::cmp::Ordering::Equal => None,
            };
        }
        Ok(())
    }

    pub fn resolved_rounds(&self) -> i32 {
        self.current_round - 1
    }
}
