use serde::Serialize;

use super::hand::{resolve, Hand, Outcome, Slot};
use crate::errors::domain::{ConflictKind, DomainError};

/// Which of the two round positions a participant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    One,
    Two,
}

/// One rock-paper-scissors exchange inside a match.
///
/// `finished` flips to true exactly once, in the same call that fills the
/// second slot, and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    pub id: i64,
    pub match_id: i64,
    /// Matches the owning match's `current_round` when the round was opened
    pub round_no: i32,
    pub participant_one_id: i64,
    pub participant_two_id: i64,
    pub hand_one: Slot,
    pub hand_two: Slot,
    /// `None` while open and after a draw
    pub winner_id: Option<i64>,
    pub finished: bool,
}

impl RoundState {
    pub fn seat_of(&self, participant_id: i64) -> Option<Seat> {
        if participant_id == self.participant_one_id {
            Some(Seat::One)
        } else if participant_id == self.participant_two_id {
            Some(Seat::Two)
        } else {
            None
        }
    }

    pub fn slot(&self, seat: Seat) -> Slot {
        match seat {
            Seat::One => self.hand_one,
            Seat::Two => self.hand_two,
        }
    }

    /// Record `hand` for `participant_id` and resolve if both slots are filled.
    ///
    /// Returns the outcome when this call resolved the round. On error the
    /// state is left untouched.
    pub fn record_hand(
        &mut self,
        participant_id: i64,
        hand: Hand,
    ) -> Result<Option<Outcome>, DomainError> {
        if self.finished {
            return Err(DomainError::conflict(
                ConflictKind::RoundAlreadyFinished,
                format!("Round {} is already finished", self.id),
            ));
        }

        let seat = self.seat_of(participant_id).ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::UnknownParticipant,
                format!(
                    "Participant {participant_id} is not assigned to round {}",
                    self.id
                ),
            )
        })?;

        if self.slot(seat).is_played() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyPlayed,
                format!(
                    "Participant {participant_id} already played in round {}",
                    self.id
                ),
            ));
        }

        match seat {
            Seat::One => self.hand_one = Slot::Played(hand),
            Seat::Two => self.hand_two = Slot::Played(hand),
        }

        let (Slot::Played(first), Slot::Played(second)) = (self.hand_one, self.hand_two) else {
            return Ok(None);
        };

        let outcome = resolve(first, second);
        self.winner_id = match outcome {
            Outcome::Draw => None,
            Outcome::FirstWins => Some(self.participant_one_id),
            Outcome::SecondWins => Some(self.participant_two_id),
        };
        self.finished = true;
        Ok(Some(outcome))
    }
}
