//! DTOs for rounds_sea adapter.

use time::OffsetDateTime;

use crate::entities::DbHand;

/// DTO for opening a round. Participants are copied from the match.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub match_id: i64,
    pub round_no: i32,
    pub participant_one_id: i64,
    pub participant_two_id: i64,
}

/// Full hand/result state written after a submission.
///
/// `expected_version` must equal the row's current `lock_version`.
#[derive(Debug, Clone)]
pub struct RoundHandsUpdate {
    pub id: i64,
    pub hand_one: DbHand,
    pub hand_two: DbHand,
    pub winner_id: Option<i64>,
    pub finished: bool,
    pub resolved_at: Option<OffsetDateTime>,
    pub expected_version: i32,
}
