//! DTOs for matches_sea adapter.

/// DTO for creating a new match. Inputs are validated by the caller.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub total_rounds: i32,
    pub participant_one_id: i64,
    pub participant_two_id: i64,
}

impl MatchCreate {
    pub fn new(total_rounds: i32, participant_one_id: i64, participant_two_id: i64) -> Self {
        Self {
            total_rounds,
            participant_one_id,
            participant_two_id,
        }
    }
}

/// Progress written when a round resolves.
///
/// `expected_version` must equal the row's current `lock_version`.
#[derive(Debug, Clone)]
pub struct MatchProgressUpdate {
    pub id: i64,
    pub current_round: i32,
    pub score_one: i32,
    pub score_two: i32,
    pub winner_id: Option<i64>,
    pub finished: bool,
    pub expected_version: i32,
}
