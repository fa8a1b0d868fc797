//! Domain layer: pure match/round logic, no I/O.

pub mod hand;
pub mod match_state;
pub mod round_state;

#[cfg(test)]
mod tests_props;

// Re-exports for ergonomics
pub use hand::{resolve, Hand, Outcome, Slot};
pub use match_state::{validate_match_setup, MatchState, MAX_TOTAL_ROUNDS};
pub use round_state::{RoundState, Seat};
