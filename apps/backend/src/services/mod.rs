//! Services bridge pure domain logic with persistence. All functions take
//! the caller's transaction.

pub mod matches;
pub mod participants;
pub mod round_engine;

pub use round_engine::{RoundEngine, Submission};
