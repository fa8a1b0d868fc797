//! Repository functions: adapter calls mapped into domain types and errors.

pub mod matches;
pub mod participants;
pub mod rounds;
