pub mod matches;
pub mod participants;
pub mod rounds;

pub use rounds::DbHand;
