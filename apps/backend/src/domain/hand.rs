//! Hands, slots and the resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

/// A playable move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    pub const fn as_str(self) -> &'static str {
        match self {
            Hand::Rock => "rock",
            Hand::Paper => "paper",
            Hand::Scissors => "scissors",
        }
    }

    /// The hand this one defeats.
    pub const fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Scissors => Hand::Paper,
            Hand::Paper => Hand::Rock,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hand {
    type Err = DomainError;

    /// Only the exact lowercase tokens are accepted. The unplayed sentinel
    /// `"none"` is never valid player input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Hand::Rock),
            "paper" => Ok(Hand::Paper),
            "scissors" => Ok(Hand::Scissors),
            "none" => Err(DomainError::validation(
                ValidationKind::InvalidHand,
                "\"none\" marks an unplayed slot and cannot be submitted",
            )),
            other => Err(DomainError::validation(
                ValidationKind::InvalidHand,
                format!("Unknown hand '{other}' (expected rock, paper or scissors)"),
            )),
        }
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One participant's position in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    #[default]
    Unplayed,
    Played(Hand),
}

impl Slot {
    pub const UNPLAYED_TOKEN: &'static str = "none";

    pub fn hand(self) -> Option<Hand> {
        match self {
            Slot::Unplayed => None,
            Slot::Played(h) => Some(h),
        }
    }

    pub fn is_played(self) -> bool {
        matches!(self, Slot::Played(_))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Unplayed => Self::UNPLAYED_TOKEN,
            Slot::Played(h) => h.as_str(),
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Result of comparing two hands, from the first hand's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Draw,
    FirstWins,
    SecondWins,
}

impl Outcome {
    /// The same result seen from the other side.
    pub const fn inverse(self) -> Outcome {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::FirstWins => Outcome::SecondWins,
            Outcome::SecondWins => Outcome::FirstWins,
        }
    }
}

/// Rock beats scissors, scissors beats paper, paper beats rock.
pub fn resolve(first: Hand, second: Hand) -> Outcome {
    if first == second {
        Outcome::Draw
    } else if first.beats() == second {
        Outcome::FirstWins
    } else {
        Outcome::SecondWins
    }
}
