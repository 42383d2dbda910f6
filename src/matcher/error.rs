use std::fmt;

use thiserror::Error;

use super::cost::TCost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// `index` is the second occurrence of a key already seen on that side.
    #[error("duplicate key in list {side} at index {index}")]
    DuplicateKey { side: Side, index: usize },

    #[error("cost function returned {cost}, costs must be finite and non-negative")]
    InvalidCost { cost: TCost },
}
