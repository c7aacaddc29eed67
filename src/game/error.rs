use std::fmt;

use super::session::{SessionEvent, SessionState};

pub type Result<T> = std::result::Result<T, GameError>;

/// Precondition violations detected at construction or reset time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The grid dimensions cannot carry the requested cycle construction
    InvalidGrid {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },
    /// The seed snake is not a valid head-first run of the cycle
    InvalidInitialState(String),
    /// Food was requested but every cell is occupied by the snake
    BoardFull,
    /// A game state broke an invariant of the controller checking it
    Inconsistent(String),
    /// The session state machine has no edge for this event
    InvalidTransition {
        from: SessionState,
        event: SessionEvent,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidGrid { rows, cols, reason } => {
                write!(f, "invalid grid {rows}x{cols}: {reason}")
            }
            GameError::InvalidInitialState(reason) => {
                write!(f, "invalid initial snake: {reason}")
            }
            GameError::BoardFull => write!(f, "no free cell left for food"),
            GameError::Inconsistent(reason) => write!(f, "inconsistent game state: {reason}"),
            GameError::InvalidTransition { from, event } => {
                write!(f, "no transition from {from:?} on {event:?}")
            }
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GameError::InvalidGrid {
            rows: 3,
            cols: 3,
            reason: "both dimensions are odd",
        };
        assert_eq!(err.to_string(), "invalid grid 3x3: both dimensions are odd");
        assert_eq!(GameError::BoardFull.to_string(), "no free cell left for food");
        assert_eq!(
            GameError::Inconsistent("food on the snake".into()).to_string(),
            "inconsistent game state: food on the snake"
        );
    }
}
