// ═══════════════════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════════════════

use crate::companions::Companion;
use crate::types::Location;
use thiserror::Error;

/// Reasons a submitted move fails the validity contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("a companion must be chosen before any normal move")]
    CompanionChoicePending,
    #[error("no companion choice is pending")]
    NoCompanionChoice,
    #[error("the game is over")]
    GameOver,
    #[error("location {0} is not a legal target")]
    IllegalTarget(Location),
    #[error("location {0} is used more than once")]
    RepeatedLocation(Location),
    #[error("companion {0} is not available")]
    CompanionUnavailable(Companion),
    #[error("Jaqen cannot dismiss himself")]
    JaqenDismissesSelf,
    #[error("unknown companion {0:?}")]
    UnknownCompanion(String),
    #[error("{companion} takes {expected} arguments, got {got}")]
    Arity {
        companion: Companion,
        expected: usize,
        got: usize,
    },
    #[error("malformed move: {0}")]
    Malformed(String),
}

/// A board that violates the seeker/cell invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board has no seeker card")]
    MissingSeeker,
    #[error("board has more than one seeker card")]
    DuplicateSeeker,
    #[error("location {0} is outside the 6x6 board")]
    OutOfRange(i64),
    #[error("two cards occupy location {0}")]
    Occupied(Location),
    #[error("unknown house {0:?}")]
    UnknownHouse(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
}
