pub mod types;
pub mod cards;
pub mod companions;
pub mod board;
pub mod ledger;
pub mod moves;
pub mod engine;
pub mod setup;
pub mod snapshot;
pub mod error;


pub use types::*;
pub use board::{Board, CardId, CardInfo};
pub use companions::{Companion, CompanionSet};
pub use ledger::{Captured, PlayerLedger};
pub use moves::{CompanionMove, Move, WireArg};
pub use engine::{GameState, MoveOutcome, Phase};
pub use error::{BoardError, MoveError, SnapshotError};
