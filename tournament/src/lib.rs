pub mod runner;
pub mod database;

pub use database::{Database, LeaderboardRow};
pub use runner::{run_game, run_tournament, GameResult, MatchConfig, MoveRecord, RunError};
