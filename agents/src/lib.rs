pub mod agent;
pub mod config;
pub mod eval;
pub mod search;
pub mod minimax;
pub mod random;

#[cfg(test)]
mod tests;

pub use agent::{first_legal_move, Agent, AgentView};
pub use config::{SearchConfig, Weights};
pub use eval::evaluate;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::{SearchStats, Searcher};
