// ═══════════════════════════════════════════════════════════════════════
// Game Runner — runs a complete headless game between two agents
//
// Every move request runs on its own worker thread under a wall-clock
// timeout. A request that times out, panics or returns no move passes
// the turn. A rejected move is re-requested up to `invalid_retries`
// times before the turn is forfeited.
// ═══════════════════════════════════════════════════════════════════════

use hotk_agents::{Agent, AgentView};
use hotk_engine::engine::{apply_move, pass_turn, GameState};
use hotk_engine::error::SnapshotError;
use hotk_engine::setup::create_board;
use hotk_engine::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("game exceeded {0} plies without finishing")]
    PlyLimit(usize),
    #[error("database: {0}")]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("agent config {path}: {reason}")]
    AgentConfig { path: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Wall-clock limit per move request.
    pub move_timeout_ms: u64,
    /// Extra requests after a rejected move before the turn is forfeited.
    pub invalid_retries: u32,
    /// Safety cap on turns, passes included.
    pub max_plies: usize,
    /// Seeds the per-request agent RNGs.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            move_timeout_ms: 10_000,
            invalid_retries: 2,
            max_plies: 500,
            seed: 42,
        }
    }
}

/// One turn of the move log. `mv` is `None` when the turn was passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub ply: usize,
    pub side: Side,
    pub mv: Option<String>,
}

/// Result of a completed game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: u64,
    /// Agent names, player 1 first.
    pub agents: [String; 2],
    pub winner: Option<Side>,
    pub plies: usize,
    pub banners: [u8; 2],
    pub cards: [usize; 2],
    pub moves: Vec<MoveRecord>,
    #[serde(skip)]
    pub final_state: Option<GameState>,
}

impl GameResult {
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|s| self.agents[s.index()].as_str())
    }
}

/// Run a complete game on `board`. `agents[0]` plays first.
pub fn run_game(agents: &[Arc<dyn Agent>; 2], board: Board, config: &MatchConfig) -> Result<GameResult, RunError> {
    let mut state = GameState::new(board);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let timeout = Duration::from_millis(config.move_timeout_ms);
    let mut moves = Vec::new();

    info!(p1 = agents[0].name(), p2 = agents[1].name(), seed = config.seed, "game started");

    while !state.is_over() {
        let ply = moves.len();
        if ply >= config.max_plies {
            return Err(RunError::PlyLimit(config.max_plies));
        }
        let side = state.to_move;
        let agent = &agents[side.index()];

        let mut played = None;
        for attempt in 0..=config.invalid_retries {
            let Some(mv) = request_move(agent, AgentView::of(&state), rng.gen(), timeout) else {
                break;
            };
            match apply_move(&mut state, mv) {
                Ok(outcome) => {
                    debug!(ply, %side, mv = %mv, captured = outcome.captured, companion_choice = outcome.companion_choice, "move applied");
                    played = Some(mv);
                    break;
                }
                Err(e) => warn!(ply, %side, agent = agent.name(), attempt, mv = %mv, error = %e, "move rejected"),
            }
        }

        if played.is_none() {
            warn!(ply, %side, agent = agent.name(), "turn passed");
            pass_turn(&mut state);
        }
        moves.push(MoveRecord { ply, side, mv: played.map(|m| m.to_string()) });
    }

    let winner = state.winner();
    let result = GameResult {
        seed: config.seed,
        agents: [agents[0].name().to_string(), agents[1].name().to_string()],
        winner,
        plies: moves.len(),
        banners: Side::BOTH.map(|s| state.ledger(s).banner_count()),
        cards: Side::BOTH.map(|s| state.ledger(s).total_cards()),
        moves,
        final_state: Some(state),
    };
    info!(winner = ?result.winner_name(), plies = result.plies, banners = ?result.banners, "game finished");
    Ok(result)
}

/// Ask `agent` for a move on a worker thread. `None` on timeout, panic
/// or when the agent declines to move.
fn request_move(agent: &Arc<dyn Agent>, view: AgentView, seed: u64, timeout: Duration) -> Option<Move> {
    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(agent);
    thread::spawn(move || {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        // The receiver is gone if the request already timed out.
        let _ = tx.send(worker.choose(&view, &mut rng));
    });

    match rx.recv_timeout(timeout) {
        Ok(mv) => mv,
        Err(RecvTimeoutError::Timeout) => {
            warn!(agent = agent.name(), timeout_ms = timeout.as_millis() as u64, "agent timed out");
            None
        }
        Err(RecvTimeoutError::Disconnected) => {
            warn!(agent = agent.name(), "agent failed without a move");
            None
        }
    }
}

/// Play `games` games in parallel on fresh boards. Game `g` uses seed
/// `config.seed + g * 1000`; sides alternate so each agent opens half
/// of the games.
pub fn run_tournament(
    agents: &[Arc<dyn Agent>; 2],
    games: u32,
    config: &MatchConfig,
) -> Vec<Result<GameResult, RunError>> {
    (0..games)
        .into_par_iter()
        .map(|g| {
            let seed = config.seed.wrapping_add(u64::from(g) * 1000);
            let seating = if g % 2 == 0 {
                [Arc::clone(&agents[0]), Arc::clone(&agents[1])]
            } else {
                [Arc::clone(&agents[1]), Arc::clone(&agents[0])]
            };
            let game_config = MatchConfig { seed, ..config.clone() };
            let result = run_game(&seating, create_board(seed), &game_config);
            if let Err(e) = &result {
                warn!(game = g, seed, error = %e, "game aborted");
            }
            result
        })
        .collect()
}
