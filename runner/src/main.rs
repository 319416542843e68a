// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for games, tournaments and board files
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use hotk_agents::{Agent, MinimaxAgent, RandomAgent, SearchConfig};
use hotk_engine::cards::{companion_meta, granted_card_name};
use hotk_engine::engine::GameState;
use hotk_engine::setup::create_board;
use hotk_engine::snapshot::{load_board, save_board};
use hotk_engine::*;
use hotk_tournament::{run_game, run_tournament, Database, GameResult, MatchConfig, RunError};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ELO_K: f64 = 32.0;

#[derive(Parser)]
#[command(name = "hotk-runner", about = "Hand of the King: headless games and tournaments")]
struct Cli {
    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Players {
    /// Player 1: "random", "shallow", "deep" or a search config JSON file
    #[arg(long, default_value = "deep")]
    p1: String,
    /// Player 2: same choices as player 1
    #[arg(long, default_value = "random")]
    p2: String,
    /// Per-move timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game and print the outcome
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[command(flatten)]
        players: Players,
        /// Start from a saved board instead of a shuffled one
        #[arg(long)]
        load: Option<String>,
        /// Save the starting board
        #[arg(long)]
        save: Option<String>,
        /// Store the result in this database
        #[arg(long)]
        db: Option<String>,
    },
    /// Run a tournament of N games between two agents
    Tournament {
        #[arg(short, long, default_value_t = 20)]
        games: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[command(flatten)]
        players: Players,
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
    /// Show leaderboard from database
    Leaderboard {
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
    /// Print a board, shuffled from a seed or loaded from a file
    Board {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        load: Option<String>,
        #[arg(long)]
        save: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Play { seed, players, load, save, db } => {
            cmd_play(seed, &players, load.as_deref(), save.as_deref(), db.as_deref())
        }
        Commands::Tournament { games, seed, players, db } => cmd_tournament(games, seed, &players, &db),
        Commands::Leaderboard { db } => cmd_leaderboard(&db),
        Commands::Board { seed, load, save } => cmd_board(seed, load.as_deref(), save.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

// ── Commands ───────────────────────────────────────────────────────────

fn cmd_play(seed: u64, players: &Players, load: Option<&str>, save: Option<&str>, db: Option<&str>) -> Result<(), RunError> {
    let board = match load {
        Some(path) => load_board(path)?,
        None => create_board(seed),
    };
    if let Some(path) = save {
        save_board(&board, path)?;
    }

    let agents = make_agents(players)?;
    println!("=== Hand of the King ===\n");
    println!("Seed {seed}: {} vs {}\n", agents[0].name(), agents[1].name());
    print_board(&board);

    let config = MatchConfig { seed, move_timeout_ms: players.timeout_ms, ..MatchConfig::default() };
    let result = run_game(&agents, board, &config)?;
    print_result(&result);

    if let Some(path) = db {
        let db = Database::open(path)?;
        db.record(&result, ELO_K)?;
        println!("\nResult saved to: {path}");
    }
    Ok(())
}

fn cmd_tournament(games: u32, seed: u64, players: &Players, db_path: &str) -> Result<(), RunError> {
    let agents = make_agents(players)?;
    println!("=== Tournament: {games} games, {} vs {} ===\n", agents[0].name(), agents[1].name());

    let db = Database::open(db_path)?;
    let config = MatchConfig { seed, move_timeout_ms: players.timeout_ms, ..MatchConfig::default() };

    let mut wins = [0u32; 2];
    let mut draws = 0u32;
    let mut errors = 0u32;
    for (g, result) in run_tournament(&agents, games, &config).into_iter().enumerate() {
        match result {
            Ok(result) => {
                match result.winner_name() {
                    Some(name) if name == agents[0].name() => wins[0] += 1,
                    Some(_) => wins[1] += 1,
                    None => draws += 1,
                }
                db.record(&result, ELO_K)?;
            }
            Err(e) => {
                errors += 1;
                eprintln!("Game {}: ERROR -- {e}", g + 1);
            }
        }
    }

    info!(games, errors, draws, "tournament finished");
    println!("--- Summary ({games} games, {errors} errors) ---");
    for (agent, w) in agents.iter().zip(wins) {
        let pct = if games > 0 { f64::from(w) / f64::from(games) * 100.0 } else { 0.0 };
        println!("  {:20}: {:>4} wins ({:.1}%)", agent.name(), w, pct);
    }
    println!("  {:20}: {:>4}", "Draws", draws);
    println!("\nResults saved to: {db_path}");
    println!("Total games in DB: {}", db.game_count()?);
    Ok(())
}

fn cmd_leaderboard(db_path: &str) -> Result<(), RunError> {
    let db = Database::open(db_path)?;
    let rows = db.leaderboard()?;
    if rows.is_empty() {
        println!("No agents found. Run some tournaments first.");
        return Ok(());
    }
    println!("=== Leaderboard ===\n");
    println!("{:<20} {:>8} {:>8} {:>8} {:>8}", "Agent", "ELO", "Games", "Wins", "Draws");
    println!("{}", "-".repeat(56));
    for row in &rows {
        println!("{:<20} {:>8.1} {:>8} {:>8} {:>8}", row.name, row.elo, row.games, row.wins, row.draws);
    }
    Ok(())
}

fn cmd_board(seed: u64, load: Option<&str>, save: Option<&str>) -> Result<(), RunError> {
    let board = match load {
        Some(path) => load_board(path)?,
        None => create_board(seed),
    };
    print_board(&board);
    if let Some(path) = save {
        save_board(&board, path)?;
        println!("\nBoard saved to: {path}");
    }
    Ok(())
}

// ── Agents ─────────────────────────────────────────────────────────────

fn make_agents(players: &Players) -> Result<[Arc<dyn Agent>; 2], RunError> {
    Ok([make_agent(&players.p1)?, make_agent(&players.p2)?])
}

fn make_agent(kind: &str) -> Result<Arc<dyn Agent>, RunError> {
    let agent: Arc<dyn Agent> = match kind {
        "random" => Arc::new(RandomAgent::new()),
        "shallow" => Arc::new(MinimaxAgent::shallow()),
        "deep" => Arc::new(MinimaxAgent::deep()),
        path => {
            let config = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|json| SearchConfig::from_json(&json).map_err(|e| e.to_string()))
                .map_err(|reason| RunError::AgentConfig { path: path.to_string(), reason })?;
            Arc::new(MinimaxAgent::new(format!("Minimax({path})"), config))
        }
    };
    Ok(agent)
}

// ── Output ─────────────────────────────────────────────────────────────

fn print_board(board: &Board) {
    for row in 0..BOARD_SIDE {
        let cells: Vec<String> = (0..BOARD_SIDE)
            .map(|col| {
                let loc = Location(row * BOARD_SIDE + col);
                if loc == board.seeker() {
                    format!("{:<10}", "*Varys*")
                } else {
                    match board.house_at(loc) {
                        Some(house) => format!("{:<10}", house.as_str()),
                        None => format!("{:<10}", "."),
                    }
                }
            })
            .collect();
        // Companions sit in two columns to the right of the grid.
        let side: Vec<&str> = Companion::ALL
            .iter()
            .map(|&c| companion_meta(c))
            .filter(|m| m.row == row)
            .map(|m| m.companion.wire_name())
            .collect();
        println!("{} {}", cells.join(""), side.join("  "));
    }
}

fn print_result(result: &GameResult) {
    println!("\nGame finished after {} plies", result.plies);
    match result.winner_name() {
        Some(name) => println!("  Winner: {name}"),
        None => println!("  Winner: none (full tie)"),
    }
    let Some(state) = &result.final_state else { return };
    for side in Side::BOTH {
        print_ledger(state, side, &result.agents[side.index()]);
    }
}

fn print_ledger(state: &GameState, side: Side, agent: &str) {
    let ledger = state.ledger(side);
    println!("\n  {side} ({agent}): {} banners, {} cards", ledger.banner_count(), ledger.total_cards());
    for house in House::ALL {
        let names: Vec<&str> = ledger
            .captured(house)
            .iter()
            .map(|c| match c {
                Captured::Board(id) => state.board.info(*id).name.as_str(),
                Captured::Granted(companion) => granted_card_name(*companion),
            })
            .collect();
        if names.is_empty() {
            continue;
        }
        let banner = if ledger.has_banner(house) { "[B]" } else { "   " };
        println!("    {banner} {:10} {}", house.as_str(), names.join(", "));
    }
}
