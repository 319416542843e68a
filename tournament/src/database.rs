// ═══════════════════════════════════════════════════════════════════════
// Database — SQLite storage for game results, move logs and ELO ratings
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::{GameResult, MoveRecord};
use hotk_engine::Side;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

pub const DEFAULT_ELO: f64 = 1500.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub name: String,
    pub elo: f64,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn open(path: &str) -> rusqlite::Result<Self> {
        let db = Database { conn: Connection::open(path)? };
        db.create_schema()?;
        Ok(db)
    }

    /// In-memory database (useful for tests).
    pub fn in_memory() -> rusqlite::Result<Self> {
        let db = Database { conn: Connection::open_in_memory()? };
        db.create_schema()?;
        Ok(db)
    }

    fn create_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch("
            CREATE TABLE IF NOT EXISTS agents (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL UNIQUE,
                elo         REAL NOT NULL DEFAULT 1500.0,
                games       INTEGER NOT NULL DEFAULT 0,
                wins        INTEGER NOT NULL DEFAULT 0,
                draws       INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS games (
                id          INTEGER PRIMARY KEY,
                seed        INTEGER NOT NULL,
                plies       INTEGER NOT NULL,
                winner      INTEGER,
                moves       TEXT NOT NULL,
                played_at   TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS game_players (
                id          INTEGER PRIMARY KEY,
                game_id     INTEGER NOT NULL REFERENCES games(id),
                agent_id    INTEGER NOT NULL REFERENCES agents(id),
                side        INTEGER NOT NULL,
                banners     INTEGER NOT NULL,
                cards       INTEGER NOT NULL
            );
        ")
    }

    /// Register an agent (or return existing ID).
    pub fn register_agent(&self, name: &str) -> rusqlite::Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO agents (name) VALUES (?1)",
            params![name],
        )?;
        self.conn.query_row(
            "SELECT id FROM agents WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
    }

    /// Store a completed game and bump both agents' counters.
    /// Returns the game ID and the agent IDs, player 1 first.
    pub fn store_game(&self, result: &GameResult) -> rusqlite::Result<(i64, [i64; 2])> {
        let ids = [
            self.register_agent(&result.agents[0])?,
            self.register_agent(&result.agents[1])?,
        ];
        let moves = serde_json::to_string(&result.moves)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        self.conn.execute(
            "INSERT INTO games (seed, plies, winner, moves) VALUES (?1, ?2, ?3, ?4)",
            params![
                result.seed as i64,
                result.plies as i64,
                result.winner.map(|s| s.number()),
                moves,
            ],
        )?;
        let game_id = self.conn.last_insert_rowid();

        for side in Side::BOTH {
            let i = side.index();
            self.conn.execute(
                "INSERT INTO game_players (game_id, agent_id, side, banners, cards)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![game_id, ids[i], side.number(), result.banners[i], result.cards[i] as i64],
            )?;
            let won = result.winner == Some(side);
            let drawn = result.winner.is_none();
            self.conn.execute(
                "UPDATE agents SET games = games + 1, wins = wins + ?1, draws = draws + ?2 WHERE id = ?3",
                params![won as i64, drawn as i64, ids[i]],
            )?;
        }

        Ok((game_id, ids))
    }

    pub fn elo(&self, agent_id: i64) -> rusqlite::Result<f64> {
        let elo = self
            .conn
            .query_row("SELECT elo FROM agents WHERE id = ?1", params![agent_id], |row| row.get(0))
            .optional()?;
        Ok(elo.unwrap_or(DEFAULT_ELO))
    }

    /// Two-player ELO update. `score_a` is 1.0 for a win by `a`, 0.5 for
    /// a draw and 0.0 for a loss.
    pub fn update_elo(&self, a: i64, b: i64, score_a: f64, k: f64) -> rusqlite::Result<()> {
        let elo_a = self.elo(a)?;
        let elo_b = self.elo(b)?;

        let expected_a = 1.0 / (1.0 + 10f64.powf((elo_b - elo_a) / 400.0));
        let delta = k * (score_a - expected_a);

        self.conn.execute("UPDATE agents SET elo = elo + ?1 WHERE id = ?2", params![delta, a])?;
        self.conn.execute("UPDATE agents SET elo = elo - ?1 WHERE id = ?2", params![delta, b])?;
        Ok(())
    }

    /// Store a game and apply its ELO update in one go.
    pub fn record(&self, result: &GameResult, k: f64) -> rusqlite::Result<i64> {
        let (game_id, [p1, p2]) = self.store_game(result)?;
        let score = match result.winner {
            Some(Side::One) => 1.0,
            Some(Side::Two) => 0.0,
            None => 0.5,
        };
        if p1 != p2 {
            self.update_elo(p1, p2, score, k)?;
        }
        Ok(game_id)
    }

    /// Get ELO leaderboard.
    pub fn leaderboard(&self) -> rusqlite::Result<Vec<LeaderboardRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, elo, games, wins, draws FROM agents ORDER BY elo DESC"
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LeaderboardRow {
                name: row.get(0)?,
                elo: row.get(1)?,
                games: row.get(2)?,
                wins: row.get(3)?,
                draws: row.get(4)?,
            })
        })?;
        rows.collect()
    }

    /// Get total number of games stored.
    pub fn game_count(&self) -> rusqlite::Result<u32> {
        self.conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
    }

    /// Move log of a stored game.
    pub fn game_moves(&self, game_id: i64) -> rusqlite::Result<Vec<MoveRecord>> {
        let text: String = self.conn.query_row(
            "SELECT moves FROM games WHERE id = ?1",
            params![game_id],
            |row| row.get(0),
        )?;
        serde_json::from_str(&text).map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<Side>) -> GameResult {
        GameResult {
            seed: 7,
            agents: ["Minimax-deep".into(), "Random".into()],
            winner,
            plies: 2,
            banners: [4, 3],
            cards: [20, 15],
            moves: vec![
                MoveRecord { ply: 0, side: Side::One, mv: Some("12".into()) },
                MoveRecord { ply: 1, side: Side::Two, mv: None },
            ],
            final_state: None,
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let a = db.register_agent("Random").unwrap();
        assert_eq!(db.register_agent("Random").unwrap(), a);
        assert_ne!(db.register_agent("Minimax-deep").unwrap(), a);
    }

    #[test]
    fn test_record_updates_counts_and_elo() {
        let db = Database::in_memory().unwrap();
        let game = db.record(&result(Some(Side::One)), 32.0).unwrap();
        assert_eq!(db.game_count().unwrap(), 1);
        assert_eq!(db.game_moves(game).unwrap(), result(None).moves);

        let board = db.leaderboard().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Minimax-deep");
        assert_eq!((board[0].games, board[0].wins), (1, 1));
        assert!((board[0].elo - (DEFAULT_ELO + 16.0)).abs() < 1e-9);
        assert!((board[1].elo - (DEFAULT_ELO - 16.0)).abs() < 1e-9);
    }

    #[test]
    fn test_draw_between_equals_keeps_elo() {
        let db = Database::in_memory().unwrap();
        db.record(&result(None), 32.0).unwrap();
        for row in db.leaderboard().unwrap() {
            assert_eq!(row.draws, 1);
            assert_eq!(row.wins, 0);
            assert!((row.elo - DEFAULT_ELO).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_game_is_an_error() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(db.game_moves(99), Err(rusqlite::Error::QueryReturnedNoRows)));
    }
}
