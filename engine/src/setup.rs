// ═══════════════════════════════════════════════════════════════════════
// Game setup — deals the 36 cards onto the board
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::cards;
use crate::engine::GameState;
use crate::types::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shuffle the full roster plus the seeker onto the grid. Same seed,
/// same board.
pub fn create_board(seed: u64) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cells: Vec<Location> = Location::all().collect();
    cells.shuffle(&mut rng);

    let seeker = cells[0];
    let placed = cells[1..]
        .iter()
        .zip(cards::full_roster())
        .map(|(&loc, (house, name))| (loc, house, name.to_string()));

    match Board::build(seeker, placed) {
        Ok(board) => board,
        // Every cell is distinct by construction.
        Err(e) => unreachable!("shuffled layout rejected: {e}"),
    }
}

/// New game on a freshly shuffled board.
pub fn create_initial_state(seed: u64) -> GameState {
    GameState::new(create_board(seed))
}
