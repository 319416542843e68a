// ═══════════════════════════════════════════════════════════════════════
// Game Engine — move application, companion effects, turn state machine
//
// Architecture:
//   The engine is a pure state machine. It never does I/O or calls agents.
//   `GameState::phase()` says what kind of decision is needed, the
//   harness asks the side to move, and feeds the answer back through
//   `apply_move()` (or `pass_turn()` when no answer arrived).
//
// Flow:
//   Normal ──(capture empties its house, companions left)──▶ CompanionChoice
//   CompanionChoice ──(effect applied)──▶ Normal, other side to move
//   CompanionChoice ──(Melisandre)──▶ Normal, same side to move
//   Normal with no legal moves ──▶ Over
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::companions::{Companion, CompanionSet};
use crate::error::MoveError;
use crate::ledger::{self, Captured, PlayerLedger};
use crate::moves::*;
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Normal,
    CompanionChoice,
    Over,
}

/// What applying a move did, for logging and the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mover: Side,
    /// House whose count changed (None for board-only companion effects).
    pub house: Option<House>,
    /// Cards moved to the mover's ledger.
    pub captured: usize,
    pub companion_choice: bool,
}

// ── Game State ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    /// Ledgers indexed by `Side::index()`.
    pub players: [PlayerLedger; 2],
    pub companions: CompanionSet,
    pub to_move: Side,
    /// The side to move must pick a companion effect.
    pub companion_pending: bool,
    /// House captured by the most recent normal move; used to break
    /// banner ties after companion effects that capture nothing.
    pub last_captured: Option<House>,
}

impl GameState {
    /// Fresh game on `board`: empty ledgers, every companion available,
    /// player one to move.
    pub fn new(board: Board) -> Self {
        GameState {
            board,
            players: [PlayerLedger::new(), PlayerLedger::new()],
            companions: CompanionSet::full(),
            to_move: Side::One,
            companion_pending: false,
            last_captured: None,
        }
    }

    pub fn ledger(&self, side: Side) -> &PlayerLedger {
        &self.players[side.index()]
    }

    pub fn legal_moves(&self) -> Vec<Location> {
        legal_normal_moves(&self.board)
    }

    pub fn phase(&self) -> Phase {
        if self.companion_pending && !self.companions.is_empty() {
            Phase::CompanionChoice
        } else if self.legal_moves().is_empty() {
            Phase::Over
        } else {
            Phase::Normal
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase() == Phase::Over
    }

    /// Winner by banners; `None` while the game is running or on a full tie.
    pub fn winner(&self) -> Option<Side> {
        if self.is_over() {
            ledger::winner(&self.players)
        } else {
            None
        }
    }
}

// ── Normal moves ───────────────────────────────────────────────────────

/// Move the seeker to `target`, capturing the target card and every card
/// of the same house strictly between the seeker and the target.
/// Returns the captured house and the number of cards captured.
///
/// `target` must hold a card aligned with the seeker.
pub fn apply_normal(board: &mut Board, ledger: &mut PlayerLedger, target: Location) -> (House, usize) {
    let seeker = board.seeker();
    let Some(target_id) = board.card_at(target) else {
        panic!("apply_normal: no card at {target}");
    };
    let house = board.info(target_id).house;

    let between: Vec<Location> = board
        .cards()
        .filter(|&(loc, id)| board.info(id).house == house && loc.is_strictly_between(seeker, target))
        .map(|(loc, _)| loc)
        .collect();

    for loc in &between {
        if let Some(id) = board.take(*loc) {
            ledger.add(house, Captured::Board(id));
        }
    }
    board.take(target);
    ledger.add(house, Captured::Board(target_id));
    board.move_seeker(target);

    (house, between.len() + 1)
}

// ── Companion moves ────────────────────────────────────────────────────

/// Apply a companion effect. The used companion (and Jaqen's dismissed
/// one) are removed from `companions`. Returns the house granted to the
/// mover, if any.
///
/// The move must already have passed `validate_move`.
pub fn apply_companion(
    board: &mut Board,
    companions: &mut CompanionSet,
    ledger: &mut PlayerLedger,
    mv: CompanionMove,
) -> Option<House> {
    *companions = companions.without(mv.companion());

    match mv {
        CompanionMove::JonSnow { target } => {
            let house = board.house_at(target)?;
            ledger.add(house, Captured::Granted(Companion::JonSnow));
            ledger.add(house, Captured::Granted(Companion::JonSnow));
            Some(house)
        }
        CompanionMove::Gendry => {
            ledger.add(House::Baratheon, Captured::Granted(Companion::Gendry));
            Some(House::Baratheon)
        }
        CompanionMove::Ramsay { first, second } => {
            board.swap(first, second);
            None
        }
        CompanionMove::Sandor { target } => {
            board.take(target);
            None
        }
        CompanionMove::Jaqen { first, second, dismiss } => {
            board.take(first);
            board.take(second);
            *companions = companions.without(dismiss);
            None
        }
        CompanionMove::Melisandre => None,
    }
}

/// Drop companions that can no longer be played on this board.
/// Removals are permanent.
pub fn prune_unusable_companions(board: &Board, companions: CompanionSet) -> CompanionSet {
    let cards = board.card_count();
    let mut set = companions;

    if set.contains(Companion::Ramsay) && cards < 2 {
        set = set.without(Companion::Ramsay);
    }
    if set.contains(Companion::Melisandre) && legal_normal_moves(board).is_empty() {
        set = set.without(Companion::Melisandre);
    }
    for c in set.iter() {
        if c.arity() + 1 > cards {
            set = set.without(c);
        }
    }
    if set.contains(Companion::Jaqen) && set.len() == 1 {
        set = set.without(Companion::Jaqen);
    }
    set
}

// ── Validation ─────────────────────────────────────────────────────────

/// Check a move against the current phase, registry and board.
pub fn validate_move(state: &GameState, mv: &Move) -> Result<(), MoveError> {
    match (state.phase(), mv) {
        (Phase::Over, _) => Err(MoveError::GameOver),
        (Phase::CompanionChoice, Move::Normal(_)) => Err(MoveError::CompanionChoicePending),
        (Phase::Normal, Move::Companion(_)) => Err(MoveError::NoCompanionChoice),
        (Phase::Normal, Move::Normal(loc)) => {
            if state.legal_moves().contains(loc) {
                Ok(())
            } else {
                Err(MoveError::IllegalTarget(*loc))
            }
        }
        (Phase::CompanionChoice, Move::Companion(cm)) => {
            validate_companion(&state.board, state.companions, cm)
        }
    }
}

/// Companion part of the validity contract: the effect is available,
/// Jaqen dismisses some other available companion, every location comes
/// from the effect's target set and none repeats.
pub fn validate_companion(board: &Board, companions: CompanionSet, cm: &CompanionMove) -> Result<(), MoveError> {
    let companion = cm.companion();
    if !companions.contains(companion) {
        return Err(MoveError::CompanionUnavailable(companion));
    }
    if let CompanionMove::Jaqen { dismiss, .. } = cm {
        if *dismiss == Companion::Jaqen {
            return Err(MoveError::JaqenDismissesSelf);
        }
        if !companions.contains(*dismiss) {
            return Err(MoveError::CompanionUnavailable(*dismiss));
        }
    }

    let targets = legal_companion_targets(board, companion);
    let mut seen: Vec<Location> = Vec::new();
    for loc in cm.locations() {
        if !targets.contains(&loc) {
            return Err(MoveError::IllegalTarget(loc));
        }
        if seen.contains(&loc) {
            return Err(MoveError::RepeatedLocation(loc));
        }
        seen.push(loc);
    }
    Ok(())
}

// ── Turn state machine ─────────────────────────────────────────────────

/// Validate and apply a move for the side to move, then advance the turn.
pub fn apply_move(state: &mut GameState, mv: Move) -> Result<MoveOutcome, MoveError> {
    validate_move(state, &mv)?;
    Ok(apply_unchecked(state, mv))
}

/// Apply a move already known to be valid. Used by search, which only
/// generates legal moves.
pub fn apply_unchecked(state: &mut GameState, mv: Move) -> MoveOutcome {
    let mover = state.to_move;
    match mv {
        Move::Normal(target) => {
            let (house, captured) = apply_normal(&mut state.board, &mut state.players[mover.index()], target);
            state.companions = prune_unusable_companions(&state.board, state.companions);
            ledger::assign_banners(&mut state.players, Some(house), mover);
            state.last_captured = Some(house);

            let companion_choice = state.board.house_count(house) == 0 && !state.companions.is_empty();
            state.companion_pending = companion_choice;
            if !companion_choice {
                state.to_move = mover.other();
            }
            MoveOutcome { mover, house: Some(house), captured, companion_choice }
        }
        Move::Companion(cm) => {
            let before = state.players[mover.index()].total_cards();
            let granted = apply_companion(
                &mut state.board,
                &mut state.companions,
                &mut state.players[mover.index()],
                cm,
            );
            state.companions = prune_unusable_companions(&state.board, state.companions);
            ledger::assign_banners(&mut state.players, granted.or(state.last_captured), mover);

            state.companion_pending = false;
            if cm.companion() != Companion::Melisandre {
                state.to_move = mover.other();
            }
            MoveOutcome {
                mover,
                house: granted,
                captured: state.players[mover.index()].total_cards() - before,
                companion_choice: false,
            }
        }
    }
}

/// The side to move gives up its turn (no move produced in time, or too
/// many rejected moves). A pending companion choice is forfeited.
pub fn pass_turn(state: &mut GameState) {
    state.companion_pending = false;
    state.to_move = state.to_move.other();
}
