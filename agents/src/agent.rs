// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — interface that all AI agents must implement
//
//   Agents receive an `AgentView`: a snapshot of the board, both ledgers,
//   the remaining companions and whether a companion choice is pending.
//   They never see the authoritative game state, and every source of
//   randomness is handed in by the caller, so a choice is a pure
//   function of (view, rng seed). The harness relies on that to run an
//   agent on a worker thread and simply drop it when it times out.
// ═══════════════════════════════════════════════════════════════════════

use hotk_engine::engine::GameState;
use hotk_engine::moves::{legal_companion_targets, legal_normal_moves};
use hotk_engine::*;
use rand_chacha::ChaCha8Rng;

/// Everything an agent is told when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentView {
    pub board: Board,
    /// Side the agent plays.
    pub me: Side,
    pub player1: PlayerLedger,
    pub player2: PlayerLedger,
    pub companions: CompanionSet,
    pub companion_pending: bool,
    /// House captured by the most recent normal move.
    pub last_captured: Option<House>,
}

impl AgentView {
    /// View for the side to move.
    pub fn of(state: &GameState) -> Self {
        AgentView {
            board: state.board.clone(),
            me: state.to_move,
            player1: state.players[0].clone(),
            player2: state.players[1].clone(),
            companions: state.companions,
            companion_pending: state.companion_pending,
            last_captured: state.last_captured,
        }
    }

    /// Rebuild a private game state for search.
    pub fn to_state(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            players: [self.player1.clone(), self.player2.clone()],
            companions: self.companions,
            to_move: self.me,
            companion_pending: self.companion_pending,
            last_captured: self.last_captured,
        }
    }
}

/// Trait that all AI agents must implement.
pub trait Agent: Send + Sync {
    /// Human-readable name for this agent (e.g. "Minimax-deep", "Random").
    fn name(&self) -> &str;

    /// Pick a move for `view.me`: a normal move, or a companion move when
    /// `view.companion_pending` is set. `None` means the agent gives up
    /// its turn.
    fn choose(&self, view: &AgentView, rng: &mut ChaCha8Rng) -> Option<Move>;
}

/// First legal choice in enumeration order: the first normal move, or
/// the first available companion with its first legal arguments.
/// `None` once the game is over.
pub fn first_legal_move(view: &AgentView) -> Option<Move> {
    if !view.companion_pending {
        return legal_normal_moves(&view.board).first().map(|&l| Move::Normal(l));
    }
    view.companions.iter().find_map(|c| {
        let targets = legal_companion_targets(&view.board, c);
        let cm = match c {
            Companion::JonSnow => CompanionMove::JonSnow { target: *targets.first()? },
            Companion::Sandor => CompanionMove::Sandor { target: *targets.first()? },
            Companion::Gendry => CompanionMove::Gendry,
            Companion::Melisandre => CompanionMove::Melisandre,
            Companion::Ramsay => CompanionMove::Ramsay {
                first: *targets.first()?,
                second: *targets.get(1)?,
            },
            Companion::Jaqen => CompanionMove::Jaqen {
                first: *targets.first()?,
                second: *targets.get(1)?,
                dismiss: view.companions.without(Companion::Jaqen).iter().next()?,
            },
        };
        Some(Move::Companion(cm))
    })
}
