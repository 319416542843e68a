// ═══════════════════════════════════════════════════════════════════════
// Random Agent — uniformly random legal moves.
// Serves as baseline and for testing game engine stability.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{Agent, AgentView};
use hotk_engine::moves::{legal_companion_targets, legal_normal_moves};
use hotk_engine::*;
use rand::seq::{IteratorRandom, SliceRandom};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent
    }

    fn companion_move(view: &AgentView, rng: &mut ChaCha8Rng) -> Option<CompanionMove> {
        let companion = view.companions.iter().choose(rng)?;
        let targets = legal_companion_targets(&view.board, companion);
        let cm = match companion {
            Companion::JonSnow => CompanionMove::JonSnow { target: *targets.choose(rng)? },
            Companion::Sandor => CompanionMove::Sandor { target: *targets.choose(rng)? },
            Companion::Gendry => CompanionMove::Gendry,
            Companion::Melisandre => CompanionMove::Melisandre,
            Companion::Ramsay => {
                let pair: Vec<Location> = targets.choose_multiple(rng, 2).copied().collect();
                CompanionMove::Ramsay { first: *pair.first()?, second: *pair.get(1)? }
            }
            Companion::Jaqen => {
                let pair: Vec<Location> = targets.choose_multiple(rng, 2).copied().collect();
                let dismiss = view.companions.without(Companion::Jaqen).iter().choose(rng)?;
                CompanionMove::Jaqen { first: *pair.first()?, second: *pair.get(1)?, dismiss }
            }
        };
        Some(cm)
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose(&self, view: &AgentView, rng: &mut ChaCha8Rng) -> Option<Move> {
        if view.companion_pending {
            Self::companion_move(view, rng).map(Move::Companion)
        } else {
            legal_normal_moves(&view.board).choose(rng).map(|&l| Move::Normal(l))
        }
    }
}
