// ═══════════════════════════════════════════════════════════════════════
// Minimax Agent — alpha-beta search with configurable depth and weights
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{first_legal_move, Agent, AgentView};
use crate::config::SearchConfig;
use crate::search::Searcher;
use hotk_engine::Move;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::debug;

pub struct MinimaxAgent {
    name: String,
    config: SearchConfig,
}

impl MinimaxAgent {
    pub fn new(name: impl Into<String>, config: SearchConfig) -> Self {
        MinimaxAgent { name: name.into(), config }
    }

    /// Depth 2 with flat weights.
    pub fn shallow() -> Self {
        Self::new("Minimax-shallow", SearchConfig::shallow())
    }

    /// Depth 7 (companion depth 4) with tuned weights.
    pub fn deep() -> Self {
        Self::new("Minimax-deep", SearchConfig::deep())
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&self, view: &AgentView, rng: &mut ChaCha8Rng) -> Option<Move> {
        let state = view.to_state();
        let started = Instant::now();
        let mut searcher = Searcher::new(view.me, &self.config, rng);

        let (value, best) = if view.companion_pending {
            let (v, cm) = searcher.minimax_companion(&state, i32::MIN, i32::MAX, self.config.companion_depth);
            (v, cm.map(Move::Companion))
        } else {
            let (v, loc) = searcher.minimax(&state, i32::MIN, i32::MAX, self.config.normal_depth);
            (v, loc.map(Move::Normal))
        };

        let stats = searcher.stats();
        debug!(
            agent = %self.name,
            side = %view.me,
            value,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            timed_out = stats.timed_out,
            elapsed_ms = started.elapsed().as_millis() as u64,
            best = ?best,
            "search finished"
        );

        best.or_else(|| first_legal_move(view))
    }
}
