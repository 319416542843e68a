// ═══════════════════════════════════════════════════════════════════════
// Minimax with alpha-beta pruning
//
// Two sibling searches:
//   minimax            : normal moves. A branch that opens a companion
//                        choice is a leaf here; companion branching is
//                        never expanded inside the normal search.
//   minimax_companion  : only while a companion choice is pending.
//                        Enumerates every available effect and its
//                        arguments, then continues with `minimax`.
//
// Every branch works on its own clone of the state. The maximizing side
// is always `me`; whether a node maximizes is read from `to_move`, so
// Melisandre's extra turn needs no special casing.
//
// The deadline is checked on entry to each call only. A search that runs
// out of time returns static evaluations from then on.
// ═══════════════════════════════════════════════════════════════════════

use crate::config::SearchConfig;
use crate::eval::evaluate;
use hotk_engine::engine::{apply_unchecked, GameState};
use hotk_engine::moves::{legal_companion_targets, legal_normal_moves};
use hotk_engine::*;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub timed_out: bool,
}

pub struct Searcher<'a> {
    me: Side,
    config: &'a SearchConfig,
    deadline: Instant,
    /// Picks the companion Jaqen dismisses in each branch.
    rng: &'a mut ChaCha8Rng,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Searcher for `me` whose deadline is the configured budget from now.
    pub fn new(me: Side, config: &'a SearchConfig, rng: &'a mut ChaCha8Rng) -> Self {
        let deadline = Instant::now() + config.time_budget();
        Self::with_deadline(me, config, rng, deadline)
    }

    pub fn with_deadline(me: Side, config: &'a SearchConfig, rng: &'a mut ChaCha8Rng, deadline: Instant) -> Self {
        Searcher {
            me,
            config,
            deadline,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn out_of_time(&mut self) -> bool {
        if Instant::now() > self.deadline {
            self.stats.timed_out = true;
        }
        self.stats.timed_out
    }

    fn evaluate(&self, state: &GameState) -> i32 {
        evaluate(state, self.me, &self.config.weights)
    }

    // ── Normal moves ───────────────────────────────────────────────────

    /// Best value and normal move for the side to move. Leaves (deadline,
    /// no legal move, depth exhausted, companion choice pending) return
    /// the static evaluation and no move. Ties keep the first move in
    /// location order.
    pub fn minimax(&mut self, state: &GameState, mut alpha: i32, mut beta: i32, depth: u32) -> (i32, Option<Location>) {
        self.stats.nodes += 1;
        let moves = legal_normal_moves(&state.board);
        if self.out_of_time() || moves.is_empty() || depth == 0 || state.companion_pending {
            return (self.evaluate(state), None);
        }

        let maximizing = state.to_move == self.me;
        let mut best_val = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for loc in moves {
            let mut child = state.clone();
            apply_unchecked(&mut child, Move::Normal(loc));
            let (val, _) = self.minimax(&child, alpha, beta, depth - 1);

            if maximizing {
                if val > best_val {
                    best_val = val;
                    best_move = Some(loc);
                }
                alpha = alpha.max(best_val);
            } else {
                if val < best_val {
                    best_val = val;
                    best_move = Some(loc);
                }
                beta = beta.min(best_val);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        (best_val, best_move)
    }

    // ── Companion choice ───────────────────────────────────────────────

    /// Best value and companion move for the side to move.
    ///
    /// Jaqen branches are scored by recursing for the maximizer and by
    /// static evaluation for the minimizer.
    pub fn minimax_companion(
        &mut self,
        state: &GameState,
        mut alpha: i32,
        mut beta: i32,
        depth: u32,
    ) -> (i32, Option<CompanionMove>) {
        self.stats.nodes += 1;
        if self.out_of_time() || state.companions.is_empty() || depth == 0 {
            return (self.evaluate(state), None);
        }
        let branches = self.companion_branches(state);
        if branches.is_empty() {
            return (self.evaluate(state), None);
        }

        let maximizing = state.to_move == self.me;
        let mut best_val = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for cm in branches {
            let mut child = state.clone();
            apply_unchecked(&mut child, Move::Companion(cm));
            let val = match cm {
                CompanionMove::Jaqen { .. } if !maximizing => self.evaluate(&child),
                _ => self.minimax(&child, alpha, beta, depth - 1).0,
            };

            if maximizing {
                if val > best_val {
                    best_val = val;
                    best_move = Some(cm);
                }
                alpha = alpha.max(best_val);
            } else {
                if val < best_val {
                    best_val = val;
                    best_move = Some(cm);
                }
                beta = beta.min(best_val);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }
        (best_val, best_move)
    }

    /// Companion moves explored at one ply, in registry order.
    ///
    /// Jon Snow and Sandor try one target per house. Ramsay tries every
    /// ordered pair of distinct locations, seeker included. Jaqen tries
    /// every unordered pair of targets, each with one randomly drawn
    /// companion to dismiss.
    pub(crate) fn companion_branches(&mut self, state: &GameState) -> Vec<CompanionMove> {
        let board = &state.board;
        let mut out = Vec::new();

        for companion in state.companions.iter() {
            let targets = legal_companion_targets(board, companion);
            match companion {
                Companion::JonSnow | Companion::Sandor => {
                    let mut seen = [false; 7];
                    for target in targets {
                        let Some(house) = board.house_at(target) else { continue };
                        if std::mem::replace(&mut seen[house.index()], true) {
                            continue;
                        }
                        out.push(if companion == Companion::JonSnow {
                            CompanionMove::JonSnow { target }
                        } else {
                            CompanionMove::Sandor { target }
                        });
                    }
                }
                Companion::Gendry => out.push(CompanionMove::Gendry),
                Companion::Melisandre => out.push(CompanionMove::Melisandre),
                Companion::Ramsay => {
                    for &first in &targets {
                        for &second in &targets {
                            if first != second {
                                out.push(CompanionMove::Ramsay { first, second });
                            }
                        }
                    }
                }
                Companion::Jaqen => {
                    let others: Vec<Companion> = state.companions.without(Companion::Jaqen).iter().collect();
                    for (i, &first) in targets.iter().enumerate() {
                        for &second in &targets[i + 1..] {
                            if let Some(&dismiss) = others.choose(&mut *self.rng) {
                                out.push(CompanionMove::Jaqen { first, second, dismiss });
                            }
                        }
                    }
                }
            }
        }
        out
    }
}
