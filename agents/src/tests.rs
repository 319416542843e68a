// ═══════════════════════════════════════════════════════════════════════
// Test suite for evaluation, search and agents
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::agent::{first_legal_move, Agent, AgentView};
    use crate::config::{SearchConfig, Weights};
    use crate::eval::evaluate;
    use crate::minimax::MinimaxAgent;
    use crate::random::RandomAgent;
    use crate::search::Searcher;
    use hotk_engine::engine::{apply_move, apply_unchecked, validate_move, GameState};
    use hotk_engine::moves::legal_normal_moves;
    use hotk_engine::setup::create_initial_state;
    use hotk_engine::*;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::time::{Duration, Instant};

    // ── Helpers ──────────────────────────────────────────────────────────

    fn at(row: u8, col: u8) -> Location {
        Location(row * BOARD_SIDE + col)
    }

    fn board(seeker: Location, cards: &[(Location, House)]) -> Board {
        Board::build(
            seeker,
            cards
                .iter()
                .enumerate()
                .map(|(i, &(loc, h))| (loc, h, format!("{h}{i}"))),
        )
        .unwrap()
    }

    fn no_time_limit(depth: u32) -> SearchConfig {
        SearchConfig {
            normal_depth: depth,
            companion_depth: depth,
            time_budget_ms: 3_600_000,
            weights: Weights::tuned(),
        }
    }

    /// Seeker plus `cards` random house cards on random cells, with a few
    /// granted cards already in the ledgers so the evaluation is not flat.
    fn small_state(seed: u64, cards: usize) -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cells: Vec<Location> = Location::all().collect();
        cells.shuffle(&mut rng);
        let placed: Vec<(Location, House)> = cells[1..=cards]
            .iter()
            .map(|&l| (l, House::ALL[rng.gen_range(0..House::ALL.len())]))
            .collect();

        let mut state = GameState::new(board(cells[0], &placed));
        for _ in 0..rng.gen_range(0..4) {
            let side = if rng.gen_bool(0.5) { 0 } else { 1 };
            let house = House::ALL[rng.gen_range(0..House::ALL.len())];
            state.players[side].add(house, Captured::Granted(Companion::Gendry));
        }
        state.to_move = if rng.gen_bool(0.5) { Side::One } else { Side::Two };
        state
    }

    /// Unpruned minimax with the same leaf rules as `Searcher::minimax`.
    fn exhaustive(state: &GameState, me: Side, w: &Weights, depth: u32) -> i32 {
        let moves = legal_normal_moves(&state.board);
        if moves.is_empty() || depth == 0 || state.companion_pending {
            return evaluate(state, me, w);
        }
        let values = moves.into_iter().map(|l| {
            let mut child = state.clone();
            apply_unchecked(&mut child, Move::Normal(l));
            exhaustive(&child, me, w, depth - 1)
        });
        if state.to_move == me {
            values.max().unwrap()
        } else {
            values.min().unwrap()
        }
    }

    fn exhaustive_companion(state: &GameState, me: Side, cfg: &SearchConfig, seed: u64, depth: u32) -> i32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let branches = Searcher::new(me, cfg, &mut rng).companion_branches(state);
        let maximizing = state.to_move == me;
        let values = branches.into_iter().map(|cm| {
            let mut child = state.clone();
            apply_unchecked(&mut child, Move::Companion(cm));
            match cm {
                CompanionMove::Jaqen { .. } if !maximizing => evaluate(&child, me, &cfg.weights),
                _ => exhaustive(&child, me, &cfg.weights, depth - 1),
            }
        });
        if maximizing {
            values.max().unwrap()
        } else {
            values.min().unwrap()
        }
    }

    // ═════════════════════════════════════════════════════════════════════
    // EVALUATION
    // ═════════════════════════════════════════════════════════════════════

    fn house_only_weights() -> Weights {
        Weights {
            companion_pending: 0,
            banner: 0,
            mobility: 0,
            houses: [1, 10, 100, 1_000, 10_000, 100_000, 1_000_000],
        }
    }

    #[test]
    fn test_majority_terms() {
        let mut s = GameState::new(board(at(0, 0), &[]));
        for _ in 0..5 {
            s.players[0].add(House::Greyjoy, Captured::Granted(Companion::Gendry));
        }
        for _ in 0..2 {
            s.players[1].add(House::Tyrell, Captured::Granted(Companion::Gendry));
        }
        let w = house_only_weights();
        assert_eq!(evaluate(&s, Side::One, &w), 10 - 100_000);
        assert_eq!(evaluate(&s, Side::Two, &w), 100_000 - 10);
    }

    #[test]
    fn test_half_tie_rewards_side_without_banner() {
        let mut s = GameState::new(board(at(0, 0), &[]));
        for side in 0..2 {
            for _ in 0..4 {
                s.players[side].add(House::Stark, Captured::Granted(Companion::Gendry));
            }
        }
        s.players[0].set_banner(House::Stark, true);
        let w = house_only_weights();
        assert_eq!(evaluate(&s, Side::One, &w), -1);
        assert_eq!(evaluate(&s, Side::Two, &w), 1);
    }

    #[test]
    fn test_pending_banner_and_mobility_terms() {
        let b = board(at(0, 0), &[(at(0, 3), House::Stark), (at(4, 0), House::Tully), (at(2, 2), House::Tully)]);
        let mut s = GameState::new(b);
        s.players[1].set_banner(House::Tyrell, true);
        s.companion_pending = true;
        let w = Weights { companion_pending: 7, banner: 100, mobility: 3, houses: [0; 7] };
        assert_eq!(evaluate(&s, Side::One, &w), 7 - 100 - 2 * 3);
    }

    // ═════════════════════════════════════════════════════════════════════
    // SEARCH
    // ═════════════════════════════════════════════════════════════════════

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_depth_zero_is_static_evaluation(seed in any::<u64>(), cards in 1usize..35, pending in any::<bool>()) {
            let mut s = small_state(seed, cards);
            s.companion_pending = pending;
            let cfg = no_time_limit(0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut searcher = Searcher::new(s.to_move, &cfg, &mut rng);
            let expected = evaluate(&s, s.to_move, &cfg.weights);
            prop_assert_eq!(searcher.minimax(&s, i32::MIN, i32::MAX, 0), (expected, None));
            prop_assert_eq!(searcher.minimax_companion(&s, i32::MIN, i32::MAX, 0), (expected, None));
        }

        #[test]
        fn prop_alpha_beta_matches_exhaustive(seed in any::<u64>(), cards in 1usize..=5, depth in 1u32..6) {
            let s = small_state(seed, cards);
            let me = if seed % 2 == 0 { s.to_move } else { s.to_move.other() };
            let cfg = no_time_limit(depth);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (value, _) = Searcher::new(me, &cfg, &mut rng).minimax(&s, i32::MIN, i32::MAX, depth);
            prop_assert_eq!(value, exhaustive(&s, me, &cfg.weights, depth));
        }

        #[test]
        fn prop_companion_alpha_beta_matches_exhaustive(seed in any::<u64>(), cards in 2usize..=5, depth in 1u32..4) {
            let mut s = small_state(seed, cards);
            s.companions = hotk_engine::engine::prune_unusable_companions(&s.board, CompanionSet::full());
            prop_assume!(!s.companions.is_empty());
            s.companion_pending = true;
            let me = if seed % 2 == 0 { s.to_move } else { s.to_move.other() };
            let cfg = no_time_limit(depth);

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (value, best) = Searcher::new(me, &cfg, &mut rng).minimax_companion(&s, i32::MIN, i32::MAX, depth);
            prop_assert!(best.is_some());
            prop_assert_eq!(value, exhaustive_companion(&s, me, &cfg, seed, depth));
        }
    }

    #[test]
    fn test_search_is_reproducible() {
        let s = create_initial_state(99);
        let cfg = no_time_limit(3);
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(5);
            Searcher::new(s.to_move, &cfg, &mut rng).minimax(&s, i32::MIN, i32::MAX, 3)
        };
        let first = run();
        assert!(first.1.is_some());
        assert_eq!(first, run());
    }

    #[test]
    fn test_expired_deadline_returns_evaluation() {
        let s = create_initial_state(4);
        let cfg = no_time_limit(5);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let deadline = Instant::now();
        std::thread::sleep(Duration::from_millis(2));
        let mut searcher = Searcher::with_deadline(s.to_move, &cfg, &mut rng, deadline);
        let (value, best) = searcher.minimax(&s, i32::MIN, i32::MAX, 5);
        assert_eq!(value, evaluate(&s, s.to_move, &cfg.weights));
        assert_eq!(best, None);
        assert!(searcher.stats().timed_out);
    }

    #[test]
    fn test_one_target_per_house_for_jon_and_sandor() {
        let b = board(
            at(0, 0),
            &[
                (at(0, 1), House::Stark),
                (at(0, 2), House::Stark),
                (at(1, 1), House::Tully),
                (at(2, 2), House::Stark),
            ],
        );
        let mut s = GameState::new(b);
        s.companions = CompanionSet::EMPTY.with(Companion::JonSnow).with(Companion::Sandor);
        let cfg = no_time_limit(1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let branches = Searcher::new(Side::One, &cfg, &mut rng).companion_branches(&s);
        assert_eq!(
            branches,
            vec![
                CompanionMove::JonSnow { target: at(0, 1) },
                CompanionMove::JonSnow { target: at(1, 1) },
                CompanionMove::Sandor { target: at(0, 1) },
                CompanionMove::Sandor { target: at(1, 1) },
            ]
        );
    }

    #[test]
    fn test_ramsay_and_jaqen_branch_counts() {
        let b = board(at(0, 0), &[(at(0, 1), House::Stark), (at(1, 1), House::Tully), (at(2, 2), House::Tyrell)]);
        let mut s = GameState::new(b);
        s.companions = CompanionSet::EMPTY.with(Companion::Ramsay).with(Companion::Jaqen).with(Companion::Gendry);
        let cfg = no_time_limit(1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let branches = Searcher::new(Side::One, &cfg, &mut rng).companion_branches(&s);

        let ramsay = branches.iter().filter(|m| matches!(m, CompanionMove::Ramsay { .. })).count();
        let jaqen: Vec<_> = branches.iter().filter(|m| matches!(m, CompanionMove::Jaqen { .. })).collect();
        assert_eq!(ramsay, 4 * 3);
        assert_eq!(jaqen.len(), 3);
        for m in jaqen {
            if let CompanionMove::Jaqen { dismiss, .. } = m {
                assert!(matches!(dismiss, Companion::Ramsay | Companion::Gendry));
            }
        }
    }

    // ═════════════════════════════════════════════════════════════════════
    // AGENTS
    // ═════════════════════════════════════════════════════════════════════

    #[test]
    fn test_minimax_takes_whole_house() {
        let b = board(
            at(0, 0),
            &[(at(0, 1), House::Tully), (at(0, 2), House::Tully), (at(5, 5), House::Stark)],
        );
        let agent = MinimaxAgent::new("Depth-1", no_time_limit(1));
        let view = AgentView::of(&GameState::new(b));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(agent.choose(&view, &mut rng), Some(Move::Normal(at(0, 2))));
    }

    #[test]
    fn test_minimax_companion_choice_is_valid() {
        let mut s = create_initial_state(21);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let agent = MinimaxAgent::new("Depth-2", no_time_limit(2));
        // Play random moves until some side has to pick a companion.
        while !s.companion_pending && !s.is_over() {
            let view = AgentView::of(&s);
            let mv = RandomAgent::new().choose(&view, &mut rng).unwrap();
            apply_move(&mut s, mv).unwrap();
        }
        if s.companion_pending {
            let mv = agent.choose(&AgentView::of(&s), &mut rng).unwrap();
            assert!(matches!(mv, Move::Companion(_)));
            assert_eq!(validate_move(&s, &mv), Ok(()));
        }
    }

    #[test]
    fn test_depth_zero_falls_back_to_first_legal() {
        let s = create_initial_state(8);
        let view = AgentView::of(&s);
        let agent = MinimaxAgent::new("Depth-0", no_time_limit(0));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mv = agent.choose(&view, &mut rng);
        assert_eq!(mv, first_legal_move(&view));
        assert!(mv.is_some());
    }

    #[test]
    fn test_view_round_trips_state() {
        let mut s = create_initial_state(13);
        let mv = first_legal_move(&AgentView::of(&s)).unwrap();
        apply_move(&mut s, mv).unwrap();
        assert_eq!(AgentView::of(&s).to_state(), s);
    }

    #[test]
    fn test_random_games_only_play_legal_moves() {
        for seed in 0..20 {
            let mut s = create_initial_state(seed);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let agent = RandomAgent::new();
            let mut plies = 0;
            while !s.is_over() {
                let mv = agent.choose(&AgentView::of(&s), &mut rng).unwrap();
                apply_move(&mut s, mv).unwrap();
                plies += 1;
                assert!(plies < 200);
            }
            assert_eq!(agent.choose(&AgentView::of(&s), &mut rng), None);
        }
    }

    #[test]
    fn test_shallow_agent_plays_full_game() {
        let mut s = create_initial_state(3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let agents: [Box<dyn Agent>; 2] = [Box::new(MinimaxAgent::shallow()), Box::new(RandomAgent::new())];
        while !s.is_over() {
            let agent = &agents[s.to_move.index()];
            let mv = agent.choose(&AgentView::of(&s), &mut rng).unwrap();
            apply_move(&mut s, mv).unwrap();
        }
        assert!(s.legal_moves().is_empty());
    }
}
