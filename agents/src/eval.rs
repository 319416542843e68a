// ═══════════════════════════════════════════════════════════════════════
// Static evaluation — weighted linear score from one side's perspective
// ═══════════════════════════════════════════════════════════════════════

use crate::config::Weights;
use hotk_engine::engine::GameState;
use hotk_engine::moves::legal_normal_moves;
use hotk_engine::*;

/// Score `state` for `me`. Positive favours `me`.
///
/// Terms: a tempo bonus while a companion choice is pending, the banner
/// difference, a penalty per legal normal move, and per house either a
/// majority bonus/penalty or, when both sides hold exactly half of the
/// house, a term rewarding the side without the banner.
pub fn evaluate(state: &GameState, me: Side, w: &Weights) -> i32 {
    let mine = state.ledger(me);
    let theirs = state.ledger(me.other());
    let mut score = 0;

    if state.companion_pending {
        score += w.companion_pending;
    }
    score += (i32::from(mine.banner_count()) - i32::from(theirs.banner_count())) * w.banner;
    score -= legal_normal_moves(&state.board).len() as i32 * w.mobility;

    for house in House::ALL {
        let total = usize::from(house.total_cards());
        let (a, b) = (mine.count(house), theirs.count(house));
        if 2 * a > total {
            score += w.house(house);
        } else if 2 * b > total {
            score -= w.house(house);
        } else if 2 * a == total && 2 * b == total {
            let held = |l: &PlayerLedger| i32::from(l.has_banner(house));
            score += (held(theirs) - held(mine)) * w.house(house);
        }
    }
    score
}
