// ═══════════════════════════════════════════════════════════════════════
// Player ledger — captured cards and banner ownership
// ═══════════════════════════════════════════════════════════════════════

use crate::board::CardId;
use crate::companions::Companion;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// A card held by a player: either captured from the board or granted
/// directly by a companion effect (never on the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Captured {
    Board(CardId),
    Granted(Companion),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    cards: [Vec<Captured>; 7],
    banners: [bool; 7],
}

impl PlayerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, house: House, card: Captured) {
        self.cards[house.index()].push(card);
    }

    pub fn captured(&self, house: House) -> &[Captured] {
        &self.cards[house.index()]
    }

    pub fn count(&self, house: House) -> usize {
        self.cards[house.index()].len()
    }

    pub fn total_cards(&self) -> usize {
        self.cards.iter().map(Vec::len).sum()
    }

    pub fn has_banner(&self, house: House) -> bool {
        self.banners[house.index()]
    }

    pub fn banner_count(&self) -> u8 {
        self.banners.iter().filter(|&&b| b).count() as u8
    }

    pub fn set_banner(&mut self, house: House, held: bool) {
        self.banners[house.index()] = held;
    }
}

// ── Banners ────────────────────────────────────────────────────────────

/// Reassign every house banner after a move.
///
/// Strictly more cards of a house takes its banner from the other side.
/// On a tie the side that just captured that house (`last_house`) takes
/// it; any other tie leaves ownership as it was, including unassigned.
pub fn assign_banners(ledgers: &mut [PlayerLedger; 2], last_house: Option<House>, last_mover: Side) {
    for house in House::ALL {
        let one = ledgers[0].count(house);
        let two = ledgers[1].count(house);
        let holder = if one > two {
            Some(Side::One)
        } else if two > one {
            Some(Side::Two)
        } else if last_house == Some(house) {
            Some(last_mover)
        } else {
            None
        };
        if let Some(side) = holder {
            ledgers[side.index()].set_banner(house, true);
            ledgers[side.other().index()].set_banner(house, false);
        }
    }
}

// ── Outcome ────────────────────────────────────────────────────────────

/// Winner at game end: more banners wins; otherwise the first house in
/// priority order whose banner only one side holds decides. `None` when
/// every house ties.
pub fn winner(ledgers: &[PlayerLedger; 2]) -> Option<Side> {
    let (one, two) = (ledgers[0].banner_count(), ledgers[1].banner_count());
    if one != two {
        return Some(if one > two { Side::One } else { Side::Two });
    }
    House::ALL.iter().find_map(|&h| {
        match (ledgers[0].has_banner(h), ledgers[1].has_banner(h)) {
            (true, false) => Some(Side::One),
            (false, true) => Some(Side::Two),
            _ => None,
        }
    })
}
