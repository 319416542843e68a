// ═══════════════════════════════════════════════════════════════════════
// Board state — 6×6 grid of cards plus the seeker (Varys)
//
// Card metadata lives in a shared, immutable roster indexed by CardId.
// The grid itself is a plain array, so cloning a Board for a search
// branch copies 36 slots and bumps one reference count.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::BoardError;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Stable index of a card in the board's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub house: House,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Board {
    roster: Arc<[CardInfo]>,
    cells: [Option<CardId>; NUM_CELLS],
    seeker: Location,
}

impl Board {
    /// Build a board from the seeker's location and the house cards on it.
    /// Fails if a location is used twice.
    pub fn build<I>(seeker: Location, cards: I) -> Result<Board, BoardError>
    where
        I: IntoIterator<Item = (Location, House, String)>,
    {
        let mut cells = [None; NUM_CELLS];
        let mut roster = Vec::new();
        for (loc, house, name) in cards {
            if loc == seeker || cells[loc.index()].is_some() {
                return Err(BoardError::Occupied(loc));
            }
            cells[loc.index()] = Some(CardId(roster.len() as u8));
            roster.push(CardInfo { house, name });
        }
        Ok(Board {
            roster: roster.into(),
            cells,
            seeker,
        })
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn seeker(&self) -> Location {
        self.seeker
    }

    pub fn card_at(&self, loc: Location) -> Option<CardId> {
        self.cells[loc.index()]
    }

    pub fn info(&self, id: CardId) -> &CardInfo {
        &self.roster[id.0 as usize]
    }

    pub fn house_at(&self, loc: Location) -> Option<House> {
        self.card_at(loc).map(|id| self.info(id).house)
    }

    /// House cards on the board (seeker excluded), in location order.
    pub fn cards(&self) -> impl Iterator<Item = (Location, CardId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|id| (Location(i as u8), id)))
    }

    /// Every occupied location including the seeker's, in location order.
    pub fn occupied(&self) -> impl Iterator<Item = Location> + '_ {
        Location::all().filter(move |&l| l == self.seeker || self.cells[l.index()].is_some())
    }

    /// Cards remaining on the board, seeker included.
    pub fn card_count(&self) -> usize {
        self.cards().count() + 1
    }

    pub fn house_count(&self, house: House) -> usize {
        self.cards()
            .filter(|&(_, id)| self.info(id).house == house)
            .count()
    }

    // ── Mutation (rules engine only) ───────────────────────────────────

    pub(crate) fn take(&mut self, loc: Location) -> Option<CardId> {
        self.cells[loc.index()].take()
    }

    /// Move the seeker onto an empty cell.
    pub(crate) fn move_seeker(&mut self, to: Location) {
        debug_assert!(self.cells[to.index()].is_none());
        self.seeker = to;
    }

    /// Exchange the contents of two cells. Either may hold the seeker.
    pub(crate) fn swap(&mut self, a: Location, b: Location) {
        self.cells.swap(a.index(), b.index());
        if self.seeker == a {
            self.seeker = b;
        } else if self.seeker == b {
            self.seeker = a;
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.seeker == other.seeker
            && Location::all().all(|l| {
                self.card_at(l).map(|id| self.info(id)) == other.card_at(l).map(|id| other.info(id))
            })
    }
}

impl Eq for Board {}
