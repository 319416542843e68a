// ═══════════════════════════════════════════════════════════════════════
// Core types — houses, sides, board locations
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board is always 6×6.
pub const BOARD_SIDE: u8 = 6;
pub const NUM_CELLS: usize = (BOARD_SIDE as usize) * (BOARD_SIDE as usize);

// ── House ──────────────────────────────────────────────────────────────

/// The seven card factions, in priority order (largest house first).
/// This order is used for evaluation weights and the end-of-game tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum House {
    Stark,
    Greyjoy,
    Lannister,
    Targaryen,
    Baratheon,
    Tyrell,
    Tully,
}

impl House {
    pub const ALL: [House; 7] = [
        House::Stark,
        House::Greyjoy,
        House::Lannister,
        House::Targaryen,
        House::Baratheon,
        House::Tyrell,
        House::Tully,
    ];

    /// Number of cards of this house in a full deck. Majority thresholds
    /// are derived from these totals.
    pub fn total_cards(self) -> u8 {
        match self {
            House::Stark => 8,
            House::Greyjoy => 7,
            House::Lannister => 6,
            House::Targaryen => 5,
            House::Baratheon => 4,
            House::Tyrell => 3,
            House::Tully => 2,
        }
    }

    /// Position in `House::ALL`; used to index per-house arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            House::Stark => "Stark",
            House::Greyjoy => "Greyjoy",
            House::Lannister => "Lannister",
            House::Targaryen => "Targaryen",
            House::Baratheon => "Baratheon",
            House::Tyrell => "Tyrell",
            House::Tully => "Tully",
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for House {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        House::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

// ── Side ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// 1-based player number, as shown to humans.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

// ── Location ───────────────────────────────────────────────────────────
// Cell index 0..36, row-major.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location(pub u8);

impl Location {
    pub fn new(index: u8) -> Option<Location> {
        ((index as usize) < NUM_CELLS).then_some(Location(index))
    }

    pub fn row(self) -> u8 {
        self.0 / BOARD_SIDE
    }

    pub fn col(self) -> u8 {
        self.0 % BOARD_SIDE
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Same row or same column (a location is aligned with itself).
    pub fn is_aligned_with(self, other: Location) -> bool {
        self.row() == other.row() || self.col() == other.col()
    }

    /// True when `self` lies strictly between `a` and `b` on the row or
    /// column they share. False if `a` and `b` are not aligned.
    pub fn is_strictly_between(self, a: Location, b: Location) -> bool {
        let strictly = |x: u8, lo: u8, hi: u8| lo.min(hi) < x && x < lo.max(hi);
        if a.row() == b.row() && a != b {
            self.row() == a.row() && strictly(self.col(), a.col(), b.col())
        } else if a.col() == b.col() && a != b {
            self.col() == a.col() && strictly(self.row(), a.row(), b.row())
        } else {
            false
        }
    }

    pub fn all() -> impl Iterator<Item = Location> {
        (0..NUM_CELLS as u8).map(Location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
