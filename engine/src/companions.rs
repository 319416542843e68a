// ═══════════════════════════════════════════════════════════════════════
// Companion registry
//
// The six one-shot companion effects, and the set of those still
// available. The set is a small value type: removing an effect produces
// a new set, so search branches never observe each other's registry.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Companion {
    JonSnow,
    Gendry,
    Ramsay,
    Sandor,
    Jaqen,
    Melisandre,
}

impl Companion {
    pub const ALL: [Companion; 6] = [
        Companion::JonSnow,
        Companion::Gendry,
        Companion::Ramsay,
        Companion::Sandor,
        Companion::Jaqen,
        Companion::Melisandre,
    ];

    /// Number of choices the effect requires. Jaqen's third choice is a
    /// companion name rather than a board location.
    pub fn arity(self) -> usize {
        match self {
            Companion::JonSnow => 1,
            Companion::Gendry => 0,
            Companion::Ramsay => 2,
            Companion::Sandor => 1,
            Companion::Jaqen => 3,
            Companion::Melisandre => 0,
        }
    }

    /// Name used in move sequences and board assets.
    pub fn wire_name(self) -> &'static str {
        match self {
            Companion::JonSnow => "Jon",
            Companion::Gendry => "Gendry",
            Companion::Ramsay => "Ramsay",
            Companion::Sandor => "Sandor",
            Companion::Jaqen => "Jaqen",
            Companion::Melisandre => "Melisandre",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Companion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Companion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Companion::ALL
            .iter()
            .copied()
            .find(|c| c.wire_name() == s)
            .ok_or_else(|| s.to_string())
    }
}

// ── CompanionSet ───────────────────────────────────────────────────────

/// Companions still available. Iteration order is `Companion::ALL` order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CompanionSet(u8);

impl CompanionSet {
    pub const EMPTY: CompanionSet = CompanionSet(0);

    pub fn full() -> CompanionSet {
        Companion::ALL.iter().copied().collect()
    }

    pub fn contains(self, c: Companion) -> bool {
        self.0 & c.bit() != 0
    }

    pub fn with(self, c: Companion) -> CompanionSet {
        CompanionSet(self.0 | c.bit())
    }

    pub fn without(self, c: Companion) -> CompanionSet {
        CompanionSet(self.0 & !c.bit())
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Companion> {
        Companion::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Companion> for CompanionSet {
    fn from_iter<I: IntoIterator<Item = Companion>>(iter: I) -> Self {
        iter.into_iter().fold(CompanionSet::EMPTY, CompanionSet::with)
    }
}

impl fmt::Debug for CompanionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
