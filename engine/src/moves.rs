// ═══════════════════════════════════════════════════════════════════════
// Moves and move generation
//
// A move is either a normal capture (seeker moves to a card in its row
// or column) or one companion effect carrying exactly its arguments.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::companions::Companion;
use crate::error::MoveError;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Normal(Location),
    Companion(CompanionMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanionMove {
    /// Reveal the target's house; gain two cards of that house.
    JonSnow { target: Location },
    /// Gain one Baratheon card.
    Gendry,
    /// Swap two cards (the seeker included).
    Ramsay { first: Location, second: Location },
    /// Remove one card from the board.
    Sandor { target: Location },
    /// Remove two cards and dismiss another companion.
    Jaqen { first: Location, second: Location, dismiss: Companion },
    /// Keep the turn.
    Melisandre,
}

impl CompanionMove {
    pub fn companion(&self) -> Companion {
        match self {
            CompanionMove::JonSnow { .. } => Companion::JonSnow,
            CompanionMove::Gendry => Companion::Gendry,
            CompanionMove::Ramsay { .. } => Companion::Ramsay,
            CompanionMove::Sandor { .. } => Companion::Sandor,
            CompanionMove::Jaqen { .. } => Companion::Jaqen,
            CompanionMove::Melisandre => Companion::Melisandre,
        }
    }

    /// Board locations named by the move, in argument order.
    pub fn locations(&self) -> Vec<Location> {
        match *self {
            CompanionMove::JonSnow { target } | CompanionMove::Sandor { target } => vec![target],
            CompanionMove::Ramsay { first, second } | CompanionMove::Jaqen { first, second, .. } => {
                vec![first, second]
            }
            CompanionMove::Gendry | CompanionMove::Melisandre => Vec::new(),
        }
    }
}

// ── Generation ─────────────────────────────────────────────────────────

/// Every card sharing the seeker's row or column, in location order.
pub fn legal_normal_moves(board: &Board) -> Vec<Location> {
    let seeker = board.seeker();
    board
        .cards()
        .map(|(loc, _)| loc)
        .filter(|loc| loc.is_aligned_with(seeker))
        .collect()
}

/// Candidate locations for a companion's location arguments.
/// Ramsay may also pick the seeker; effects without location arguments
/// get an empty list.
pub fn legal_companion_targets(board: &Board, companion: Companion) -> Vec<Location> {
    match companion {
        Companion::JonSnow | Companion::Sandor | Companion::Jaqen => {
            board.cards().map(|(loc, _)| loc).collect()
        }
        Companion::Ramsay => board.occupied().collect(),
        Companion::Gendry | Companion::Melisandre => Vec::new(),
    }
}

// ── Wire form ──────────────────────────────────────────────────────────
// Agents outside the crate exchange moves as loose sequences:
//   normal:    5
//   companion: ["Jaqen", 3, 14, "Ramsay"]

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireArg {
    Location(i64),
    Name(String),
}

impl Move {
    pub fn to_wire(&self) -> Vec<WireArg> {
        let loc = |l: Location| WireArg::Location(i64::from(l.0));
        match *self {
            Move::Normal(l) => vec![loc(l)],
            Move::Companion(cm) => {
                let mut out = vec![WireArg::Name(cm.companion().wire_name().to_string())];
                out.extend(cm.locations().into_iter().map(loc));
                if let CompanionMove::Jaqen { dismiss, .. } = cm {
                    out.push(WireArg::Name(dismiss.wire_name().to_string()));
                }
                out
            }
        }
    }

    pub fn from_wire(args: &[WireArg]) -> Result<Move, MoveError> {
        let location = |arg: &WireArg| match arg {
            WireArg::Location(n) => u8::try_from(*n)
                .ok()
                .and_then(Location::new)
                .ok_or_else(|| MoveError::Malformed(format!("location {n} out of range"))),
            WireArg::Name(s) => Err(MoveError::Malformed(format!("expected a location, got {s:?}"))),
        };

        let (head, rest) = args
            .split_first()
            .ok_or_else(|| MoveError::Malformed("empty move".into()))?;

        let name = match head {
            WireArg::Location(_) if rest.is_empty() => return Ok(Move::Normal(location(head)?)),
            WireArg::Location(_) => {
                return Err(MoveError::Malformed("normal move takes a single location".into()))
            }
            WireArg::Name(name) => name,
        };
        let companion = name
            .parse::<Companion>()
            .map_err(MoveError::UnknownCompanion)?;
        if rest.len() != companion.arity() {
            return Err(MoveError::Arity {
                companion,
                expected: companion.arity(),
                got: rest.len(),
            });
        }

        let cm = match companion {
            Companion::JonSnow => CompanionMove::JonSnow { target: location(&rest[0])? },
            Companion::Gendry => CompanionMove::Gendry,
            Companion::Ramsay => CompanionMove::Ramsay {
                first: location(&rest[0])?,
                second: location(&rest[1])?,
            },
            Companion::Sandor => CompanionMove::Sandor { target: location(&rest[0])? },
            Companion::Jaqen => {
                let dismiss = match &rest[2] {
                    WireArg::Name(n) => n
                        .parse::<Companion>()
                        .map_err(MoveError::UnknownCompanion)?,
                    WireArg::Location(n) => {
                        return Err(MoveError::Malformed(format!("expected a companion, got {n}")))
                    }
                };
                CompanionMove::Jaqen {
                    first: location(&rest[0])?,
                    second: location(&rest[1])?,
                    dismiss,
                }
            }
            Companion::Melisandre => CompanionMove::Melisandre,
        };
        Ok(Move::Companion(cm))
    }
}

impl fmt::Display for WireArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireArg::Location(n) => write!(f, "{n}"),
            WireArg::Name(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_wire().iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" "))
    }
}
