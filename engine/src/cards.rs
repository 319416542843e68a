// ═══════════════════════════════════════════════════════════════════════
// Card roster and companion metadata — static data
// ═══════════════════════════════════════════════════════════════════════

use crate::companions::Companion;
use crate::types::*;

/// Name of the seeker card. Snapshots record it under this house name too.
pub const SEEKER_NAME: &str = "Varys";

// ── House cards ────────────────────────────────────────────────────────

pub fn house_card_names(house: House) -> &'static [&'static str] {
    match house {
        House::Stark => &[
            "Eddard", "Catelyn", "Robb", "Sansa", "Arya", "Bran", "Rickon", "Benjen",
        ],
        House::Greyjoy => &[
            "Balon", "Euron", "Victarion", "Theon", "Asha", "Aeron", "Dagmer",
        ],
        House::Lannister => &["Tywin", "Cersei", "Jaime", "Tyrion", "Kevan", "Lancel"],
        House::Targaryen => &["Daenerys", "Viserys", "Rhaegar", "Aegon", "Aerys"],
        House::Baratheon => &["Robert", "Stannis", "Renly", "Joffrey"],
        House::Tyrell => &["Mace", "Margaery", "Loras"],
        House::Tully => &["Hoster", "Edmure"],
    }
}

/// Every house card in a full deck, in house-priority order.
pub fn full_roster() -> Vec<(House, &'static str)> {
    House::ALL
        .iter()
        .flat_map(|&h| house_card_names(h).iter().map(move |&n| (h, n)))
        .collect()
}

/// Names given to the cards a companion grants directly to a player.
pub fn granted_card_name(companion: Companion) -> &'static str {
    match companion {
        Companion::JonSnow => "Jon Snow",
        Companion::Gendry => "Gendry",
        _ => "",
    }
}

// ── Companion metadata ─────────────────────────────────────────────────

/// Arity plus display placement in the companion column. Renderers read
/// the placement; the rules engine only uses the arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanionMeta {
    pub companion: Companion,
    pub choices: usize,
    pub row: u8,
    pub column: u8,
}

pub const COMPANION_META: [CompanionMeta; 6] = [
    CompanionMeta { companion: Companion::JonSnow,    choices: 1, row: 0, column: 6 },
    CompanionMeta { companion: Companion::Gendry,     choices: 0, row: 0, column: 7 },
    CompanionMeta { companion: Companion::Ramsay,     choices: 2, row: 2, column: 6 },
    CompanionMeta { companion: Companion::Sandor,     choices: 1, row: 2, column: 7 },
    CompanionMeta { companion: Companion::Jaqen,      choices: 3, row: 4, column: 6 },
    CompanionMeta { companion: Companion::Melisandre, choices: 0, row: 4, column: 7 },
];

pub fn companion_meta(companion: Companion) -> &'static CompanionMeta {
    &COMPANION_META[companion as usize]
}
