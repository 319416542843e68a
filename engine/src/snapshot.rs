// ═══════════════════════════════════════════════════════════════════════
// Board snapshots — the JSON board file format
//
// A snapshot is a list of {house, name, location} records, one per card
// on the board. The seeker is recorded under house "Varys". Records may
// appear in any order.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::Board;
use crate::cards::SEEKER_NAME;
use crate::error::{BoardError, SnapshotError};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub house: String,
    pub name: String,
    pub location: i64,
}

/// Records for every card on the board, in location order.
pub fn to_records(board: &Board) -> Vec<CardRecord> {
    board
        .occupied()
        .map(|loc| match board.card_at(loc) {
            Some(id) => {
                let info = board.info(id);
                CardRecord {
                    house: info.house.to_string(),
                    name: info.name.clone(),
                    location: i64::from(loc.0),
                }
            }
            None => CardRecord {
                house: SEEKER_NAME.to_string(),
                name: SEEKER_NAME.to_string(),
                location: i64::from(loc.0),
            },
        })
        .collect()
}

/// Rebuild a board from records, trusting their fields verbatim.
/// Exactly one seeker record is required.
pub fn from_records(records: &[CardRecord]) -> Result<Board, BoardError> {
    let mut seeker = None;
    let mut cards = Vec::with_capacity(records.len());

    for rec in records {
        let loc = u8::try_from(rec.location)
            .ok()
            .and_then(Location::new)
            .ok_or(BoardError::OutOfRange(rec.location))?;
        if rec.house == SEEKER_NAME {
            if seeker.replace(loc).is_some() {
                return Err(BoardError::DuplicateSeeker);
            }
        } else {
            let house: House = rec
                .house
                .parse()
                .map_err(BoardError::UnknownHouse)?;
            cards.push((loc, house, rec.name.clone()));
        }
    }

    let seeker = seeker.ok_or(BoardError::MissingSeeker)?;
    Board::build(seeker, cards)
}

pub fn save_board(board: &Board, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(&to_records(board))?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_board(path: impl AsRef<Path>) -> Result<Board, SnapshotError> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<CardRecord> = serde_json::from_str(&text)?;
    Ok(from_records(&records)?)
}
