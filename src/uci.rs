use thiserror::Error;

use crate::position::Position;
use crate::types::Move;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UciError {
    #[error("illegal move")]
    Illegal,
}

/// Long-algebraic text: origin and destination squares, plus a
/// lowercase promotion letter when promoting, e.g. `e2e4`, `e7e8q`.
pub fn move_to_uci(mv: &Move) -> String {
    match mv.promotion {
        Some(promotion) => format!("{}{}{}", mv.from, mv.to, promotion.fen_code()),
        None => format!("{}{}", mv.from, mv.to),
    }
}

/// Resolves move text against the current legal-move set, so the
/// returned move carries full capture and castling metadata.
pub fn parse_uci(uci: &str, position: &Position) -> Result<Move, UciError> {
    let normalized = uci.trim().to_ascii_lowercase();
    position
        .legal_moves()
        .iter()
        .find(|mv| move_to_uci(mv) == normalized)
        .cloned()
        .ok_or(UciError::Illegal)
}
