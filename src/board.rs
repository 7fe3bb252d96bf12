use std::fmt;

use crate::constants::SQUARES;
use crate::types::{Color, Piece, PieceType, Square};

/// The 8×8 grid. Row 0 is rank 8, so the grid prints the way a board
/// is read. A square holds at most one piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[usize::from(square.row)][usize::from(square.file)]
    }

    pub fn is_empty_square(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn set(&mut self, square: Square, piece: Piece) {
        self.grid[usize::from(square.row)][usize::from(square.file)] = Some(piece);
    }

    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.grid[usize::from(square.row)][usize::from(square.file)].take()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        for square in SQUARES {
            if let Some(piece) = self.piece_at(square) {
                if piece.piece_type == PieceType::King && piece.color == color {
                    return Some(square);
                }
            }
        }
        None
    }

    /// Every occupied square with its piece, in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        SQUARES
            .iter()
            .copied()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for spot in row {
                match spot {
                    Some(piece) => write!(f, "{} ", piece.fen_code())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
