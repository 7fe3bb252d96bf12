use crate::board::Board;
use crate::movegen::in_check;
use crate::position::{HistoryEntry, Position, PositionError};
use crate::types::{Color, Move, Piece, Square};
use crate::uci::{parse_uci, UciError};

impl Position {
    /// Whether `color` (the side to move when `None`) has its king
    /// attacked by the opponent.
    pub fn in_check(&self, color: Option<Color>) -> bool {
        let side = color.unwrap_or(self.turn);
        in_check(&self.board, self.en_passant, side)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(None) && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(None) && self.legal_moves().is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty()
    }
}

/// The collaborator-facing surface consumed by rendering and input
/// layers. Owns one position and drives it with one sequential stream
/// of moves.
#[derive(Debug, Clone)]
pub struct Chess {
    position: Position,
}

impl Chess {
    pub fn new() -> Self {
        Self {
            position: Position::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self {
            position: Position::from_fen(fen)?,
        })
    }

    pub fn load(&mut self, fen: &str) -> Result<(), PositionError> {
        self.position = Position::from_fen(fen)?;
        Ok(())
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn turn(&self) -> Color {
        self.position.turn
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn moves(&self) -> &[Move] {
        self.position.legal_moves()
    }

    pub fn push(&mut self, mv: &Move) -> Result<(), PositionError> {
        self.position.push(mv)
    }

    /// Plays a move given in long-algebraic text, e.g. `e2e4` or
    /// `e7e8q`.
    pub fn push_uci(&mut self, uci: &str) -> Result<(), PositionError> {
        let mv = parse_uci(uci, &self.position)
            .map_err(|_: UciError| PositionError::IllegalMove(uci.to_string()))?;
        self.position.push(&mv)
    }

    pub fn undo(&mut self) {
        self.position.undo();
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(None)
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.position.history
    }

    pub fn half_moves(&self) -> u32 {
        self.position.half_moves
    }

    pub fn full_moves(&self) -> u32 {
        self.position.full_moves
    }
}

impl Default for Chess {
    fn default() -> Self {
        Self::new()
    }
}
