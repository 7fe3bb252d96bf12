use thiserror::Error;

use crate::board::Board;
use crate::fen::{encode_fen, parse_fen, ParsedFen, STANDARD_POSITION};
use crate::movegen::{generate_legal_moves_from_position, rook_files};
use crate::types::{CastlingRights, Color, Move, MoveList, Piece, PieceType, Square};
use crate::uci::move_to_uci;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Malformed position text, or a king count other than exactly one
    /// per color. Fatal to construction.
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    /// The requested move is not in the current legal-move set. The
    /// board is left unmodified.
    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// One ply of undo information: the move as played plus the two pieces
/// of state a king or rook move destroys irrecoverably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub rights: CastlingRights,
    pub en_passant: Option<Square>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingRights,
    /// Only set for the ply immediately after a two-square pawn
    /// advance; cleared at the start of every push.
    pub en_passant: Option<Square>,
    pub half_moves: u32,
    pub full_moves: u32,
    pub history: Vec<HistoryEntry>,
    legal: MoveList,
}

impl Position {
    pub fn new() -> Self {
        Self::from_fen(STANDARD_POSITION).expect("standard starting FEN must be valid")
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed = parse_fen(fen).map_err(|err| PositionError::InvalidPosition(err.to_string()))?;
        Ok(Self::from_parsed(parsed))
    }

    pub fn fen(&self) -> String {
        encode_fen(&self.to_parsed_fen())
    }

    /// The cached legal moves for the side to move. Recomputed eagerly
    /// after every push and undo, never left stale.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Plays `mv` if it matches a legal move by origin, destination and
    /// promotion choice. The matched move from the legal set is the one
    /// applied, so callers need not fill in capture or castling fields.
    pub fn push(&mut self, mv: &Move) -> Result<(), PositionError> {
        let matched = self
            .legal
            .iter()
            .find(|legal| {
                legal.from == mv.from && legal.to == mv.to && legal.promotion == mv.promotion
            })
            .cloned()
            .ok_or_else(|| PositionError::IllegalMove(move_to_uci(mv)))?;

        self.history.push(HistoryEntry {
            mv: matched.clone(),
            rights: self.castling,
            en_passant: self.en_passant,
        });
        self.en_passant = None;

        if matched.en_passant.is_some() {
            // the captured pawn sits beside the destination, not on it
            self.board
                .take(Square::new_unchecked(matched.to.file, matched.from.row));
        }

        let moved = self
            .board
            .take(matched.from)
            .expect("legal move source must hold the moving piece");
        self.board.set(matched.to, moved);

        self.half_moves += 1;
        if moved.color == Color::Black {
            self.full_moves += 1;
        }
        self.turn = self.turn.opposite();

        if let Some(promotion) = matched.promotion {
            self.board.set(matched.to, Piece::new(promotion, moved.color));
        }

        if let Some(side) = matched.castling {
            let (rook_from, rook_to) = rook_files(side);
            let row = matched.to.row;
            if let Some(rook) = self.board.take(Square::new_unchecked(rook_from, row)) {
                self.board.set(Square::new_unchecked(rook_to, row), rook);
            }
        }

        if moved.piece_type == PieceType::King {
            self.castling.clear_all(moved.color);
        }
        if moved.piece_type == PieceType::Rook && matched.from.row == home_row(moved.color) {
            if matched.from.file == 7 {
                self.castling.clear_king_side(moved.color);
            } else if matched.from.file == 0 {
                self.castling.clear_queen_side(moved.color);
            }
        }

        if moved.piece_type == PieceType::Pawn
            && matched.from.row.abs_diff(matched.to.row) == 2
        {
            let passed_row = (matched.from.row + matched.to.row) / 2;
            self.en_passant = Some(Square::new_unchecked(matched.to.file, passed_row));
        }

        self.legal = generate_legal_moves_from_position(self);
        Ok(())
    }

    /// Reverses exactly one ply. A no-op if no moves have been played.
    pub fn undo(&mut self) {
        let Some(entry) = self.history.pop() else {
            return;
        };
        let mv = entry.mv;
        self.castling = entry.rights;
        self.en_passant = entry.en_passant;

        let moved = self
            .board
            .take(mv.to)
            .expect("move log destination must hold the moved piece");
        let original = if mv.promotion.is_some() {
            Piece::new(PieceType::Pawn, moved.color)
        } else {
            moved
        };
        self.board.set(mv.from, original);

        if mv.en_passant.is_some() {
            if let Some(captured) = mv.captured {
                self.board
                    .set(Square::new_unchecked(mv.to.file, mv.from.row), captured);
            }
        } else if let Some(captured) = mv.captured {
            self.board.set(mv.to, captured);
        }

        if let Some(side) = mv.castling {
            let (rook_from, rook_to) = rook_files(side);
            let row = mv.to.row;
            if let Some(rook) = self.board.take(Square::new_unchecked(rook_to, row)) {
                self.board.set(Square::new_unchecked(rook_from, row), rook);
            }
        }

        self.half_moves = self.half_moves.saturating_sub(1);
        if original.color == Color::Black {
            self.full_moves = self.full_moves.saturating_sub(1);
        }
        self.turn = self.turn.opposite();

        self.legal = generate_legal_moves_from_position(self);
    }

    fn from_parsed(parsed: ParsedFen) -> Self {
        let mut position = Self {
            board: parsed.board,
            turn: parsed.turn,
            castling: parsed.castling,
            en_passant: parsed.en_passant,
            half_moves: parsed.half_moves,
            full_moves: parsed.full_moves,
            history: Vec::new(),
            legal: MoveList::new(),
        };
        position.legal = generate_legal_moves_from_position(&position);
        position
    }

    fn to_parsed_fen(&self) -> ParsedFen {
        ParsedFen {
            board: self.board.clone(),
            turn: self.turn,
            castling: self.castling,
            en_passant: self.en_passant,
            half_moves: self.half_moves,
            full_moves: self.full_moves,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

const fn home_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
