use std::fmt;

use arrayvec::ArrayVec;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn to_code(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// Promotion choices in the order they are generated.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Knight, Self::Bishop];

    pub const fn fen_code(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub const fn from_fen_code(code: char) -> Option<Self> {
        match code {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub const fn fen_code(self) -> char {
        let code = self.piece_type.fen_code();
        match self.color {
            Color::White => code.to_ascii_uppercase(),
            Color::Black => code,
        }
    }

    pub const fn from_fen_code(code: char) -> Option<Self> {
        let color = if code.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match PieceType::from_fen_code(code.to_ascii_lowercase()) {
            Some(piece_type) => Some(Self { piece_type, color }),
            None => None,
        }
    }
}

/// A board coordinate. `file` runs a→h, `row` runs top→bottom as the
/// board is printed, so row 0 is rank 8 and row 7 is rank 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub row: u8,
}

impl Square {
    pub const fn new(file: u8, row: u8) -> Option<Self> {
        if file <= 7 && row <= 7 {
            Some(Self { file, row })
        } else {
            None
        }
    }

    pub const fn new_unchecked(file: u8, row: u8) -> Self {
        Self { file, row }
    }

    /// The printed rank, 1..=8.
    pub const fn rank(self) -> u8 {
        8 - self.row
    }

    /// Parses algebraic notation, e.g. `"e4"`.
    pub fn parse(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let file_ch = chars.next()?.to_ascii_lowercase();
        let rank_ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
            return None;
        }
        let file = file_ch as u8 - b'a';
        let row = b'8' - rank_ch as u8;
        Some(Self { file, row })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + (7 - self.row)) as char
        )
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide = 0,
    QueenSide = 1,
}

/// The four independent castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const fn none() -> Self {
        Self {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }

    pub const fn all() -> Self {
        Self {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub const fn king_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    pub const fn queen_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }

    pub fn clear_king_side(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_side = false,
            Color::Black => self.black_king_side = false,
        }
    }

    pub fn clear_queen_side(&mut self, color: Color) {
        match color {
            Color::White => self.white_queen_side = false,
            Color::Black => self.black_queen_side = false,
        }
    }

    pub fn clear_all(&mut self, color: Color) {
        self.clear_king_side(color);
        self.clear_queen_side(color);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    /// Captured piece carried by value so undo never chases a stale
    /// grid reference.
    pub captured: Option<Piece>,
    pub castling: Option<CastlingSide>,
    /// En-passant target consumed by this move, if it is an en-passant
    /// capture.
    pub en_passant: Option<Square>,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            captured: None,
            castling: None,
            en_passant: None,
        }
    }

    pub const fn capture(from: Square, to: Square, captured: Piece) -> Self {
        Self {
            from,
            to,
            promotion: None,
            captured: Some(captured),
            castling: None,
            en_passant: None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Capacity clears the densest known legal position (218 moves);
/// pushing past it panics rather than dropping moves.
pub type MoveList = ArrayVec<Move, 256>;
