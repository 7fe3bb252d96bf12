use crate::board::Board;
use crate::types::{CastlingRights, Color, Piece, Square};
use thiserror::Error;

/// The conventional starting array, white to move, full rights, no
/// en-passant target, counters at zero.
pub const STANDARD_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFen {
    pub board: Board,
    pub turn: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub half_moves: u32,
    pub full_moves: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid fen")]
    Invalid,
    #[error("{0}")]
    Validation(String),
    #[error("invalid piece")]
    InvalidPiece,
}

pub fn validate_fen(fen: &str) -> Result<(), FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(FenError::Validation(format!(
            "expected 6 fields, received {}",
            parts.len()
        )));
    }

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Validation(format!(
            "1st field (piece positions) is invalid [expected 8 ranks, received {}]",
            ranks.len()
        )));
    }

    const ALL: &str = "pnbrqkPNBRQK";
    let mut white_kings = 0u8;
    let mut black_kings = 0u8;
    for (i, rank) in ranks.iter().enumerate() {
        let mut count = 0u32;
        for ch in rank.chars() {
            if let Some(n) = ch.to_digit(10) {
                if n == 0 || n > 8 {
                    return Err(FenError::Validation(
                        "1st field (piece positions) is invalid [invalid run length]".to_string(),
                    ));
                }
                count += n;
            } else if ALL.contains(ch) {
                white_kings += u8::from(ch == 'K');
                black_kings += u8::from(ch == 'k');
                count += 1;
            } else {
                return Err(FenError::Validation(
                    "1st field (piece positions) is invalid [invalid piece]".to_string(),
                ));
            }
        }
        if count != 8 {
            return Err(FenError::Validation(format!(
                "1st field (piece positions) is invalid [expected 8 squares, received {}] in rank: {}",
                count,
                i + 1
            )));
        }
    }
    if white_kings != 1 || black_kings != 1 {
        return Err(FenError::Validation(format!(
            "1st field (piece positions) is invalid [expected exactly one king per color, received {} white and {} black]",
            white_kings, black_kings
        )));
    }

    if parts[1] != "w" && parts[1] != "b" {
        return Err(FenError::Validation(format!(
            "2nd field (active player) is invalid [expected 'w' or 'b', received {}]",
            parts[1]
        )));
    }

    if parts[2] != "-"
        && (parts[2].is_empty() || !parts[2].chars().all(|ch| "KQkq".contains(ch)))
    {
        return Err(FenError::Validation(format!(
            "3rd field (castling rights) is invalid [expected subset of 'KQkq' or '-', received {}]",
            parts[2]
        )));
    }

    if parts[3] != "-" && Square::parse(parts[3]).is_none() {
        return Err(FenError::Validation(format!(
            "4th field (en passant target) is invalid [expected a square or '-', received {}]",
            parts[3]
        )));
    }

    if parts[4].parse::<u32>().is_err() {
        return Err(FenError::Validation(format!(
            "5th field (half move clock) is invalid [expected an integer, received {}]",
            parts[4]
        )));
    }
    if parts[5].parse::<u32>().is_err() {
        return Err(FenError::Validation(format!(
            "6th field (full move number) is invalid [expected an integer, received {}]",
            parts[5]
        )));
    }

    Ok(())
}

pub fn parse_fen(fen: &str) -> Result<ParsedFen, FenError> {
    validate_fen(fen)?;
    let parts: Vec<&str> = fen.split_whitespace().collect();

    let mut board = Board::empty();
    for (row, rank_desc) in parts[0].split('/').enumerate() {
        let mut file = 0u8;
        for ch in rank_desc.chars() {
            if let Some(n) = ch.to_digit(10) {
                file += n as u8;
            } else {
                let piece = Piece::from_fen_code(ch).ok_or(FenError::InvalidPiece)?;
                let square = Square::new(file, row as u8).ok_or(FenError::Invalid)?;
                board.set(square, piece);
                file += 1;
            }
        }
    }

    let turn = Color::from_code(parts[1].chars().next().ok_or(FenError::Invalid)?)
        .ok_or(FenError::Invalid)?;

    let mut castling = CastlingRights::none();
    for ch in parts[2].chars() {
        match ch {
            'K' => castling.white_king_side = true,
            'Q' => castling.white_queen_side = true,
            'k' => castling.black_king_side = true,
            'q' => castling.black_queen_side = true,
            _ => {}
        }
    }

    let en_passant = if parts[3] == "-" {
        None
    } else {
        Some(Square::parse(parts[3]).ok_or(FenError::Invalid)?)
    };

    Ok(ParsedFen {
        board,
        turn,
        castling,
        en_passant,
        half_moves: parts[4].parse().map_err(|_| FenError::Invalid)?,
        full_moves: parts[5].parse().map_err(|_| FenError::Invalid)?,
    })
}

pub fn encode_fen(state: &ParsedFen) -> String {
    let mut placement = String::new();
    for row in 0..8u8 {
        let mut empties = 0u8;
        for file in 0..8u8 {
            let square = Square::new_unchecked(file, row);
            if let Some(piece) = state.board.piece_at(square) {
                if empties > 0 {
                    placement.push(char::from_digit(u32::from(empties), 10).unwrap_or('1'));
                    empties = 0;
                }
                placement.push(piece.fen_code());
            } else {
                empties += 1;
            }
        }
        if empties > 0 {
            placement.push(char::from_digit(u32::from(empties), 10).unwrap_or('1'));
        }
        if row < 7 {
            placement.push('/');
        }
    }

    let mut castling = String::new();
    if state.castling.white_king_side {
        castling.push('K');
    }
    if state.castling.white_queen_side {
        castling.push('Q');
    }
    if state.castling.black_king_side {
        castling.push('k');
    }
    if state.castling.black_queen_side {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    format!(
        "{} {} {} {} {} {}",
        placement,
        state.turn.to_code(),
        castling,
        state
            .en_passant
            .map(|square| square.to_string())
            .unwrap_or_else(|| "-".to_string()),
        state.half_moves,
        state.full_moves
    )
}
