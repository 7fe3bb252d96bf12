pub mod board;
pub mod constants;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod position;
pub mod types;
pub mod uci;

pub use board::Board;
pub use constants::SQUARES;
pub use fen::{encode_fen, parse_fen, validate_fen, FenError, ParsedFen, STANDARD_POSITION};
pub use game::Chess;
pub use movegen::{
    generate_legal_moves, generate_legal_moves_from_position, generate_moves_for_square,
    generate_pseudo_legal_moves, in_check, is_square_attacked,
};
pub use position::{HistoryEntry, Position, PositionError};
pub use types::{
    CastlingRights, CastlingSide, Color, Move, MoveList, Piece, PieceType, Square,
};
pub use uci::{move_to_uci, parse_uci, UciError};
