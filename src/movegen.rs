use arrayvec::ArrayVec;

use crate::board::Board;
use crate::position::Position;
use crate::types::{
    CastlingRights, CastlingSide, Color, Move, MoveList, Piece, PieceType, Square,
};

pub const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
pub const KING_DIRS: [(i8, i8); 8] = [
    (1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (-1, 1),
    (1, -1),
];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// All moves obeying piece movement rules for `turn`, ignoring whether
/// the mover's own king is left attacked. `exclude` skips whole piece
/// types; the attack detector passes the king here so king-square
/// attacks never recurse into castling generation.
pub fn generate_pseudo_legal_moves(
    board: &Board,
    turn: Color,
    en_passant: Option<Square>,
    rights: CastlingRights,
    exclude: &[PieceType],
) -> MoveList {
    let mut moves = MoveList::new();
    for (square, piece) in board.pieces() {
        if piece.color != turn || exclude.contains(&piece.piece_type) {
            continue;
        }
        piece_moves(board, en_passant, rights, square, piece, &mut moves);
    }
    moves
}

/// Filters pseudo-legal moves down to the moves `turn` may actually
/// play: each candidate is applied, the mover's king is tested for
/// attack, and the board is restored.
pub fn generate_legal_moves(
    board: &mut Board,
    turn: Color,
    en_passant: Option<Square>,
    rights: CastlingRights,
) -> MoveList {
    let pseudo = generate_pseudo_legal_moves(board, turn, en_passant, rights, &[]);
    let mut legal = MoveList::new();
    for mv in pseudo {
        let undo = apply_move_on_board(board, &mv);
        let safe = !in_check(board, en_passant, turn);
        undo_move_on_board(board, undo);
        if safe {
            legal.push(mv);
        }
    }
    legal
}

pub fn generate_legal_moves_from_position(position: &Position) -> MoveList {
    let mut board = position.board.clone();
    generate_legal_moves(&mut board, position.turn, position.en_passant, position.castling)
}

/// The legal moves whose origin is `square`, for pointer-driven callers.
pub fn generate_moves_for_square(position: &Position, square: Square) -> MoveList {
    let mut out = MoveList::new();
    for mv in position.legal_moves() {
        if mv.from == square {
            out.push(mv.clone());
        }
    }
    out
}

/// Whether `square` appears as a destination of some pseudo-legal move
/// for `by`. Kings are skipped; king adjacency is handled structurally
/// by the king generator. Matches on destination equality so attacks on
/// empty squares (castling safety) are seen too.
pub fn is_square_attacked(
    board: &Board,
    en_passant: Option<Square>,
    square: Square,
    by: Color,
) -> bool {
    let mut scratch = MoveList::new();
    for (src, piece) in board.pieces() {
        if piece.color != by || piece.piece_type == PieceType::King {
            continue;
        }
        scratch.clear();
        piece_moves(board, en_passant, CastlingRights::none(), src, piece, &mut scratch);
        if scratch.iter().any(|mv| mv.to == square) {
            return true;
        }
    }
    false
}

pub fn in_check(board: &Board, en_passant: Option<Square>, turn: Color) -> bool {
    board
        .king_square(turn)
        .map(|square| is_square_attacked(board, en_passant, square, turn.opposite()))
        .unwrap_or(false)
}

fn piece_moves(
    board: &Board,
    en_passant: Option<Square>,
    rights: CastlingRights,
    from: Square,
    piece: Piece,
    out: &mut MoveList,
) {
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, en_passant, from, piece, out),
        PieceType::Knight => step_moves(board, from, piece, &KNIGHT_OFFSETS, out),
        PieceType::Bishop => ray_moves(board, from, piece, &DIAGONAL_DIRS, out),
        PieceType::Rook => ray_moves(board, from, piece, &ORTHOGONAL_DIRS, out),
        PieceType::Queen => {
            ray_moves(board, from, piece, &DIAGONAL_DIRS, out);
            ray_moves(board, from, piece, &ORTHOGONAL_DIRS, out);
        }
        PieceType::King => king_moves(board, en_passant, rights, from, piece, out),
    }
}

fn pawn_moves(
    board: &Board,
    en_passant: Option<Square>,
    from: Square,
    pawn: Piece,
    out: &mut MoveList,
) {
    let (dy, home_row) = match pawn.color {
        Color::White => (-1i8, 6u8),
        Color::Black => (1i8, 1u8),
    };

    if let Some(one) = offset_square(from, 0, dy) {
        if board.is_empty_square(one) {
            push_pawn_move(out, Move::new(from, one));
            if from.row == home_row {
                if let Some(two) = offset_square(from, 0, 2 * dy) {
                    if board.is_empty_square(two) {
                        out.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    for dx in [-1i8, 1] {
        let Some(to) = offset_square(from, dx, dy) else {
            continue;
        };
        if let Some(target) = board.piece_at(to) {
            if target.color != pawn.color {
                push_pawn_move(out, Move::capture(from, to, target));
            }
        }
        if Some(to) == en_passant {
            let mut mv = Move::new(from, to);
            mv.en_passant = Some(to);
            // the captured pawn sits beside the destination, on the
            // mover's own row
            mv.captured = board.piece_at(Square::new_unchecked(to.file, from.row));
            out.push(mv);
        }
    }
}

/// A pawn reaching the farthest rank always expands into the four
/// promotion choices; a non-promoting last-rank move is never produced.
fn push_pawn_move(out: &mut MoveList, mv: Move) {
    if mv.to.row == 0 || mv.to.row == 7 {
        for promotion in PieceType::PROMOTIONS {
            let mut promoting = mv.clone();
            promoting.promotion = Some(promotion);
            out.push(promoting);
        }
    } else {
        out.push(mv);
    }
}

fn step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    out: &mut MoveList,
) {
    for &(dx, dy) in offsets {
        let Some(to) = offset_square(from, dx, dy) else {
            continue;
        };
        match board.piece_at(to) {
            None => {
                out.push(Move::new(from, to));
            }
            Some(target) if target.color != piece.color => {
                out.push(Move::capture(from, to, target));
            }
            Some(_) => {}
        }
    }
}

fn ray_moves(board: &Board, from: Square, piece: Piece, dirs: &[(i8, i8)], out: &mut MoveList) {
    for &(dx, dy) in dirs {
        let mut next = offset_square(from, dx, dy);
        while let Some(to) = next {
            match board.piece_at(to) {
                None => {
                    out.push(Move::new(from, to));
                    next = offset_square(to, dx, dy);
                }
                Some(target) => {
                    if target.color != piece.color {
                        out.push(Move::capture(from, to, target));
                    }
                    break;
                }
            }
        }
    }
}

fn king_moves(
    board: &Board,
    en_passant: Option<Square>,
    rights: CastlingRights,
    from: Square,
    king: Piece,
    out: &mut MoveList,
) {
    let mut steps = MoveList::new();
    step_moves(board, from, king, &KING_DIRS, &mut steps);

    // a king may never step next to the opposing king
    if let Some(enemy_king) = board.king_square(king.color.opposite()) {
        steps.retain(|mv| {
            mv.to.file.abs_diff(enemy_king.file) > 1 || mv.to.row.abs_diff(enemy_king.row) > 1
        });
    }
    for mv in steps {
        out.push(mv);
    }

    castling_moves(board, en_passant, rights, from, king, out);
}

fn castling_moves(
    board: &Board,
    en_passant: Option<Square>,
    rights: CastlingRights,
    from: Square,
    king: Piece,
    out: &mut MoveList,
) {
    let enemy = king.color.opposite();

    if rights.king_side(king.color) && !in_check(board, en_passant, king.color) {
        if let (Some(step), Some(target)) = (offset_square(from, 1, 0), offset_square(from, 2, 0))
        {
            if board.is_empty_square(step)
                && board.is_empty_square(target)
                && !is_square_attacked(board, en_passant, step, enemy)
                && !is_square_attacked(board, en_passant, target, enemy)
            {
                let mut mv = Move::new(from, target);
                mv.castling = Some(CastlingSide::KingSide);
                out.push(mv);
            }
        }
    }

    if rights.queen_side(king.color) && !in_check(board, en_passant, king.color) {
        if let (Some(step), Some(target), Some(rook_path)) = (
            offset_square(from, -1, 0),
            offset_square(from, -2, 0),
            offset_square(from, -3, 0),
        ) {
            // three empty squares between king and rook, but only the
            // two king-transit squares need to be safe
            if board.is_empty_square(step)
                && board.is_empty_square(target)
                && board.is_empty_square(rook_path)
                && !is_square_attacked(board, en_passant, step, enemy)
                && !is_square_attacked(board, en_passant, target, enemy)
            {
                let mut mv = Move::new(from, target);
                mv.castling = Some(CastlingSide::QueenSide);
                out.push(mv);
            }
        }
    }
}

fn offset_square(square: Square, dx: i8, dy: i8) -> Option<Square> {
    let file = i8::try_from(square.file).ok()? + dx;
    let row = i8::try_from(square.row).ok()? + dy;
    if (0..8).contains(&file) && (0..8).contains(&row) {
        Some(Square::new_unchecked(file as u8, row as u8))
    } else {
        None
    }
}

/// Snapshot of every square a trial move touches, restored verbatim by
/// `undo_move_on_board`.
#[derive(Debug, Clone)]
struct BoardUndo {
    squares: ArrayVec<(Square, Option<Piece>), 4>,
}

fn apply_move_on_board(board: &mut Board, mv: &Move) -> BoardUndo {
    let mut squares = ArrayVec::new();
    squares.push((mv.from, board.piece_at(mv.from)));
    squares.push((mv.to, board.piece_at(mv.to)));

    if mv.en_passant.is_some() {
        let captured_square = Square::new_unchecked(mv.to.file, mv.from.row);
        squares.push((captured_square, board.piece_at(captured_square)));
        board.take(captured_square);
    }

    if let Some(side) = mv.castling {
        let (rook_from_file, rook_to_file) = rook_files(side);
        let rook_from = Square::new_unchecked(rook_from_file, mv.from.row);
        let rook_to = Square::new_unchecked(rook_to_file, mv.from.row);
        squares.push((rook_from, board.piece_at(rook_from)));
        squares.push((rook_to, board.piece_at(rook_to)));
        if let Some(rook) = board.take(rook_from) {
            board.set(rook_to, rook);
        }
    }

    if let Some(mut moved) = board.take(mv.from) {
        if let Some(promotion) = mv.promotion {
            moved.piece_type = promotion;
        }
        board.set(mv.to, moved);
    }

    BoardUndo { squares }
}

fn undo_move_on_board(board: &mut Board, undo: BoardUndo) {
    for (square, spot) in undo.squares.into_iter().rev() {
        match spot {
            Some(piece) => board.set(square, piece),
            None => {
                board.take(square);
            }
        }
    }
}

pub const fn rook_files(side: CastlingSide) -> (u8, u8) {
    match side {
        CastlingSide::KingSide => (7, 5),
        CastlingSide::QueenSide => (0, 3),
    }
}
