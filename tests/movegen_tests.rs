use fianchetto::{
    generate_moves_for_square, generate_pseudo_legal_moves, in_check, is_square_attacked,
    move_to_uci, CastlingSide, Color, Move, PieceType, Position, Square,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PerftBaseline {
    fen: String,
    depth: u8,
    nodes: u64,
}

fn sq(name: &str) -> Square {
    Square::parse(name).expect("valid square")
}

fn perft(position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    if depth == 1 {
        return position.legal_moves().len() as u64;
    }

    let moves: Vec<Move> = position.legal_moves().to_vec();
    let mut nodes = 0u64;
    for mv in &moves {
        position.push(mv).expect("generated move must push");
        nodes += perft(position, depth - 1);
        position.undo();
    }
    nodes
}

fn load_baselines() -> Vec<PerftBaseline> {
    let fixture_path = format!(
        "{}/tests/fixtures/perft_baselines.json",
        env!("CARGO_MANIFEST_DIR")
    );
    let fixture = std::fs::read_to_string(fixture_path).expect("read fixture");
    serde_json::from_str(&fixture).expect("parse fixture")
}

#[test]
fn starting_position_has_twenty_moves() {
    let position = Position::new();
    assert_eq!(position.legal_moves().len(), 20);

    // sixteen pawn moves, four knight moves
    assert_eq!(generate_moves_for_square(&position, sq("e2")).len(), 2);
    assert_eq!(generate_moves_for_square(&position, sq("b1")).len(), 2);
    assert_eq!(generate_moves_for_square(&position, sq("e1")).len(), 0);
    assert_eq!(generate_moves_for_square(&position, sq("d8")).len(), 0);
}

#[test]
fn perft_matches_baselines_up_to_depth_3() {
    for baseline in load_baselines().into_iter().filter(|b| b.depth <= 3) {
        let mut position = Position::from_fen(&baseline.fen).expect("valid fen");
        let actual = perft(&mut position, baseline.depth);
        assert_eq!(
            actual, baseline.nodes,
            "fen={}, depth={}",
            baseline.fen, baseline.depth
        );
    }
}

#[test]
fn perft_depth_4_matches_baseline() {
    for baseline in load_baselines().into_iter().filter(|b| b.depth == 4) {
        let mut position = Position::from_fen(&baseline.fen).expect("valid fen");
        let actual = perft(&mut position, baseline.depth);
        assert_eq!(
            actual, baseline.nodes,
            "fen={}, depth={}",
            baseline.fen, baseline.depth
        );
    }
}

#[test]
fn rook_attacks_along_open_lines_only() {
    let position = Position::from_fen("k7/8/8/8/8/8/8/K6R w - - 0 0").unwrap();
    let board = &position.board;

    assert!(is_square_attacked(board, None, sq("h5"), Color::White));
    assert!(is_square_attacked(board, None, sq("h8"), Color::White));
    assert!(is_square_attacked(board, None, sq("b1"), Color::White));
    assert!(!is_square_attacked(board, None, sq("g3"), Color::White));
    // kings are never part of attack generation
    assert!(!is_square_attacked(board, None, sq("b2"), Color::White));
}

#[test]
fn in_check_sees_rook_on_back_rank() {
    let position = Position::from_fen("k6R/8/8/8/8/8/8/K7 b - - 0 0").unwrap();
    assert!(in_check(&position.board, None, Color::Black));
    assert!(!in_check(&position.board, None, Color::White));
    assert!(position.in_check(None));
    assert!(!position.is_checkmate());
}

#[test]
fn kings_never_step_adjacent() {
    let position = Position::from_fen("8/8/8/3k4/8/3K4/8/8 w - - 0 0").unwrap();
    let moves = position.legal_moves();

    assert_eq!(moves.len(), 5);
    for square in ["c4", "d4", "e4"] {
        assert!(
            moves.iter().all(|mv| mv.to != sq(square)),
            "king must not approach enemy king via {square}"
        );
    }
}

#[test]
fn pawn_pushes_to_last_rank_always_promote() {
    let position = Position::from_fen("k7/6P1/8/8/8/8/8/K7 w - - 0 0").unwrap();
    let pawn_moves = generate_moves_for_square(&position, sq("g7"));

    assert_eq!(pawn_moves.len(), 4);
    assert!(pawn_moves.iter().all(|mv| mv.promotion.is_some()));
    for promotion in PieceType::PROMOTIONS {
        assert!(pawn_moves.iter().any(|mv| mv.promotion == Some(promotion)));
    }
}

#[test]
fn pawn_captures_to_last_rank_promote_too() {
    let position = Position::from_fen("k6r/6P1/8/8/8/8/8/K7 w - - 0 0").unwrap();
    let pawn_moves = generate_moves_for_square(&position, sq("g7"));

    // four pushes to g8 plus four captures of the h8 rook
    assert_eq!(pawn_moves.len(), 8);
    assert!(pawn_moves.iter().all(|mv| mv.promotion.is_some()));

    let captures: Vec<&Move> = pawn_moves.iter().filter(|mv| mv.is_capture()).collect();
    assert_eq!(captures.len(), 4);
    for mv in captures {
        assert_eq!(mv.to, sq("h8"));
        assert_eq!(
            mv.captured.map(|piece| piece.piece_type),
            Some(PieceType::Rook)
        );
    }
}

#[test]
fn densest_known_position_fits_the_move_list() {
    // the record-holding legal-move count; generation must hold all of
    // it without nearing list capacity
    let position =
        Position::from_fen("R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1").unwrap();
    assert_eq!(position.legal_moves().len(), 218);
}

#[test]
fn king_side_castling_is_generated_when_path_is_clear() {
    let position = Position::from_fen("k7/8/8/8/8/8/8/4K2R w K - 0 0").unwrap();
    let castle = position
        .legal_moves()
        .iter()
        .find(|mv| mv.castling == Some(CastlingSide::KingSide));
    let castle = castle.expect("castling must be generated");
    assert_eq!(move_to_uci(castle), "e1g1");
}

#[test]
fn castling_rejected_through_or_into_attacked_square() {
    // f1 attacked even though e1 is not
    let through = Position::from_fen("k4r2/8/8/8/8/8/8/4K2R w K - 0 0").unwrap();
    assert!(!through.in_check(None));
    assert!(through.legal_moves().iter().all(|mv| mv.castling.is_none()));

    // g1 (the destination) attacked
    let into = Position::from_fen("k5r1/8/8/8/8/8/8/4K2R w K - 0 0").unwrap();
    assert!(into.legal_moves().iter().all(|mv| mv.castling.is_none()));

    // king currently in check
    let checked = Position::from_fen("k3r3/8/8/8/8/8/8/4K2R w K - 0 0").unwrap();
    assert!(checked.in_check(None));
    assert!(checked.legal_moves().iter().all(|mv| mv.castling.is_none()));
}

#[test]
fn castling_rejected_when_path_is_occupied() {
    let position = Position::from_fen("k7/8/8/8/8/8/8/4K1NR w K - 0 0").unwrap();
    assert!(position.legal_moves().iter().all(|mv| mv.castling.is_none()));
}

#[test]
fn queen_side_castling_ignores_attack_on_rook_path() {
    // b1 is attacked, but only the two king-transit squares matter
    let position = Position::from_fen("kr6/8/8/8/8/8/8/R3K3 w Q - 0 0").unwrap();
    let castle = position
        .legal_moves()
        .iter()
        .find(|mv| mv.castling == Some(CastlingSide::QueenSide));
    let castle = castle.expect("queen-side castling must be generated");
    assert_eq!(move_to_uci(castle), "e1c1");
}

#[test]
fn exclude_filters_whole_piece_types() {
    let position = Position::from_fen("k7/8/8/8/8/8/8/K7 w - - 0 0").unwrap();
    let moves = generate_pseudo_legal_moves(
        &position.board,
        Color::White,
        None,
        fianchetto::CastlingRights::none(),
        &[PieceType::King],
    );
    assert!(moves.is_empty());
}
