use super::*;

fn sq(s: &str) -> Square {
    Square::from_coord(s).unwrap()
}

fn setup(side: Color, pieces: &[(&str, char)]) -> Position {
    Position::from_symbols(side, pieces).unwrap()
}

fn commit(pos: &mut Position, from: &str, to: &str) -> MoveRecord {
    match execute(pos, sq(from), sq(to)) {
        Ok(Execution::Committed(record)) => record,
        other => panic!("{from}{to} did not commit: {other:?}"),
    }
}

#[test]
fn test_kingside_castle_moves_rook() {
    let mut pos = setup(Color::White, &[("e1", 'K'), ("h1", 'R'), ("a1", 'R'), ("e8", 'k')]);
    let record = commit(&mut pos, "e1", "g1");

    assert_eq!(
        record.special,
        Some(SpecialMove::Castling {
            rook_from: sq("h1"),
            rook_to: sq("f1"),
        })
    );
    assert_eq!(record.notation, "O-O");
    assert_eq!(pos.king_square(Color::White), sq("g1"));
    assert_eq!(pos.piece_at(sq("h1")), None);
    let rook = pos.piece_at(sq("f1")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(rook.has_moved);
    assert!(!pos.castling.allows(Color::White, CastleSide::Queenside));
    assert_eq!(pos.side_to_move, Color::Black);
    assert_eq!(record.snapshot, pos);
}

#[test]
fn test_queenside_castle_moves_rook() {
    let mut pos = setup(Color::Black, &[("e8", 'k'), ("a8", 'r'), ("e1", 'K')]);
    let record = commit(&mut pos, "e8", "c8");
    assert_eq!(record.notation, "O-O-O");
    assert_eq!(pos.piece_at(sq("d8")).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(pos.piece_at(sq("a8")), None);
    assert_eq!(pos.king_square(Color::Black), sq("c8"));
}

#[test]
fn test_en_passant_removes_pawn_behind_target() {
    let mut pos = Position::startpos();
    commit(&mut pos, "e2", "e4");
    commit(&mut pos, "a7", "a6");
    commit(&mut pos, "e4", "e5");
    let push = commit(&mut pos, "d7", "d5");
    assert_eq!(push.notation, "d5");
    assert_eq!(pos.en_passant, Some(sq("d6")));

    let record = commit(&mut pos, "e5", "d6");
    assert_eq!(
        record.special,
        Some(SpecialMove::EnPassant {
            captured_square: sq("d5"),
        })
    );
    assert_eq!(record.captured.map(|p| (p.kind, p.color)), Some((PieceKind::Pawn, Color::Black)));
    assert_eq!(record.notation, "exd6");
    assert_eq!(pos.piece_at(sq("d5")), None);
    assert_eq!(pos.en_passant, None);
}

#[test]
fn test_illegal_move_leaves_position_untouched() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    let err = execute(&mut pos, sq("e2"), sq("e5")).unwrap_err();
    assert_eq!(
        err,
        ChessError::IllegalMove {
            from: sq("e2"),
            to: sq("e5"),
        }
    );
    assert_eq!(pos, before);
}

#[test]
fn test_promotion_is_two_step() {
    let mut pos = setup(Color::White, &[("a7", 'P'), ("e1", 'K'), ("h7", 'k')]);
    let before = pos.clone();

    let pending = match execute(&mut pos, sq("a7"), sq("a8")).unwrap() {
        Execution::PendingPromotion(p) => p,
        other => panic!("expected pending promotion, got {other:?}"),
    };
    assert_eq!(pending.square(), sq("a8"));
    assert_eq!(pending.color, Color::White);
    assert_eq!(pos, before, "requesting a promotion mutates nothing");

    let err = complete_promotion(&mut pos, &pending, PieceKind::King).unwrap_err();
    assert_eq!(err, ChessError::InvalidPromotionChoice(PieceKind::King));
    assert_eq!(pos, before);

    let record = complete_promotion(&mut pos, &pending, PieceKind::Knight).unwrap();
    assert_eq!(record.special, Some(SpecialMove::Promotion { kind: PieceKind::Knight }));
    assert_eq!(record.moved_kind, PieceKind::Pawn);
    assert_eq!(record.notation, "a8=N");
    assert_eq!(pos.piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(pos.piece_at(sq("a7")), None);
}

#[test]
fn test_promotion_with_capture_and_check() {
    let mut pos = setup(Color::White, &[("g7", 'P'), ("h8", 'r'), ("e1", 'K'), ("d8", 'k')]);
    let pending = begin_promotion(&pos, sq("g7"), sq("h8")).unwrap();
    let record = complete_promotion(&mut pos, &pending, PieceKind::Queen).unwrap();
    assert_eq!(record.notation, "gxh8=Q+");
    assert_eq!(record.captured.map(|p| p.kind), Some(PieceKind::Rook));
}

#[test]
fn test_begin_promotion_rejects_ordinary_moves() {
    let pos = Position::startpos();
    assert!(begin_promotion(&pos, sq("e2"), sq("e4")).is_err());
}

#[test]
fn test_rook_capture_in_corner_revokes_right() {
    let mut pos = setup(
        Color::White,
        &[("e1", 'K'), ("e8", 'k'), ("h8", 'r'), ("a8", 'r'), ("b2", 'B')],
    );
    commit(&mut pos, "b2", "h8");
    assert!(!pos.castling.allows(Color::Black, CastleSide::Kingside));
    assert!(pos.castling.allows(Color::Black, CastleSide::Queenside));
    assert!(pos.castling.allows(Color::White, CastleSide::Kingside));
}

#[test]
fn test_rook_move_revokes_own_side_only() {
    let mut pos = setup(Color::White, &[("e1", 'K'), ("a1", 'R'), ("h1", 'R'), ("e8", 'k')]);
    commit(&mut pos, "a1", "a4");
    assert!(!pos.castling.allows(Color::White, CastleSide::Queenside));
    assert!(pos.castling.allows(Color::White, CastleSide::Kingside));
}

#[test]
fn test_notation_disambiguates() {
    let mut files = setup(
        Color::White,
        &[("e1", 'K'), ("e8", 'k'), ("b1", 'N'), ("f3", 'N')],
    );
    assert_eq!(commit(&mut files, "b1", "d2").notation, "Nbd2");

    let mut ranks = setup(
        Color::White,
        &[("h2", 'K'), ("h8", 'k'), ("a1", 'R'), ("a5", 'R')],
    );
    assert_eq!(commit(&mut ranks, "a1", "a3").notation, "R1a3");
}

#[test]
fn test_notation_marks_mate() {
    let mut pos = Position::startpos();
    commit(&mut pos, "f2", "f3");
    commit(&mut pos, "e7", "e5");
    commit(&mut pos, "g2", "g4");
    let record = commit(&mut pos, "d8", "h4");
    assert_eq!(record.notation, "Qh4#");
    assert_eq!(record.color, Color::Black);
    assert_eq!(record.moved_kind, PieceKind::Queen);
}

#[test]
fn test_has_moved_set_on_first_move() {
    let mut pos = Position::startpos();
    assert!(!pos.piece_at(sq("g1")).unwrap().has_moved);
    commit(&mut pos, "g1", "f3");
    assert!(pos.piece_at(sq("f3")).unwrap().has_moved);
}
