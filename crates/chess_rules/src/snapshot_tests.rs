use super::*;
use serde_json::json;

fn sq(s: &str) -> Square {
    Square::from_coord(s).unwrap()
}

fn sample_game() -> Game {
    let mut game = Game::new();
    for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("g8", "f6")] {
        game.make_move(sq(from), sq(to)).unwrap();
    }
    game.undo().unwrap();
    game
}

fn sample_json() -> Value {
    let text = sample_game().snapshot().to_json().unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_round_trip_keeps_history_and_cursor() {
    let game = sample_game();
    let text = game.snapshot().to_json().unwrap();
    let loaded = GameSnapshot::from_json(&text);
    assert!(loaded.issues.is_empty(), "{:?}", loaded.issues);
    assert_eq!(loaded.snapshot, game.snapshot());

    let mut restored = Game::from_snapshot(loaded.snapshot);
    assert_eq!(restored.position(), game.position());
    assert_eq!(restored.captured(), game.captured());
    assert_eq!(restored.ply(), 3);
    assert!(restored.can_redo());
    let redone = restored.redo().unwrap().unwrap();
    assert_eq!(redone.notation, "Nf6");
}

#[test]
fn test_garbage_text_starts_new_game() {
    let (game, issues) = Game::load_json("this is not json");
    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], SnapshotIssue::NotAnObject(_)));
    assert_eq!(game.position(), &Position::startpos());
    assert!(game.history().is_empty());

    let loaded = GameSnapshot::from_json("[1, 2, 3]");
    assert_eq!(loaded.issues, vec![SnapshotIssue::NotAnObject("top level is an array".into())]);
}

#[test]
fn test_missing_field_defaults() {
    let mut v = sample_json();
    v.as_object_mut().unwrap().remove("captured");
    let loaded = GameSnapshot::from_json(&v.to_string());
    assert_eq!(loaded.issues, vec![SnapshotIssue::MissingField("captured")]);
    assert!(loaded.snapshot.captured.is_empty());
    assert_eq!(loaded.snapshot.history.len(), 4);
}

#[test]
fn test_malformed_field_defaults() {
    let mut v = sample_json();
    v["side_to_move"] = json!("purple");
    let loaded = GameSnapshot::from_json(&v.to_string());
    assert_eq!(loaded.issues.len(), 1);
    assert!(matches!(
        loaded.issues[0],
        SnapshotIssue::InvalidField { field: "side_to_move", .. }
    ));
    assert_eq!(loaded.snapshot.side_to_move, Color::White);
}

#[test]
fn test_king_squares_recomputed() {
    let mut v = sample_json();
    v["king_squares"]["white"] = json!([3, 3]);
    let loaded = GameSnapshot::from_json(&v.to_string());
    assert_eq!(loaded.issues, vec![SnapshotIssue::KingSquaresRepaired]);
    assert_eq!(loaded.snapshot.king_squares.white, sq("e1"));
}

#[test]
fn test_board_without_king_replaced() {
    let mut v = sample_json();
    v["position"][7][4] = Value::Null;
    let loaded = GameSnapshot::from_json(&v.to_string());
    assert!(
        loaded
            .issues
            .iter()
            .any(|i| matches!(i, SnapshotIssue::BoardReplaced(_)))
    );
    assert_eq!(loaded.snapshot.position, Board::starting());
}

#[test]
fn test_cursor_clamped() {
    let mut v = sample_json();
    v["history"]["cursor"] = json!(9);
    let loaded = GameSnapshot::from_json(&v.to_string());
    assert_eq!(loaded.issues, vec![SnapshotIssue::CursorClamped { cursor: 9, len: 4 }]);
    assert_eq!(loaded.snapshot.history.cursor(), Some(3));
}

#[test]
fn test_game_over_flag_without_reason_is_time_forfeit() {
    let mut v = sample_json();
    v["game_over"] = json!(true);
    let (game, issues) = Game::load_json(&v.to_string());
    assert!(issues.is_empty());
    // Black is to move in the sample, so Black is the side that flagged.
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.status(), GameStatus::TimeExpired { winner: Color::White });
}

#[test]
fn test_outcome_survives_reload() {
    let mut game = Game::new();
    game.make_move(sq("e2"), sq("e4")).unwrap();
    game.report_time_expired(Color::Black).unwrap();
    let text = game.snapshot().to_json().unwrap();
    let (restored, issues) = Game::load_json(&text);
    assert!(issues.is_empty());
    assert_eq!(restored.status(), GameStatus::TimeExpired { winner: Color::White });
}

#[test]
fn test_custom_initial_position_saved() {
    let pos = Position::from_symbols(Color::White, &[("e1", 'K'), ("e8", 'k'), ("a2", 'P')]).unwrap();
    let mut game = Game::from_position(pos.clone());
    game.make_move(sq("a2"), sq("a4")).unwrap();
    let snap = game.snapshot();
    assert_eq!(snap.initial_position.as_ref(), Some(&pos));

    let mut restored = Game::from_snapshot(snap);
    restored.undo().unwrap();
    assert_eq!(restored.position(), &pos);
}

#[test]
fn test_standard_game_omits_extensions() {
    let text = Game::new().snapshot().to_json().unwrap();
    let v: Value = serde_json::from_str(&text).unwrap();
    assert!(v.get("outcome").is_none());
    assert!(v.get("initial_position").is_none());
    assert_eq!(v["game_over"], json!(false));
}

#[test]
fn test_waiting_side_in_check_replaces_board() {
    let pos = Position::from_symbols(Color::White, &[("e1", 'K'), ("a1", 'R'), ("h8", 'k')]).unwrap();
    let mut game = Game::from_position(pos);
    game.make_move(sq("a1"), sq("a8")).unwrap();
    let mut v: Value = serde_json::from_str(&game.snapshot().to_json().unwrap()).unwrap();
    // Hand the move back to White while the black king stands in check.
    v["side_to_move"] = json!("white");

    let (restored, issues) = Game::load_json(&v.to_string());
    assert!(
        issues
            .iter()
            .any(|i| matches!(i, SnapshotIssue::BoardReplaced(_)))
    );
    assert_eq!(restored.position().board(), &Board::starting());
    assert_eq!(restored.position().board().kings(Color::Black).len(), 1);
}
