// SPDX-License-Identifier: MIT OR Apache-2.0

use challenchess_core::*;
use proptest::prelude::*;

fn options(seed: Seed) -> LevelOptions {
    LevelOptions {
        x_fields_min: 4,
        x_fields_max: 12,
        y_fields_min: 4,
        y_fields_max: 12,
        step_count_min: 1,
        step_count_max: 20,
        seed: Some(seed),
        replace_after_capture: true,
    }
}

/// Play the generated chain from start to target
fn replay(opts: LevelOptions) -> GameSession {
    let mut session = GameSession::new(opts).unwrap();
    let chain = session.level().chain();
    for &to in chain.iter().skip(1) {
        session.apply_move(to).unwrap_or_else(|e| panic!("chain move to {} failed: {}", to, e));
    }
    session
}

#[test]
fn same_seed_same_level() {
    for seed in [Seed::from("retry"), Seed::from(42.0), Seed::from("ünïcödé ♞")] {
        let a = generate_level(&options(seed.clone())).unwrap();
        let b = generate_level(&options(seed)).unwrap();
        assert_eq!(a, b);
        let pieces_a: Vec<&Piece> = a.board.pieces().map(|(_, p)| p).collect();
        let pieces_b: Vec<&Piece> = b.board.pieces().map(|(_, p)| p).collect();
        assert_eq!(pieces_a, pieces_b);
    }
}

#[test]
fn consecutive_numeric_seeds_diverge() {
    let levels: Vec<Board> = (1..=50)
        .map(|n| generate_level(&options(Seed::Number(n as f64))).unwrap().board)
        .collect();
    for pair in levels.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn replay_from_reported_seed() {
    let first = generate_level(&LevelOptions::default()).unwrap();
    let again = generate_level(&LevelOptions::default().with_seed(first.seed)).unwrap();
    assert_eq!(first, again);
}

#[test]
fn generated_level_is_solvable() {
    let session = replay(LevelOptions::default().with_seed("solvable"));
    assert_eq!(session.status(), GameStatus::Solved);
}

#[test]
fn start_and_target_markers() {
    let level = generate_level(&LevelOptions::default().with_seed(9.0)).unwrap();
    assert_eq!(level.board.start(), Some(level.start));
    assert_eq!(level.board.target(), Some(level.target));

    let king = level.board.piece_at(level.target).unwrap();
    assert_eq!((king.kind, king.color), (PieceKind::King, Color::Black));
    assert_eq!(level.board.piece(level.current).unwrap().coord, level.start);
}

#[test]
fn colors_alternate_along_chain() {
    let level = generate_level(&LevelOptions::default().with_seed("colors")).unwrap();
    let colors: Vec<Color> = level.board.pieces().map(|(_, p)| p.color).collect();
    for pair in colors.windows(2) {
        assert_eq!(pair[1], pair[0].opposite());
    }
}

#[test]
fn walk_stops_when_no_origin_is_left() {
    for n in 1..=5 {
        let opts = LevelOptions {
            x_fields_min: 4,
            x_fields_max: 4,
            y_fields_min: 4,
            y_fields_max: 4,
            step_count_min: 200,
            step_count_max: 200,
            seed: Some(Seed::Number(n as f64)),
            replace_after_capture: true,
        };
        let level = generate_level(&opts).unwrap();
        // 16 fields hold at most 15 pieces besides the king
        assert!(level.steps < 16);
        assert_eq!(level.board.piece_count(), level.steps + 1);
        assert!(level.board.is_consistent());

        let session = replay(opts);
        assert_eq!(session.status(), GameStatus::Solved);
        assert_eq!(session.moves_made(), level.steps);
    }
}

#[test]
fn text_seed_folding_to_zero_is_reproducible() {
    let a = generate_level(&LevelOptions::default().with_seed("\u{1}abc")).unwrap();
    let b = generate_level(&LevelOptions::default().with_seed("\u{1}abc")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_options_are_rejected() {
    let opts = LevelOptions { x_fields_min: 10, x_fields_max: 5, ..Default::default() };
    assert!(matches!(generate_level(&opts), Err(GameError::InvalidOptions(_))));
    assert!(GameSession::new(opts).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn walk_respects_bounds(seed in "[a-zA-Z0-9]{1,12}", min in 0u16..10, extra in 0u16..10) {
        let opts = LevelOptions {
            step_count_min: min,
            step_count_max: min + extra,
            ..options(Seed::Text(seed))
        };
        let level = generate_level(&opts).unwrap();

        prop_assert!(level.board.width() >= 4 && level.board.width() <= 12);
        prop_assert!(level.board.height() >= 4 && level.board.height() <= 12);
        prop_assert!(level.steps <= (min + extra) as usize);
        prop_assert_eq!(level.board.piece_count(), level.steps + 1);
        prop_assert!(level.board.is_consistent());
    }

    #[test]
    fn chains_replay_to_the_target(seed in 1.0f64..1.0e6) {
        let session = replay(options(Seed::Number(seed)));
        prop_assert_eq!(session.status(), GameStatus::Solved);
        prop_assert!(session.board().is_consistent());
    }

    #[test]
    fn any_move_keeps_board_consistent(seed in 1.0f64..1.0e6, picks in proptest::collection::vec(0usize..64, 1..12)) {
        let mut session = GameSession::new(options(Seed::Number(seed))).unwrap();
        for pick in picks {
            if session.status() != GameStatus::InProgress {
                break;
            }
            let moves = session.legal_moves();
            let to = moves[pick % moves.len()];
            session.apply_move(to).unwrap();
            prop_assert!(session.board().is_consistent());
            let current = session.current_piece().unwrap();
            prop_assert_eq!(session.board().piece_id_at(current.coord), Some(session.current_id()));
        }
    }
}
