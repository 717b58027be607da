use draughts_core::engine::clock::Deadline;
use draughts_core::engine::config::{Algorithm, EngineConfig};
use draughts_core::engine::search::{AlphaBetaEngine, SearchContext};
use draughts_core::engine::{SearchLimit, Searcher, INFINITY};
use draughts_core::error::EngineError;
use draughts_core::logic::board::{Board, Color, Piece};
use draughts_core::logic::position::Position;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

fn engine_with(seed: u64, algorithm: Algorithm) -> AlphaBetaEngine {
    AlphaBetaEngine::new(Arc::new(EngineConfig {
        seed: Some(seed),
        algorithm,
        ..EngineConfig::default()
    }))
}

fn engine(seed: u64) -> AlphaBetaEngine {
    engine_with(seed, Algorithm::AlphaBeta)
}

fn position(turn: Color, pieces: &[(&str, Piece)]) -> Position {
    let mut board = Board::empty();
    for &(name, piece) in pieces {
        board.set(name.parse().unwrap(), Some(piece));
    }
    Position::new(board, turn)
}

/// Positions reached by random play from the initial setup, including
/// thinned-out endgames where wins and losses fall within a few plies.
fn sample_positions() -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut positions = Vec::new();
    for game in 0..6 {
        let mut pos = Position::new(Board::initial(), Color::Red);
        for ply in 0..200 {
            if ply % 15 == game % 3 {
                positions.push(pos.clone());
            }
            let moves = pos.generate_moves().unwrap();
            let Some(mv) = moves.choose(&mut rng) else {
                positions.push(pos.clone());
                break;
            };
            pos.play(mv).unwrap();
        }
    }
    positions
}

#[test]
fn test_alphabeta_agrees_with_minimax() {
    let engine = engine(0);
    for pos in sample_positions() {
        for depth in 1..=3 {
            let mut ctx = SearchContext::unlimited(0);
            let plain = engine.minimax(&pos, depth, &mut ctx).unwrap().unwrap();
            let pruned = engine
                .alphabeta(&pos, depth, -INFINITY, INFINITY, &mut ctx)
                .unwrap()
                .unwrap();
            // Pruned search shifts decided scores by distance; clamp them back.
            assert_eq!(pruned.clamp(-INFINITY, INFINITY), plain, "{pos:?} at depth {depth}");
        }
    }
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    let engine = engine(0);
    let pos = Position::new(Board::initial(), Color::Red);
    let mut plain = SearchContext::unlimited(0);
    let mut pruned = SearchContext::unlimited(0);
    engine.minimax(&pos, 4, &mut plain).unwrap();
    engine
        .alphabeta(&pos, 4, -INFINITY, INFINITY, &mut pruned)
        .unwrap();
    assert!(pruned.nodes() <= plain.nodes());
}

#[test]
fn test_timed_search_returns_supplied_move() {
    let mut engine = engine(3);
    let pos = Position::new(Board::initial(), Color::Black);
    let supplied = ["C3B4", "C3D4", "E3F4"];
    let outcome = engine
        .search_strings(&pos, &supplied, SearchLimit::Time(50))
        .unwrap();
    assert!(supplied.contains(&outcome.mv.to_string().as_str()));
    assert!(outcome.stats.nodes > 0);
}

#[test]
fn test_cancelled_iteration_keeps_last_completed_depth() {
    let engine = engine(0);
    let pos = Position::new(Board::initial(), Color::Red);
    let moves = pos.generate_moves().unwrap();
    let mut ctx = SearchContext::new(Deadline::starting_now(Some(100)), StdRng::seed_from_u64(0));
    let (scores, depth) = engine
        .iterative_deepening(&pos, &moves, 1..=40, &mut ctx)
        .unwrap();
    assert!(depth >= 1);
    assert!(depth < 40);

    // The interrupted iteration left no trace: the result is exactly that
    // of a full search at the last completed depth.
    let mut full = SearchContext::unlimited(0);
    let expected = engine
        .best_at_depth(&pos, &moves, depth, &mut full)
        .unwrap()
        .unwrap();
    assert_eq!(scores, expected);
}

#[test]
fn test_same_seed_same_choice() {
    let pos = Position::new(Board::initial(), Color::Red);
    let first = engine(11).search_position(&pos, SearchLimit::Depth(1)).unwrap();
    let second = engine(11).search_position(&pos, SearchLimit::Depth(1)).unwrap();
    assert_eq!(first.mv, second.mv);
    assert_eq!(first.score, second.score);
}

#[test]
fn test_ties_are_broken_at_random() {
    // Every opening move keeps material even at depth 1.
    let pos = Position::new(Board::initial(), Color::Red);
    let picks: std::collections::HashSet<String> = (0..30)
        .map(|seed| {
            engine(seed)
                .search_position(&pos, SearchLimit::Depth(1))
                .unwrap()
                .mv
                .to_string()
        })
        .collect();
    assert!(picks.len() > 1);
}

#[test]
fn test_minimax_and_alphabeta_engines_agree() {
    let pos = Position::new(Board::initial(), Color::Black);
    let a = engine_with(5, Algorithm::AlphaBeta)
        .search_position(&pos, SearchLimit::Depth(3))
        .unwrap();
    let b = engine_with(5, Algorithm::Minimax)
        .search_position(&pos, SearchLimit::Depth(3))
        .unwrap();
    assert_eq!(a.score, b.score);
    assert_eq!(a.mv, b.mv);
    assert_eq!(a.stats.depth, 3);
}

#[test]
fn test_decided_game_stops_deepening() {
    // Either man takes the last black piece.
    let pos = position(
        Color::Red,
        &[
            ("D4", Piece::RED_MAN),
            ("B4", Piece::RED_MAN),
            ("C3", Piece::BLACK_MAN),
        ],
    );
    let outcome = engine(1)
        .search_position(&pos, SearchLimit::Time(5_000))
        .unwrap();
    assert_eq!(outcome.score, INFINITY);
    assert_eq!(outcome.stats.depth, 1);
    assert!(["D4B2", "B4D2"].contains(&outcome.mv.to_string().as_str()));
}

#[test]
fn test_prefers_capturing_the_king() {
    // The red king can take either the black king or the black man.
    let pos = position(
        Color::Red,
        &[
            ("E5", Piece::RED_KING),
            ("D6", Piece::BLACK_KING),
            ("F6", Piece::BLACK_MAN),
        ],
    );
    let mut engine = engine(1);
    let outcome = engine.search_position(&pos, SearchLimit::Depth(1)).unwrap();
    assert_eq!(outcome.mv.to_string(), "E5C7");
    // (150 - 100 - 5) / 2 with the king on C7
    assert_eq!(outcome.score, 22);
}

#[test]
fn test_malformed_root_move_is_reported() {
    let pos = Position::new(Board::initial(), Color::Red);
    let result = engine(1).search_strings(&pos, &["B6A5", "B6Q9"], SearchLimit::Depth(1));
    assert!(matches!(result, Err(EngineError::MalformedMove(_))));
}

#[test]
fn test_fixed_depth_is_clamped_to_at_least_one() {
    let pos = Position::new(Board::initial(), Color::Red);
    let outcome = engine(1)
        .search_position(&pos, SearchLimit::Depth(0))
        .unwrap();
    assert_eq!(outcome.stats.depth, 1);
}
