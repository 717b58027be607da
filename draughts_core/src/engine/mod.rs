use crate::error::EngineResult;
use crate::logic::board::Board;
use crate::logic::moves::Move;
use crate::logic::position::Position;
use serde::{Deserialize, Serialize};

pub mod clock;
pub mod config;
pub mod eval;
pub mod search;

/// Score of a decided game. A side with no legal move scores `-INFINITY`.
pub const INFINITY: i32 = 100_000;

/// Depth used when searching without a clock.
pub const DEFAULT_FIXED_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    Depth(u8),
    Time(u64), // milliseconds
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

/// The chosen move, its score for the side to move, and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    pub score: i32,
    pub stats: SearchStats,
}

pub trait Evaluator {
    /// Score of `board` from Red's point of view.
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        position: &Position,
        root_moves: &[Move],
        limit: SearchLimit,
    ) -> EngineResult<SearchOutcome>;
}
