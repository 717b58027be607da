use crate::error::EngineResult;
use crate::logic::board::{Board, Color};
use crate::logic::eval_constants::EvalWeights;
use crate::logic::moves::{Atom, Move};

/// A board and the side to move. Cheap to clone; the search clones one per
/// explored branch instead of undoing moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub turn: Color,
}

impl Position {
    pub const fn new(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    /// Plays a full move and hands the turn over.
    pub fn play(&mut self, mv: &Move) -> EngineResult<()> {
        self.board.play(mv)?;
        self.turn = self.turn.opposite();
        Ok(())
    }

    /// Plays one atom of a chain; the turn does not change.
    pub fn apply(&mut self, atom: Atom) -> EngineResult<()> {
        self.board.apply(atom)
    }

    /// Static evaluation from the side to move's point of view.
    pub fn evaluate(&self) -> i32 {
        self.evaluate_with(&EvalWeights::default())
    }

    pub fn evaluate_with(&self, weights: &EvalWeights) -> i32 {
        let score = self.board.evaluate_with(weights);
        match self.turn {
            Color::Red => score,
            Color::Black => -score,
        }
    }
}
