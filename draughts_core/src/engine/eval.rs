use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::Board;
use crate::logic::eval_constants::EvalWeights;
use std::sync::Arc;

/// Material plus endgame king centralization, weighted from the config.
pub struct MaterialEvaluator {
    weights: EvalWeights,
}

impl MaterialEvaluator {
    pub fn new(config: &Arc<EngineConfig>) -> Self {
        Self {
            weights: config.weights(),
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        board.evaluate_with(&self.weights)
    }
}
