use crate::engine::{SearchLimit, DEFAULT_FIXED_DEPTH};
use crate::error::{EngineError, EngineResult};
use crate::logic::eval_constants::{EvalWeights, ENDGAME_MATERIAL, KING_VALUE, MAN_VALUE};
use serde::{Deserialize, Serialize};

/// How root moves are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub man_value: i32,
    pub king_value: i32,
    pub endgame_material: i32, // Kings centralize below this piece count

    // Search Parameters
    pub time_limit_ms: u64,
    pub max_depth: u8,
    pub algorithm: Algorithm,
    pub progressive: bool, // false: one search at fixed_depth per turn
    pub fixed_depth: u8,
    pub seed: Option<u64>, // None: seeded from the clock
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            man_value: MAN_VALUE,
            king_value: KING_VALUE,
            endgame_material: ENDGAME_MATERIAL,

            time_limit_ms: 99,
            max_depth: 64,
            algorithm: Algorithm::AlphaBeta,
            progressive: true,
            fixed_depth: DEFAULT_FIXED_DEPTH,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Reads a config where every missing field keeps its default.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.fixed_depth == 0 {
            return Err(EngineError::InvalidConfig("fixed_depth must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(EngineError::InvalidConfig("max_depth must be at least 1".into()));
        }
        if self.man_value <= 0 || self.king_value <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "piece values must be positive (man {}, king {})",
                self.man_value, self.king_value
            )));
        }
        Ok(())
    }

    pub const fn weights(&self) -> EvalWeights {
        EvalWeights {
            man_value: self.man_value,
            king_value: self.king_value,
            endgame_material: self.endgame_material,
        }
    }

    /// Per-turn limit used by the harness: iterative deepening under the
    /// time limit, or a single search at `fixed_depth`.
    pub const fn turn_limit(&self) -> SearchLimit {
        if self.progressive {
            SearchLimit::Time(self.time_limit_ms)
        } else {
            SearchLimit::Depth(self.fixed_depth)
        }
    }
}
