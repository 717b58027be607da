use crate::logic::square::Square;

// Material
pub const MAN_VALUE: i32 = 100;
pub const KING_VALUE: i32 = 150;

// Below this many pieces on the board, kings are pulled toward the center.
pub const ENDGAME_MATERIAL: i32 = 15;

/// Weights fed to `Board::evaluate_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub man_value: i32,
    pub king_value: i32,
    pub endgame_material: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            man_value: MAN_VALUE,
            king_value: KING_VALUE,
            endgame_material: ENDGAME_MATERIAL,
        }
    }
}

/// Twice the Chebyshev distance from the board center: 1 on the four
/// central squares, 7 on the edge.
pub fn king_centralization(sq: Square) -> i32 {
    let (rank, file) = sq.coords();
    let dr = (2 * i32::from(rank) - 7).abs();
    let df = (2 * i32::from(file) - 7).abs();
    dr.max(df)
}
