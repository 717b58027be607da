//! Error types for the draughts core
//!
//! Every variant is a contract violation by whoever handed us the board or
//! the move list. Search cancellation is not an error and never shows up
//! here: it travels as `Ok(None)` through the search functions.

use crate::logic::square::Square;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Index, coordinates or notation that do not name a playable square
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    /// Board symbol outside `. r R b B`
    #[error("Piece not recognized: {0:?}")]
    UnknownPiece(char),

    /// Board text with the wrong number of rows or a short row
    #[error("Malformed board: {0}")]
    MalformedBoard(String),

    /// Color symbol outside `r b w`
    #[error("Wrong input color: {0:?}")]
    UnknownColor(String),

    /// Move string that cannot be decoded into a chain of atoms
    #[error("Malformed move {0:?}")]
    MalformedMove(String),

    /// Atom applied from an empty square
    #[error("No piece to move at {0}")]
    EmptySource(Square),

    /// Atom landing on an occupied square
    #[error("Target square {0} is occupied")]
    OccupiedTarget(Square),

    /// Capture atom whose middle square holds nothing
    #[error("No piece found at {over} while capturing {from}{to}")]
    MissingCapturedPiece { from: Square, over: Square, to: Square },

    /// Running counters no longer agree with the grid
    #[error("Piece counters out of sync with the board")]
    PieceCountMismatch,

    /// Search asked to choose among zero candidates
    #[error("No root moves supplied")]
    NoRootMoves,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
