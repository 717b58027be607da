//! Line protocol spoken with the game harness.
//!
//! The first line names our color. Every turn then brings eight board rows
//! (rank 8 first), the number of legal moves, and the moves themselves,
//! separated by whitespace. We answer with one move per line.

use draughts_core::error::EngineError;
use draughts_core::logic::board::{Board, Color};
use draughts_core::logic::position::Position;
use std::io::{self, BufRead};
use thiserror::Error;

const BOARD_ROWS: usize = 8;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Input ended while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("Invalid move count: {0:?}")]
    InvalidCount(String),

    #[error("Expected {expected} moves, got {found}")]
    MoveCountMismatch { expected: usize, found: usize },
}

/// What the harness sends for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub position: Position,
    pub moves: Vec<String>,
}

pub struct ProtocolReader<R> {
    input: R,
    color: Color,
}

impl<R: BufRead> ProtocolReader<R> {
    /// Reads the color line.
    pub fn new(mut input: R) -> Result<Self, ProtocolError> {
        let line = read_line(&mut input)?.ok_or(ProtocolError::UnexpectedEof("color"))?;
        let color = Color::from_symbol(&line)?;
        Ok(Self { input, color })
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// Next turn, or `None` once the harness closes the stream between turns.
    pub fn next_turn(&mut self) -> Result<Option<Turn>, ProtocolError> {
        let Some(first) = read_line(&mut self.input)? else {
            return Ok(None);
        };
        // Blank lines between turns are tolerated.
        if first.trim().is_empty() {
            return self.next_turn();
        }

        let mut rows = Vec::with_capacity(BOARD_ROWS);
        rows.push(first);
        while rows.len() < BOARD_ROWS {
            let row = read_line(&mut self.input)?.ok_or(ProtocolError::UnexpectedEof("board"))?;
            rows.push(row);
        }
        let board = Board::from_rows(&rows)?;

        let count_line =
            read_line(&mut self.input)?.ok_or(ProtocolError::UnexpectedEof("move count"))?;
        let count: usize = count_line
            .trim()
            .parse()
            .map_err(|_| ProtocolError::InvalidCount(count_line.clone()))?;

        let mut moves = Vec::with_capacity(count);
        while moves.len() < count {
            let line = read_line(&mut self.input)?.ok_or(ProtocolError::UnexpectedEof("moves"))?;
            moves.extend(line.split_whitespace().map(str::to_string));
        }
        if moves.len() > count {
            return Err(ProtocolError::MoveCountMismatch {
                expected: count,
                found: moves.len(),
            });
        }

        Ok(Some(Turn {
            position: Position::new(board, self.color),
            moves,
        }))
    }
}

/// One line without its terminator, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use draughts_core::logic::board::{Kind, Piece};
    use std::io::Cursor;

    const INITIAL_ROWS: &str = "\
.r.r.r.r
r.r.r.r.
.r.r.r.r
........
........
b.b.b.b.
.b.b.b.b
b.b.b.b.
";

    #[test]
    fn test_reads_color_then_turns() {
        let input = format!("b\n{INITIAL_ROWS}3\nC3B4\nC3D4\nE3F4\n");
        let mut reader = ProtocolReader::new(Cursor::new(input)).unwrap();
        assert_eq!(reader.color(), Color::Black);

        let turn = reader.next_turn().unwrap().unwrap();
        assert_eq!(turn.position.turn, Color::Black);
        assert_eq!(turn.position.board, Board::initial());
        assert_eq!(turn.moves, ["C3B4", "C3D4", "E3F4"]);

        assert!(reader.next_turn().unwrap().is_none());
    }

    #[test]
    fn test_moves_may_share_a_line() {
        let input = format!("r\n{INITIAL_ROWS}2\nB6A5 B6C5\n");
        let mut reader = ProtocolReader::new(Cursor::new(input)).unwrap();
        let turn = reader.next_turn().unwrap().unwrap();
        assert_eq!(turn.moves, ["B6A5", "B6C5"]);
    }

    #[test]
    fn test_w_means_red() {
        let reader = ProtocolReader::new(Cursor::new("w\r\n")).unwrap();
        assert_eq!(reader.color(), Color::Red);
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let err = ProtocolReader::new(Cursor::new("green\n")).err().unwrap();
        assert!(matches!(
            err,
            ProtocolError::Engine(EngineError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_kings_are_read() {
        let rows = "\
........
........
........
....R...
........
........
........
B.......
";
        let input = format!("r\n{rows}1\nE5D4\n");
        let mut reader = ProtocolReader::new(Cursor::new(input)).unwrap();
        let turn = reader.next_turn().unwrap().unwrap();
        let board = &turn.position.board;
        assert_eq!(board.count(Kind::King, Color::Red), 1);
        assert_eq!(board.count(Kind::King, Color::Black), 1);
        assert_eq!(board.get("E5".parse().unwrap()), Some(Piece::RED_KING));
        assert_eq!(board.get("A1".parse().unwrap()), Some(Piece::BLACK_KING));
    }

    #[test]
    fn test_truncated_turn_is_an_error() {
        let input = "r\n.r.r.r.r\nr.r.r.r.\n";
        let mut reader = ProtocolReader::new(Cursor::new(input)).unwrap();
        assert!(matches!(
            reader.next_turn(),
            Err(ProtocolError::UnexpectedEof("board"))
        ));
    }

    #[test]
    fn test_more_moves_than_announced_is_an_error() {
        let input = format!("r\n{INITIAL_ROWS}1\nB6A5 B6C5\n");
        let mut reader = ProtocolReader::new(Cursor::new(input)).unwrap();
        assert!(matches!(
            reader.next_turn(),
            Err(ProtocolError::MoveCountMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_bad_count_is_an_error() {
        let input = format!("r\n{INITIAL_ROWS}many\n");
        let mut reader = ProtocolReader::new(Cursor::new(input)).unwrap();
        assert!(matches!(
            reader.next_turn(),
            Err(ProtocolError::InvalidCount(_))
        ));
    }
}
