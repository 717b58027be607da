use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of playable (dark) squares.
pub const NUM_SQUARES: usize = 32;
const BOARD_DIM: i8 = 8;

// Order matters: it fixes the order in which moves are generated.
const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// One of the 32 dark squares, addressed by a dense index.
///
/// Index `i` lives on rank `i / 4`; ranks alternate which file the first
/// dark square sits on, so `A1` is index 0 and `H8` is index 31. Red men
/// promote on rank 0, black men on rank 7.
///
/// Off-board results of geometry queries are `None`; `Board::probe` turns
/// them into `Cell::OffBoard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

/// A jump seen from its starting square: the square jumped over and the
/// landing square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub over: Square,
    pub to: Square,
}

impl Square {
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_SQUARES {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Dark square at `(rank, file)`, both zero-based. Light squares and
    /// anything outside the board give `None`.
    #[must_use]
    pub fn from_coords(rank: i8, file: i8) -> Option<Self> {
        let on_board = (0..BOARD_DIM).contains(&rank) && (0..BOARD_DIM).contains(&file);
        if !on_board || (rank + file) % 2 != 0 {
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        Some(Self((4 * rank + file / 2) as u8))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[allow(clippy::cast_possible_wrap)]
    pub const fn rank(self) -> i8 {
        (self.0 / 4) as i8
    }

    #[allow(clippy::cast_possible_wrap)]
    pub const fn file(self) -> i8 {
        let rank = self.0 / 4;
        (2 * (self.0 % 4) + rank % 2) as i8
    }

    /// `(rank, file)` as a plain pair.
    pub const fn coords(self) -> (i8, i8) {
        (self.rank(), self.file())
    }

    /// All playable squares in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        #[allow(clippy::cast_possible_truncation)]
        (0..NUM_SQUARES as u8).map(Self)
    }

    #[must_use]
    pub const fn is_neighbor(self, other: Self) -> bool {
        let dr = other.rank() - self.rank();
        let df = other.file() - self.file();
        dr.abs() == 1 && df.abs() == 1
    }

    /// The square jumped over when going from `self` to `other`, if the two
    /// form a jump pair.
    #[must_use]
    pub fn jump_middle(self, other: Self) -> Option<Self> {
        let dr = other.rank() - self.rank();
        let df = other.file() - self.file();
        if dr.abs() != 2 || df.abs() != 2 {
            return None;
        }
        Self::from_coords(self.rank() + dr / 2, self.file() + df / 2)
    }

    /// The diagonal neighbors, `None` where the board ends.
    #[must_use]
    pub fn neighbors(self) -> [Option<Self>; 4] {
        DIAGONALS.map(|(dr, df)| Self::from_coords(self.rank() + dr, self.file() + df))
    }

    /// The jumps available on an empty board, `None` where the landing
    /// square would be off the board.
    #[must_use]
    pub fn jumps(self) -> [Option<Jump>; 4] {
        DIAGONALS.map(|(dr, df)| {
            let over = Self::from_coords(self.rank() + dr, self.file() + df)?;
            let to = Self::from_coords(self.rank() + 2 * dr, self.file() + 2 * df)?;
            Some(Jump { over, to })
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let file = char::from(b'A' + self.file() as u8);
        write!(f, "{file}{}", self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidSquare(s.to_string());
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let letter = letter.to_ascii_uppercase();
        if !('A'..='H').contains(&letter) {
            return Err(invalid());
        }
        let rank = digit.to_digit(10).filter(|d| (1..=8).contains(d)).ok_or_else(invalid)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let (rank, file) = (rank as i8 - 1, (letter as u8 - b'A') as i8);
        Self::from_coords(rank, file).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation_round_trip() {
        for sq in Square::all() {
            let name = sq.to_string();
            assert_eq!(name.parse::<Square>().unwrap(), sq, "{name}");
        }
    }

    #[test]
    fn test_known_squares() {
        assert_eq!("A1".parse::<Square>().unwrap().index(), 0);
        assert_eq!("G1".parse::<Square>().unwrap().index(), 3);
        assert_eq!("B2".parse::<Square>().unwrap().index(), 4);
        assert_eq!("H8".parse::<Square>().unwrap().index(), 31);
        assert_eq!("c3".parse::<Square>().unwrap().to_string(), "C3");
    }

    #[test]
    fn test_rejects_light_and_off_board_squares() {
        for bad in ["A2", "B1", "I1", "A9", "A0", "", "A", "A10"] {
            assert!(bad.parse::<Square>().is_err(), "{bad}");
        }
        assert!(Square::new(32).is_none());
        assert!(Square::from_coords(0, 1).is_none());
        assert!(Square::from_coords(-1, 1).is_none());
    }

    #[test]
    fn test_coords_are_dark() {
        for sq in Square::all() {
            let (rank, file) = sq.coords();
            assert_eq!((rank + file) % 2, 0);
            assert_eq!(Square::from_coords(rank, file), Some(sq));
        }
    }

    #[test]
    fn test_neighbors_of_corner() {
        let a1: Square = "A1".parse().unwrap();
        let neighbors = a1.neighbors();
        assert_eq!(neighbors.iter().flatten().count(), 1);
        assert_eq!(neighbors[3], Some("B2".parse().unwrap()));
        assert!(neighbors.iter().flatten().all(|n| a1.is_neighbor(*n)));
    }

    #[test]
    fn test_jump_midpoints() {
        for from in Square::all() {
            for jump in from.jumps().into_iter().flatten() {
                let middle = from.jump_middle(jump.to).unwrap();
                assert_eq!(middle, jump.over);
                assert!(from.is_neighbor(middle));
                assert!(middle.is_neighbor(jump.to));
                assert!(!from.is_neighbor(jump.to));
            }
        }
    }

    #[test]
    fn test_jump_middle_requires_distance_two() {
        let c3: Square = "C3".parse().unwrap();
        assert_eq!(c3.jump_middle("D4".parse().unwrap()), None);
        assert_eq!(c3.jump_middle("C5".parse().unwrap()), None);
        assert_eq!(c3.jump_middle("E5".parse().unwrap()), Some("D4".parse().unwrap()));
    }
}
