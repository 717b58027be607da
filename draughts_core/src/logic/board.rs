use crate::error::{EngineError, EngineResult};
use crate::logic::eval_constants::{king_centralization, EvalWeights};
use crate::logic::moves::{Atom, Move};
use crate::logic::square::{Square, NUM_SQUARES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Red => Self::Black,
            Self::Black => Self::Red,
        }
    }

    /// Rank on which men of this color are crowned.
    pub const fn promotion_rank(self) -> i8 {
        match self {
            Self::Red => 0,
            Self::Black => 7,
        }
    }

    /// Whether a man of this color may travel from index `from` to index
    /// `to`. Red men go toward lower indices, black men toward higher ones.
    pub const fn is_forward(self, from: Square, to: Square) -> bool {
        match self {
            Self::Red => to.index() < from.index(),
            Self::Black => to.index() > from.index(),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Black => 'b',
        }
    }

    /// Parses the harness color line. `w` is taken to mean red.
    pub fn from_symbol(s: &str) -> EngineResult<Self> {
        match s.trim() {
            "r" => Ok(Self::Red),
            "b" => Ok(Self::Black),
            "w" => {
                log::warn!("w as a color -> r");
                Ok(Self::Red)
            }
            other => Err(EngineError::UnknownColor(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: Kind,
    pub color: Color,
}

impl Piece {
    pub const RED_MAN: Self = Self::new(Kind::Man, Color::Red);
    pub const RED_KING: Self = Self::new(Kind::King, Color::Red);
    pub const BLACK_MAN: Self = Self::new(Kind::Man, Color::Black);
    pub const BLACK_KING: Self = Self::new(Kind::King, Color::Black);

    pub const fn new(kind: Kind, color: Color) -> Self {
        Self { kind, color }
    }

    pub const fn is_king(self) -> bool {
        matches!(self.kind, Kind::King)
    }

    #[must_use]
    pub const fn crowned(self) -> Self {
        Self::new(Kind::King, self.color)
    }

    /// `.` is an empty square; anything else outside `r R b B` is rejected.
    pub const fn from_symbol(c: char) -> EngineResult<Option<Self>> {
        match c {
            '.' => Ok(None),
            'r' => Ok(Some(Self::RED_MAN)),
            'R' => Ok(Some(Self::RED_KING)),
            'b' => Ok(Some(Self::BLACK_MAN)),
            'B' => Ok(Some(Self::BLACK_KING)),
            other => Err(EngineError::UnknownPiece(other)),
        }
    }

    pub const fn symbol(self) -> char {
        match (self.kind, self.color) {
            (Kind::Man, Color::Red) => 'r',
            (Kind::King, Color::Red) => 'R',
            (Kind::Man, Color::Black) => 'b',
            (Kind::King, Color::Black) => 'B',
        }
    }
}

/// Result of probing a possibly off-board location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    OffBoard,
    Empty,
    Occupied(Piece),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<Piece>; NUM_SQUARES],

    // Kept in step with `grid` by `set`, the only writer.
    red_men: u8,
    red_kings: u8,
    black_men: u8,
    black_kings: u8,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; NUM_SQUARES],
            red_men: 0,
            red_kings: 0,
            black_men: 0,
            black_kings: 0,
        }
    }

    /// Twelve men a side: black on ranks 1-3, red on ranks 6-8.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for sq in Square::all() {
            match sq.rank() {
                0..=2 => board.set(sq, Some(Piece::BLACK_MAN)),
                5..=7 => board.set(sq, Some(Piece::RED_MAN)),
                _ => {}
            }
        }
        board
    }

    #[must_use]
    pub fn from_cells(cells: [Option<Piece>; NUM_SQUARES]) -> Self {
        let mut board = Self::empty();
        for (sq, cell) in Square::all().zip(cells) {
            board.set(sq, cell);
        }
        board
    }

    /// Reads eight rows of eight symbols, the first row being rank 8.
    /// Only dark squares are read; whatever sits on light squares is ignored.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> EngineResult<Self> {
        if rows.len() != 8 {
            return Err(EngineError::MalformedBoard(format!(
                "expected 8 board rows, got {}",
                rows.len()
            )));
        }
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let rank = 7 - row as i8;
            let symbols: Vec<char> = line.as_ref().chars().collect();
            if symbols.len() < 8 {
                return Err(EngineError::MalformedBoard(format!(
                    "board row {:?} is shorter than 8",
                    line.as_ref()
                )));
            }
            for (file, &symbol) in symbols.iter().take(8).enumerate() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let file = file as i8;
                if let Some(sq) = Square::from_coords(rank, file) {
                    board.set(sq, Piece::from_symbol(symbol)?);
                }
            }
        }
        Ok(board)
    }

    /// Inverse of `from_rows`, light squares printed as `.`.
    pub fn to_rows(&self) -> Vec<String> {
        (0..8i8)
            .rev()
            .map(|rank| {
                (0..8i8)
                    .map(|file| {
                        Square::from_coords(rank, file)
                            .and_then(|sq| self.get(sq))
                            .map_or('.', Piece::symbol)
                    })
                    .collect::<String>()
            })
            .collect()
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.grid.get(sq.index()).copied().flatten()
    }

    /// Like `get`, for squares produced by bounds-checked geometry.
    pub fn probe(&self, sq: Option<Square>) -> Cell {
        match sq {
            None => Cell::OffBoard,
            Some(sq) => self.get(sq).map_or(Cell::Empty, Cell::Occupied),
        }
    }

    /// Overwrites a square, keeping the counters in step.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        let Some(slot) = self.grid.get_mut(sq.index()) else {
            return;
        };
        let old = std::mem::replace(slot, piece);
        if let Some(old) = old {
            *self.counter(old) -= 1;
        }
        if let Some(new) = piece {
            *self.counter(new) += 1;
        }
    }

    fn counter(&mut self, piece: Piece) -> &mut u8 {
        match (piece.kind, piece.color) {
            (Kind::Man, Color::Red) => &mut self.red_men,
            (Kind::King, Color::Red) => &mut self.red_kings,
            (Kind::Man, Color::Black) => &mut self.black_men,
            (Kind::King, Color::Black) => &mut self.black_kings,
        }
    }

    pub const fn count(&self, kind: Kind, color: Color) -> u8 {
        match (kind, color) {
            (Kind::Man, Color::Red) => self.red_men,
            (Kind::King, Color::Red) => self.red_kings,
            (Kind::Man, Color::Black) => self.black_men,
            (Kind::King, Color::Black) => self.black_kings,
        }
    }

    pub const fn total_pieces(&self) -> u8 {
        self.red_men + self.red_kings + self.black_men + self.black_kings
    }

    /// Squares holding pieces of `color`, in index order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.get(sq)
                .filter(|p| p.color == color)
                .map(|p| (sq, p))
        })
    }

    /// Recounts the grid and compares with the running counters.
    pub fn check_counts(&self) -> EngineResult<()> {
        let recount = Self::from_cells(self.grid);
        if recount == *self {
            Ok(())
        } else {
            Err(EngineError::PieceCountMismatch)
        }
    }

    /// Plays one atom. A man reaching its promotion rank is crowned right
    /// away, so later jumps of the same chain move it as a king.
    pub fn apply(&mut self, atom: Atom) -> EngineResult<()> {
        let (from, to) = (atom.from(), atom.to());
        let mut piece = self.get(from).ok_or(EngineError::EmptySource(from))?;
        if self.get(to).is_some() {
            return Err(EngineError::OccupiedTarget(to));
        }
        if let Atom::Capture { over, .. } = atom {
            if self.get(over).is_none() {
                return Err(EngineError::MissingCapturedPiece { from, over, to });
            }
            self.set(over, None);
        }

        if !piece.is_king() && to.rank() == piece.color.promotion_rank() {
            piece = piece.crowned();
        }
        self.set(from, None);
        self.set(to, Some(piece));
        Ok(())
    }

    /// Plays every atom of a move in order.
    pub fn play(&mut self, mv: &Move) -> EngineResult<()> {
        for &atom in mv.atoms() {
            self.apply(atom)?;
        }
        Ok(())
    }

    /// Static evaluation from Red's point of view with the default weights.
    pub fn evaluate(&self) -> i32 {
        self.evaluate_with(&EvalWeights::default())
    }

    /// Material balance, plus king centralization once the board thins out,
    /// averaged over the pieces left. Truncates toward zero.
    pub fn evaluate_with(&self, weights: &EvalWeights) -> i32 {
        let material_left = i32::from(self.total_pieces());
        if material_left == 0 {
            return 0;
        }
        let men = i32::from(self.red_men) - i32::from(self.black_men);
        let kings = i32::from(self.red_kings) - i32::from(self.black_kings);
        let mut value = weights.man_value * men + weights.king_value * kings;

        if material_left < weights.endgame_material {
            for (sq, _) in self.pieces(Color::Red).filter(|(_, p)| p.is_king()) {
                value -= king_centralization(sq);
            }
            for (sq, _) in self.pieces(Color::Black).filter(|(_, p)| p.is_king()) {
                value += king_centralization(sq);
            }
        }

        value / material_left
    }
}
