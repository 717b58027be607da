use crate::error::{EngineError, EngineResult};
use crate::logic::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single step or a single capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Atom {
    Step { from: Square, to: Square },
    Capture { from: Square, over: Square, to: Square },
}

impl Atom {
    /// A diagonal step between neighbors.
    pub fn step(from: Square, to: Square) -> EngineResult<Self> {
        if !from.is_neighbor(to) {
            return Err(EngineError::MalformedMove(format!("{from}{to}")));
        }
        Ok(Self::Step { from, to })
    }

    /// A jump; the middle square is derived from the pair.
    pub fn capture(from: Square, to: Square) -> EngineResult<Self> {
        let over = from
            .jump_middle(to)
            .ok_or_else(|| EngineError::MalformedMove(format!("{from}{to}")))?;
        Ok(Self::Capture { from, over, to })
    }

    /// Step or capture, decided by the distance between the squares.
    pub fn between(from: Square, to: Square) -> EngineResult<Self> {
        if from.is_neighbor(to) {
            Self::step(from, to)
        } else {
            Self::capture(from, to)
        }
    }

    pub const fn from(self) -> Square {
        match self {
            Self::Step { from, .. } | Self::Capture { from, .. } => from,
        }
    }

    pub const fn to(self) -> Square {
        match self {
            Self::Step { to, .. } | Self::Capture { to, .. } => to,
        }
    }

    pub const fn captured(self) -> Option<Square> {
        match self {
            Self::Step { .. } => None,
            Self::Capture { over, .. } => Some(over),
        }
    }

    pub const fn is_capture(self) -> bool {
        matches!(self, Self::Capture { .. })
    }
}

/// One full turn: a single step, or a chain of captures by one piece.
///
/// Written as the starting square followed by every landing square, e.g.
/// `C3D4` or `C3E5C7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    atoms: Vec<Atom>,
}

impl Move {
    #[must_use]
    pub fn single(atom: Atom) -> Self {
        Self { atoms: vec![atom] }
    }

    /// Builds a move from atoms, checking the chain shape.
    pub fn from_atoms(atoms: Vec<Atom>) -> EngineResult<Self> {
        let mv = Self { atoms };
        let malformed = || EngineError::MalformedMove(mv.to_string());
        let Some(first) = mv.atoms.first() else {
            return Err(malformed());
        };
        if !first.is_capture() && mv.atoms.len() > 1 {
            return Err(malformed());
        }
        let connected = mv
            .atoms
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.to() == b.from() && b.is_capture()));
        if !connected {
            return Err(malformed());
        }
        Ok(mv)
    }

    /// Attaches an earlier capture in front of this chain.
    pub fn prepend(&mut self, atom: Atom) {
        self.atoms.insert(0, atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn from_square(&self) -> Option<Square> {
        self.atoms.first().map(|a| a.from())
    }

    pub fn to_square(&self) -> Option<Square> {
        self.atoms.last().map(|a| a.to())
    }

    pub fn is_capture(&self) -> bool {
        self.atoms.first().is_some_and(|a| a.is_capture())
    }

    /// Number of atoms in the chain.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from_square() {
            write!(f, "{from}")?;
        }
        for atom in &self.atoms {
            write!(f, "{}", atom.to())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || EngineError::MalformedMove(s.to_string());
        if !s.is_ascii() || s.len() < 4 || s.len() % 2 != 0 {
            return Err(malformed());
        }
        let squares = (0..s.len())
            .step_by(2)
            .map(|i| s.get(i..i + 2).ok_or_else(malformed)?.parse::<Square>())
            .collect::<EngineResult<Vec<_>>>()
            .map_err(|_| malformed())?;
        let atoms = squares
            .windows(2)
            .map(|pair| match pair {
                [from, to] => Atom::between(*from, *to),
                _ => Err(malformed()),
            })
            .collect::<EngineResult<Vec<_>>>()
            .map_err(|_| malformed())?;
        Self::from_atoms(atoms).map_err(|_| malformed())
    }
}
