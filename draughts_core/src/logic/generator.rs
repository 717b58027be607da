//! Legal move generation.
//!
//! Captures are mandatory and chain: after a jump the same piece keeps
//! jumping while it can, and every way of continuing is a separate move.
//! Men move and capture forward only (toward lower indices for red, higher
//! for black); kings go any way.

use crate::error::EngineResult;
use crate::logic::moves::{Atom, Move};
use crate::logic::position::Position;
use crate::logic::square::Square;

impl Position {
    /// All legal moves for the side to move, pieces scanned in index order.
    ///
    /// Simple moves are collected until some piece turns out to have a
    /// capture. At that point everything gathered so far is dropped in favor
    /// of that piece's captures, and later pieces only contribute captures.
    pub fn generate_moves(&self) -> EngineResult<Vec<Move>> {
        let mut moves = Vec::new();
        let mut capture_found = false;

        for (sq, _) in self.board.pieces(self.turn) {
            let piece_moves = self.square_moves(sq, capture_found)?;
            let captures_here = piece_moves.first().is_some_and(Move::is_capture);

            if captures_here && !capture_found {
                // First capture seen: earlier quiet moves are no longer legal
                capture_found = true;
                moves = piece_moves;
            } else {
                moves.extend(piece_moves);
            }
        }

        Ok(moves)
    }

    /// Moves of the piece on `sq`. Captures are expanded into every full
    /// chain; simple steps are only produced when the piece has no capture
    /// and `must_capture` is off.
    pub fn square_moves(&self, sq: Square, must_capture: bool) -> EngineResult<Vec<Move>> {
        let mut moves = Vec::new();

        for capture in self.find_captures(sq) {
            let mut next = self.clone();
            next.apply(capture)?;
            let chains = next.square_moves(capture.to(), true)?;
            if chains.is_empty() {
                moves.push(Move::single(capture));
            } else {
                for mut chain in chains {
                    chain.prepend(capture);
                    moves.push(chain);
                }
            }
        }

        if moves.is_empty() && !must_capture {
            let Some(piece) = self.board.get(sq) else {
                return Ok(moves);
            };
            for to in sq.neighbors().into_iter().flatten() {
                if !piece.is_king() && !piece.color.is_forward(sq, to) {
                    continue;
                }
                if self.board.get(to).is_some() {
                    continue;
                }
                moves.push(Move::single(Atom::Step { from: sq, to }));
            }
        }

        Ok(moves)
    }

    /// Single jumps available from `sq`: an enemy piece next to it and an
    /// empty square right behind. Men may not jump backward.
    pub fn find_captures(&self, sq: Square) -> Vec<Atom> {
        let Some(piece) = self.board.get(sq) else {
            return Vec::new();
        };
        let enemy = self.turn.opposite();

        sq.jumps()
            .into_iter()
            .flatten()
            .filter(|jump| {
                let takes_enemy = self.board.get(jump.over).is_some_and(|p| p.color == enemy);
                let lands_free = self.board.get(jump.to).is_none();
                let direction_ok = piece.is_king() || piece.color.is_forward(sq, jump.to);
                takes_enemy && lands_free && direction_ok
            })
            .map(|jump| Atom::Capture {
                from: sq,
                over: jump.over,
                to: jump.to,
            })
            .collect()
    }
}
