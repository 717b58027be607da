use crate::engine::clock::{clock_seed, Deadline};
use crate::engine::config::{Algorithm, EngineConfig};
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, SearchLimit, SearchOutcome, SearchStats, Searcher, INFINITY};
use crate::error::{EngineError, EngineResult};
use crate::logic::board::Color;
use crate::logic::moves::Move;
use crate::logic::position::Position;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Per-turn search state: the deadline, the tie-breaking RNG and a node
/// counter. Built once at the start of a turn and threaded through every
/// recursive call.
pub struct SearchContext {
    deadline: Deadline,
    rng: StdRng,
    nodes: u64,
}

impl SearchContext {
    pub const fn new(deadline: Deadline, rng: StdRng) -> Self {
        Self {
            deadline,
            rng,
            nodes: 0,
        }
    }

    /// No deadline, fixed seed. Handy for fixed-depth analysis.
    pub fn unlimited(seed: u64) -> Self {
        Self::new(Deadline::unlimited(), StdRng::seed_from_u64(seed))
    }

    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Counts the node and reports whether the search must stop.
    fn enter(&mut self) -> bool {
        self.nodes += 1;
        self.deadline.expired()
    }
}

/// Best score of one root iteration and every root move reaching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootScores {
    pub score: i32,
    pub best_moves: Vec<Move>,
}

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    rng: StdRng,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            evaluator: MaterialEvaluator::new(&config),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fresh context for one turn; its RNG is forked from the engine's.
    pub fn new_context(&mut self, deadline: Deadline) -> SearchContext {
        SearchContext::new(deadline, StdRng::seed_from_u64(self.rng.gen()))
    }

    fn evaluate(&self, position: &Position) -> i32 {
        let score = self.evaluator.evaluate(&position.board);
        match position.turn {
            Color::Red => score,
            Color::Black => -score,
        }
    }

    /// Plain negamax. `Ok(None)` means the deadline passed.
    pub fn minimax(
        &self,
        position: &Position,
        depth: u8,
        ctx: &mut SearchContext,
    ) -> EngineResult<Option<i32>> {
        if ctx.enter() {
            return Ok(None);
        }

        let moves = position.generate_moves()?;
        if moves.is_empty() {
            return Ok(Some(-INFINITY));
        }
        if depth == 0 {
            return Ok(Some(self.evaluate(position)));
        }

        let mut best = -INFINITY;
        for mv in &moves {
            let mut child = position.clone();
            child.play(mv)?;
            let Some(score) = self.minimax(&child, depth - 1, ctx)? else {
                return Ok(None);
            };
            best = best.max(-score);
        }
        Ok(Some(best))
    }

    /// Negamax with alpha-beta pruning. A side without moves scores
    /// `-INFINITY - depth`, so nearer losses score worse than distant ones.
    /// `Ok(None)` means the deadline passed.
    pub fn alphabeta(
        &self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ctx: &mut SearchContext,
    ) -> EngineResult<Option<i32>> {
        if ctx.enter() {
            return Ok(None);
        }

        let moves = position.generate_moves()?;
        if moves.is_empty() {
            return Ok(Some(-INFINITY - i32::from(depth)));
        }
        if depth == 0 {
            return Ok(Some(self.evaluate(position)));
        }

        for mv in &moves {
            let mut child = position.clone();
            child.play(mv)?;
            let Some(score) = self.alphabeta(&child, depth - 1, -beta, -alpha, ctx)? else {
                return Ok(None);
            };
            alpha = alpha.max(-score);
            if alpha >= beta {
                break;
            }
        }
        Ok(Some(alpha))
    }

    fn score_root_move(
        &self,
        root: &Position,
        mv: &Move,
        depth: u8,
        ctx: &mut SearchContext,
    ) -> EngineResult<Option<i32>> {
        let mut child = root.clone();
        child.play(mv)?;
        let remaining = depth.saturating_sub(1);
        let score = match self.config.algorithm {
            Algorithm::AlphaBeta => self.alphabeta(&child, remaining, -INFINITY, INFINITY, ctx)?,
            Algorithm::Minimax => self.minimax(&child, remaining, ctx)?,
        };
        Ok(score.map(|s| -s))
    }

    /// Scores every root move at `depth` and keeps all moves tied for the
    /// best score. `Ok(None)` if the deadline passed mid-way.
    pub fn best_at_depth(
        &self,
        root: &Position,
        root_moves: &[Move],
        depth: u8,
        ctx: &mut SearchContext,
    ) -> EngineResult<Option<RootScores>> {
        let mut best = RootScores {
            score: i32::MIN,
            best_moves: Vec::new(),
        };

        for mv in root_moves {
            let Some(score) = self.score_root_move(root, mv, depth, ctx)? else {
                return Ok(None);
            };
            if score > best.score {
                best.score = score;
                best.best_moves.clear();
                best.best_moves.push(mv.clone());
            } else if score == best.score {
                best.best_moves.push(mv.clone());
            }
        }

        if best.best_moves.is_empty() {
            return Err(EngineError::NoRootMoves);
        }
        Ok(Some(best))
    }

    /// Runs `best_at_depth` over `depths` until the deadline passes or the
    /// result is a decided game. Only completed iterations count; before any
    /// completes, the first root move stands with the worst score.
    pub fn iterative_deepening(
        &self,
        root: &Position,
        root_moves: &[Move],
        depths: RangeInclusive<u8>,
        ctx: &mut SearchContext,
    ) -> EngineResult<(RootScores, u8)> {
        let first = root_moves.first().ok_or(EngineError::NoRootMoves)?;
        let mut confirmed = RootScores {
            score: -INFINITY,
            best_moves: vec![first.clone()],
        };
        let mut confirmed_depth = 0;

        for depth in depths {
            let Some(result) = self.best_at_depth(root, root_moves, depth, ctx)? else {
                log::debug!(
                    "{} chosen before depth {depth} at {:.0} ms",
                    first_of(&confirmed),
                    ctx.deadline.elapsed_ms()
                );
                break;
            };

            log::debug!(
                "{} is best at depth {depth} with score {} reached in {:.0} ms",
                first_of(&result),
                result.score,
                ctx.deadline.elapsed_ms()
            );
            let decided = result.score.abs() == INFINITY;
            confirmed = result;
            confirmed_depth = depth;
            if decided {
                break;
            }
        }

        Ok((confirmed, confirmed_depth))
    }

    /// Parses move strings and searches among them.
    pub fn search_strings<S: AsRef<str>>(
        &mut self,
        position: &Position,
        root_moves: &[S],
        limit: SearchLimit,
    ) -> EngineResult<SearchOutcome> {
        let moves = root_moves
            .iter()
            .map(|s| s.as_ref().parse::<Move>())
            .collect::<EngineResult<Vec<_>>>()?;
        self.search(position, &moves, limit)
    }

    /// Searches among the moves generated for `position` itself.
    pub fn search_position(
        &mut self,
        position: &Position,
        limit: SearchLimit,
    ) -> EngineResult<SearchOutcome> {
        let moves = position.generate_moves()?;
        self.search(position, &moves, limit)
    }

    fn check_root_moves(position: &Position, root_moves: &[Move]) -> EngineResult<()> {
        let legal = position.generate_moves()?;
        for mv in root_moves.iter().filter(|mv| !legal.contains(mv)) {
            log::warn!("Supplied move {mv} is not among the generated legal moves");
        }
        Ok(())
    }
}

fn first_of(scores: &RootScores) -> String {
    scores
        .best_moves
        .first()
        .map_or_else(String::new, ToString::to_string)
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        position: &Position,
        root_moves: &[Move],
        limit: SearchLimit,
    ) -> EngineResult<SearchOutcome> {
        if root_moves.is_empty() {
            return Err(EngineError::NoRootMoves);
        }
        let max_depth = self.config.max_depth.max(1);
        let (deadline, depths) = match limit {
            SearchLimit::Time(ms) => (Deadline::starting_now(Some(ms)), 1..=max_depth),
            SearchLimit::Depth(d) => {
                let d = d.clamp(1, max_depth);
                (Deadline::unlimited(), d..=d)
            }
        };
        let mut ctx = self.new_context(deadline);

        Self::check_root_moves(position, root_moves)?;
        let (confirmed, depth) = self.iterative_deepening(position, root_moves, depths, &mut ctx)?;

        let mv = confirmed
            .best_moves
            .choose(&mut ctx.rng)
            .cloned()
            .ok_or(EngineError::NoRootMoves)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let time_ms = ctx.deadline.elapsed_ms().max(0.0) as u64;
        let stats = SearchStats {
            depth,
            nodes: ctx.nodes,
            time_ms,
        };
        log::info!(
            "{mv} chosen with score {} (depth {}, {} nodes, {} ms, {} tied)",
            confirmed.score,
            stats.depth,
            stats.nodes,
            stats.time_ms,
            confirmed.best_moves.len()
        );

        Ok(SearchOutcome {
            mv,
            score: confirmed.score,
            stats,
        })
    }
}
