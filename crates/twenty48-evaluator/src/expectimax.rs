//! Depth-limited expectimax move selection.
//!
//! The search alternates two node kinds:
//!
//! - **Max nodes** try every direction that changes the board and keep the
//!   best expected value.
//! - **Chance nodes** average over every empty cell receiving a rank 1 tile
//!   (probability `1 - spawn_four_probability`) or a rank 2 tile.
//!
//! Leaves are scored with [`heuristic::evaluate`]. A branch is cut off early
//! once its cumulative probability drops below `prob_cutoff`, and chance
//! nodes are cached per search so transpositions are scored once.
//!
//! # Usage
//!
//! ```
//! use twenty48_engine::{Board, MoveSelector, Session};
//! use twenty48_evaluator::expectimax::{ExpectimaxConfig, ExpectimaxSelector};
//!
//! let mut session = Session::new();
//! session.set_cell(0, 0, 1).unwrap();
//! session.set_cell(0, 1, 1).unwrap();
//!
//! let mut selector = ExpectimaxSelector::new(ExpectimaxConfig::default()).unwrap();
//! assert!(selector.select_move(session.board()).is_some());
//! assert!(session.request_engine_move(&mut selector).is_ok());
//! ```

use std::collections::HashMap;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use twenty48_engine::{Board, Direction, MoveSelector, Rank, move_engine};

use crate::{InvalidConfigError, heuristic};

/// Search parameters.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "depth": 3, "prob_cutoff": 0.0001, "spawn_four_probability": 0.1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpectimaxConfig {
    /// Number of (move, spawn) plies searched.
    pub depth: u32,
    /// Chance branches less likely than this are scored statically.
    pub prob_cutoff: f64,
    /// Probability that a spawned tile is a 4.
    pub spawn_four_probability: f64,
}

impl Default for ExpectimaxConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            prob_cutoff: 1e-4,
            spawn_four_probability: 0.1,
        }
    }
}

impl ExpectimaxConfig {
    pub const MAX_DEPTH: u32 = 6;

    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if !(1..=Self::MAX_DEPTH).contains(&self.depth) {
            return Err(InvalidConfigError {
                reason: "depth must be between 1 and 6",
            });
        }
        if !(0.0..1.0).contains(&self.prob_cutoff) {
            return Err(InvalidConfigError {
                reason: "prob_cutoff must be in [0, 1)",
            });
        }
        if !(0.0..=1.0).contains(&self.spawn_four_probability) {
            return Err(InvalidConfigError {
                reason: "spawn_four_probability must be in [0, 1]",
            });
        }
        Ok(())
    }
}

/// Counters of the most recent search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
}

/// [`MoveSelector`] backed by expectimax search.
///
/// Returns `None` exactly when no direction changes the board.
#[derive(Debug, Clone)]
pub struct ExpectimaxSelector {
    config: ExpectimaxConfig,
    stats: SearchStats,
}

impl ExpectimaxSelector {
    pub fn new(config: ExpectimaxConfig) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        heuristic::warm();
        Ok(Self {
            config,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ExpectimaxConfig {
        &self.config
    }

    #[must_use]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Best direction for `board`, or `None` if the board is stuck.
    pub fn best_move(&mut self, board: &Board) -> Option<Direction> {
        let mut search = Search::new(&self.config);
        let (value, direction) = search.max_node(board, self.config.depth, 1.0);
        self.stats = search.stats;
        tracing::trace!(
            nodes = self.stats.nodes,
            cache_hits = self.stats.cache_hits,
            value,
            direction = direction.map(Direction::as_str),
            "expectimax search finished"
        );
        direction
    }

    /// Expected value of each direction in `Up, Down, Left, Right` order;
    /// `None` for directions that do not change the board.
    pub fn branch_values(&mut self, board: &Board) -> [Option<f64>; Direction::LEN] {
        let mut search = Search::new(&self.config);
        let values = Direction::ALL.map(|direction| {
            let outcome = move_engine::apply(board, direction);
            outcome
                .changed
                .then(|| search.chance_node(&outcome.board, self.config.depth, 1.0))
        });
        self.stats = search.stats;
        values
    }
}

impl MoveSelector for ExpectimaxSelector {
    fn select_move(&mut self, board: &Board) -> Option<Direction> {
        self.best_move(board)
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    value: f64,
    depth: u32,
}

struct Search<'a> {
    config: &'a ExpectimaxConfig,
    cache: HashMap<Board, CacheEntry>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(config: &'a ExpectimaxConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
            stats: SearchStats::default(),
        }
    }

    fn max_node(&mut self, board: &Board, depth: u32, prob: f64) -> (f64, Option<Direction>) {
        self.stats.nodes += 1;
        let mut best: Option<(f64, Direction)> = None;
        for direction in Direction::ALL {
            let outcome = move_engine::apply(board, direction);
            if !outcome.changed {
                continue;
            }
            let value = self.chance_node(&outcome.board, depth, prob);
            if best.is_none_or(|(best_value, _)| value > best_value) {
                best = Some((value, direction));
            }
        }
        match best {
            Some((value, direction)) => (value, Some(direction)),
            // Stuck boards are worth nothing.
            None => (0.0, None),
        }
    }

    fn chance_node(&mut self, board: &Board, depth: u32, prob: f64) -> f64 {
        self.stats.nodes += 1;
        if depth == 0 || prob < self.config.prob_cutoff {
            return heuristic::evaluate(board);
        }
        if let Some(entry) = self.cache.get(board).filter(|e| e.depth >= depth) {
            self.stats.cache_hits += 1;
            return entry.value;
        }

        let empty = board
            .empty_positions()
            .collect::<ArrayVec<_, { Board::CELL_COUNT }>>();
        if empty.is_empty() {
            return heuristic::evaluate(board);
        }

        let four = self.config.spawn_four_probability;
        let spawns = [(Rank::MIN_TILE, 1.0 - four), (Rank::saturating_new(2), four)];
        #[expect(clippy::cast_precision_loss)]
        let cell_prob = prob / empty.len() as f64;

        let mut total = 0.0;
        for (row, col) in &empty {
            for (rank, spawn_prob) in spawns {
                if spawn_prob <= 0.0 {
                    continue;
                }
                let mut child = *board;
                if child.set(*row, *col, rank).is_err() {
                    continue;
                }
                let (value, _) = self.max_node(&child, depth - 1, cell_prob * spawn_prob);
                total += value * spawn_prob;
            }
        }
        #[expect(clippy::cast_precision_loss)]
        let value = total / empty.len() as f64;

        self.cache.insert(*board, CacheEntry { value, depth });
        value
    }
}
