use std::{fmt, ops::RangeInclusive};

use arrayvec::ArrayVec;
use rand::{
    Rng,
    seq::{IndexedRandom as _, index},
};
use serde::Serialize;

use crate::{
    EngineMoveError, InvalidRankError, NoEffectError, RandomizePolicyError, SetCellError,
    core::{board::Board, direction::Direction, rank::Rank},
};

use super::{move_engine, selector::MoveSelector, session_stats::SessionStats};

/// Who last changed the board.
///
/// Front-ends read this to decide whether a new random tile should follow;
/// the move engine never looks at it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    ManualEdit,
    EngineDriven,
}

impl SessionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManualEdit => "manual edit",
            Self::EngineDriven => "engine driven",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Most recent state-changing operation, shown as a status line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum LastAction {
    #[default]
    None,
    Cleared,
    Randomized,
    Edited {
        row: usize,
        col: usize,
    },
    Moved(Direction),
    Spawned {
        row: usize,
        col: usize,
    },
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("-"),
            Self::Cleared => f.write_str("cleared"),
            Self::Randomized => f.write_str("randomized"),
            Self::Edited { row, col } => write!(f, "edited ({row}, {col})"),
            Self::Moved(direction) => write!(f, "moved {direction}"),
            Self::Spawned { row, col } => write!(f, "spawned at ({row}, {col})"),
        }
    }
}

/// Bounds used by [`Session::randomize`].
///
/// The default places 8 to 12 tiles with ranks 1 to 10 (values 2 to 1024).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomizePolicy {
    tile_count: RangeInclusive<usize>,
    ranks: RangeInclusive<u8>,
}

impl Default for RandomizePolicy {
    fn default() -> Self {
        Self {
            tile_count: 8..=12,
            ranks: 1..=10,
        }
    }
}

impl RandomizePolicy {
    pub fn new(
        tile_count: RangeInclusive<usize>,
        ranks: RangeInclusive<u8>,
    ) -> Result<Self, RandomizePolicyError> {
        if tile_count.is_empty() {
            return Err(RandomizePolicyError {
                reason: "tile count range is empty",
            });
        }
        if *tile_count.end() > Board::CELL_COUNT {
            return Err(RandomizePolicyError {
                reason: "tile count exceeds the number of cells",
            });
        }
        if ranks.is_empty() {
            return Err(RandomizePolicyError {
                reason: "rank range is empty",
            });
        }
        if *ranks.start() < Rank::MIN_TILE.get() || *ranks.end() > Rank::MAX.get() {
            return Err(RandomizePolicyError {
                reason: "rank range must lie within 1..=31",
            });
        }
        Ok(Self { tile_count, ranks })
    }

    #[must_use]
    pub fn tile_count(&self) -> &RangeInclusive<usize> {
        &self.tile_count
    }

    #[must_use]
    pub fn ranks(&self) -> &RangeInclusive<u8> {
        &self.ranks
    }
}

/// Result of a committed engine move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedMove {
    pub direction: Direction,
    pub score_delta: u64,
    pub merges: usize,
}

/// Immutable copy of the observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub score: u64,
    pub mode: SessionMode,
    pub last_action: LastAction,
    pub stats: SessionStats,
}

/// Stateful owner of one board.
///
/// Reconciles hand edits and engine moves: every edit puts the session in
/// [`SessionMode::ManualEdit`], every committed move in
/// [`SessionMode::EngineDriven`]. Operations that fail leave the session
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
    stats: SessionStats,
    mode: SessionMode,
    last_action: LastAction,
    policy: RandomizePolicy,
}

impl Session {
    /// Probability that a spawned tile has rank 2 instead of rank 1.
    pub const SPAWN_FOUR_PROBABILITY: f64 = 0.1;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: RandomizePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn policy(&self) -> &RandomizePolicy {
        &self.policy
    }

    /// Overwrites one cell with a raw rank.
    pub fn set_cell(&mut self, row: usize, col: usize, rank: u32) -> Result<(), SetCellError> {
        self.board
            .get(row, col)
            .ok_or(SetCellError::OutOfBounds { row, col })?;
        let rank = Rank::try_from_u32(rank)?;
        self.write_cell(row, col, rank)
    }

    /// Steps a cell one rank up; an empty cell becomes a 2.
    pub fn increase_cell(&mut self, row: usize, col: usize) -> Result<(), SetCellError> {
        let rank = self
            .board
            .get(row, col)
            .ok_or(SetCellError::OutOfBounds { row, col })?;
        let rank = rank.succ().ok_or(InvalidRankError {
            rank: u32::from(Rank::MAX.get()) + 1,
        })?;
        self.write_cell(row, col, rank)
    }

    /// Steps a cell one rank down; a 2 becomes empty.
    pub fn decrease_cell(&mut self, row: usize, col: usize) -> Result<(), SetCellError> {
        let rank = self
            .board
            .get(row, col)
            .ok_or(SetCellError::OutOfBounds { row, col })?;
        self.write_cell(row, col, rank.pred())
    }

    fn write_cell(&mut self, row: usize, col: usize, rank: Rank) -> Result<(), SetCellError> {
        self.board.set(row, col, rank)?;
        self.mode = SessionMode::ManualEdit;
        self.last_action = LastAction::Edited { row, col };
        tracing::trace!(row, col, %rank, "cell edited");
        Ok(())
    }

    /// Empties the board and resets score and statistics.
    pub fn clear(&mut self) {
        self.board = Board::EMPTY;
        self.stats = SessionStats::new();
        self.mode = SessionMode::ManualEdit;
        self.last_action = LastAction::Cleared;
        tracing::debug!("board cleared");
    }

    /// Clears, then scatters random tiles according to the session's
    /// [`RandomizePolicy`].
    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.clear();

        let count = rng.random_range(self.policy.tile_count.clone());
        let mut cells = [[Rank::EMPTY; Board::SIZE]; Board::SIZE];
        for cell in index::sample(rng, Board::CELL_COUNT, count) {
            cells[cell / Board::SIZE][cell % Board::SIZE] =
                Rank::saturating_new(rng.random_range(self.policy.ranks.clone()));
        }
        self.board = Board::new(cells);

        self.last_action = LastAction::Randomized;
        tracing::debug!(tiles = count, "board randomized");
    }

    /// Slides the board and commits the result if anything moved.
    pub fn apply_direction(&mut self, direction: Direction) -> Result<AppliedMove, NoEffectError> {
        let outcome = move_engine::apply(&self.board, direction);
        if !outcome.changed {
            tracing::trace!(%direction, "move has no effect");
            return Err(NoEffectError { direction });
        }

        self.board = outcome.board;
        self.stats.record_move(outcome.score_delta, outcome.merges);
        self.mode = SessionMode::EngineDriven;
        self.last_action = LastAction::Moved(direction);
        tracing::debug!(
            %direction,
            score_delta = outcome.score_delta,
            score = self.stats.score(),
            "move committed"
        );

        Ok(AppliedMove {
            direction,
            score_delta: outcome.score_delta,
            merges: outcome.merges,
        })
    }

    /// Asks `selector` for a direction and applies it.
    ///
    /// A selector answering "no move" yields [`EngineMoveError::NoLegalMove`];
    /// a direction that changes nothing yields [`EngineMoveError::NoEffect`].
    /// Neither touches the session.
    pub fn request_engine_move<S>(&mut self, selector: &mut S) -> Result<AppliedMove, EngineMoveError>
    where
        S: MoveSelector + ?Sized,
    {
        let Some(direction) = selector.select_move(&self.board) else {
            tracing::trace!("selector found no move");
            return Err(EngineMoveError::NoLegalMove);
        };
        Ok(self.apply_direction(direction)?)
    }

    /// Places a rank 1 (or, rarely, rank 2) tile in a random empty cell.
    ///
    /// Returns the position, or `None` if the board is full. The mode is left
    /// as is.
    pub fn spawn_tile<R>(&mut self, rng: &mut R) -> Option<(usize, usize)>
    where
        R: Rng + ?Sized,
    {
        let empty = self
            .board
            .empty_positions()
            .collect::<ArrayVec<_, { Board::CELL_COUNT }>>();
        let &(row, col) = empty.choose(rng)?;
        let rank = if rng.random_bool(Self::SPAWN_FOUR_PROBABILITY) {
            Rank::saturating_new(2)
        } else {
            Rank::MIN_TILE
        };
        self.board.set(row, col, rank).ok()?;
        self.last_action = LastAction::Spawned { row, col };
        tracing::trace!(row, col, %rank, "tile spawned");
        Some((row, col))
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            score: self.stats.score(),
            mode: self.mode,
            last_action: self.last_action,
            stats: self.stats,
        }
    }
}
