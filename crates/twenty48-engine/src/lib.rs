//! Board move engine and session state machine for a controllable 2048 board.
//!
//! - [`core`] holds the plain data types: [`Rank`], [`Board`], [`Direction`].
//! - [`engine`] holds the pure [`move_engine`] and the stateful [`Session`]
//!   that reconciles hand edits, engine moves and score.
//!
//! Tiles are stored as ranks (`2^rank` is the displayed value, rank 0 is
//! empty). Conversion to displayed values happens only at the boundary via
//! [`Rank::value`] and [`Rank::from_value`].
//!
//! # Example
//!
//! ```
//! use twenty48_engine::{Board, Direction, Session};
//!
//! let mut session = Session::new();
//! session.set_cell(0, 0, 1).unwrap();
//! session.set_cell(0, 3, 1).unwrap();
//!
//! let applied = session.apply_direction(Direction::Left).unwrap();
//! assert_eq!(applied.score_delta, 4);
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.board.to_ranks()[0], [2, 0, 0, 0]);
//! assert!(snapshot.mode.is_engine_driven());
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction index {index}")]
pub struct InvalidDirectionError {
    pub index: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("rank {rank} is outside the representable range 0..=31")]
pub struct InvalidRankError {
    pub rank: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{value} is not a tile value")]
pub struct InvalidValueError {
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SetCellError {
    #[display("cell ({row}, {col}) is outside the 4x4 board")]
    OutOfBounds { row: usize, col: usize },
    #[display("{_0}")]
    InvalidRank(InvalidRankError),
}

impl From<InvalidRankError> for SetCellError {
    fn from(err: InvalidRankError) -> Self {
        Self::InvalidRank(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("moving {direction} has no effect on the board")]
pub struct NoEffectError {
    pub direction: Direction,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum EngineMoveError {
    #[display("no direction changes the board")]
    NoLegalMove,
    #[display("{_0}")]
    NoEffect(NoEffectError),
}

impl From<NoEffectError> for EngineMoveError {
    fn from(err: NoEffectError) -> Self {
        Self::NoEffect(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid randomize policy: {reason}")]
pub struct RandomizePolicyError {
    pub reason: &'static str,
}
