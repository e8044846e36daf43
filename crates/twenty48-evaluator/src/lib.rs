//! Move selection for the 2048 engine.
//!
//! The engine consumes move selection only through the
//! [`MoveSelector`](twenty48_engine::MoveSelector) capability; this crate
//! provides the default implementation.
//!
//! - [`heuristic`] - Static evaluation of a board (empty cells, merge
//!   opportunities, monotonicity and tile mass, scored per row and column)
//! - [`expectimax`] - [`ExpectimaxSelector`](expectimax::ExpectimaxSelector),
//!   a depth-limited expectimax search over moves and tile spawns
//!
//! # Architecture
//!
//! ```text
//! ExpectimaxSelector (choose a direction)
//!     ↓ scores leaves with
//! heuristic::evaluate (score a board)
//!     ↓ sums
//! heuristic::line_score (score one row or column, table-cached)
//! ```

pub mod expectimax;
pub mod heuristic;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid selector configuration: {reason}")]
pub struct InvalidConfigError {
    pub reason: &'static str,
}
