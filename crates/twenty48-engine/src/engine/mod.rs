//! Move engine and session state management.
//!
//! - [`move_engine`] - Pure slide/merge transformation of a [`Board`]
//! - [`Session`] - Owns one board plus score, edit/drive mode and status
//! - [`SessionStats`] - Score and move counters of a session
//! - [`SharedSession`] - Thread-safe handle serializing session operations
//! - [`MoveSelector`] - Capability for choosing the next engine move
//!
//! # Session Flow
//!
//! 1. Start from an empty board in [`SessionMode::ManualEdit`]
//! 2. Edit cells by hand, clear, or randomize the board
//! 3. Apply a direction directly or ask a [`MoveSelector`] for one
//! 4. A committed move switches to [`SessionMode::EngineDriven`] and adds
//!    its score; front-ends may then spawn a new tile
//! 5. Any further edit switches back to manual mode
//!
//! # Example
//!
//! ```
//! use twenty48_engine::{Board, Direction, EngineMoveError, Session};
//!
//! let mut session = Session::new();
//! session.set_cell(3, 0, 2).unwrap();
//! session.set_cell(3, 1, 2).unwrap();
//!
//! // A selector is any `FnMut(&Board) -> Option<Direction>`.
//! let mut always_left = |_: &Board| Some(Direction::Left);
//! let applied = session.request_engine_move(&mut always_left).unwrap();
//! assert_eq!(applied.score_delta, 8);
//!
//! // Sliding left again changes nothing.
//! assert!(matches!(
//!     session.request_engine_move(&mut always_left),
//!     Err(EngineMoveError::NoEffect(_))
//! ));
//! ```
//!
//! [`Board`]: crate::Board

pub use self::{selector::*, session::*, session_stats::*, shared_session::*};

pub mod move_engine;
mod selector;
mod session;
mod session_stats;
mod shared_session;
