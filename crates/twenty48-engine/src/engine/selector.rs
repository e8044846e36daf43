use crate::core::{board::Board, direction::Direction};

/// Chooses the next engine move for a board.
///
/// Returning `None` means "no move". A selector may return a direction that
/// does not change the board; the session reports that as a no-effect
/// outcome instead of trusting the selector.
///
/// Closures implement this trait, so deterministic doubles are one line:
///
/// ```
/// use twenty48_engine::{Board, Direction, MoveSelector};
///
/// let mut selector = |_: &Board| Some(Direction::Up);
/// assert_eq!(selector.select_move(&Board::EMPTY), Some(Direction::Up));
/// ```
pub trait MoveSelector {
    fn select_move(&mut self, board: &Board) -> Option<Direction>;
}

impl<F> MoveSelector for F
where
    F: FnMut(&Board) -> Option<Direction>,
{
    fn select_move(&mut self, board: &Board) -> Option<Direction> {
        self(board)
    }
}
