//! Slide/merge transformation of a board.
//!
//! Every direction reduces to the same line algorithm: each of the 4 lines
//! along the direction's [`Axis`] is read in traversal order (reversed for
//! `Down`/`Right`), compacted and merged towards index 0 by [`merge_line`],
//! and written back with the same mapping.
//!
//! | direction | axis   | traversal |
//! |-----------|--------|-----------|
//! | `Up`      | column | forward   |
//! | `Down`    | column | reversed  |
//! | `Left`    | row    | forward   |
//! | `Right`   | row    | reversed  |
//!
//! [`Axis`]: crate::Axis

use arrayvec::ArrayVec;

use crate::{
    InvalidDirectionError,
    core::{
        board::{BOARD_SIZE, Board, Line},
        direction::Direction,
        rank::Rank,
    },
};

/// Result of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the slide.
    pub board: Board,
    /// Points earned: `2^rank` for every tile created by a merge.
    pub score_delta: u64,
    /// Number of merges performed.
    pub merges: usize,
    /// Whether any cell differs from the input board.
    pub changed: bool,
}

/// Result of compacting a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOutcome {
    pub line: Line,
    pub score_delta: u64,
    pub merges: usize,
}

/// Compacts a line towards index 0, merging equal neighbours once.
///
/// A slot that received a merge is closed for the rest of the pass, so
/// `[1, 1, 1, 1]` becomes `[2, 2, 0, 0]` and never `[3, 0, 0, 0]`. Empty
/// cells are skipped and never merge. Two [`Rank::MAX`] tiles are left
/// unmerged since the result would not be representable.
///
/// ```
/// use twenty48_engine::{Rank, move_engine::merge_line};
///
/// let r = |v| Rank::new(v).unwrap();
/// let outcome = merge_line([r(1), r(0), r(1), r(2)]);
/// assert_eq!(outcome.line, [r(2), r(2), r(0), r(0)]);
/// assert_eq!(outcome.score_delta, 4);
/// ```
#[must_use]
pub fn merge_line(line: Line) -> LineOutcome {
    let mut out = [Rank::EMPTY; BOARD_SIZE];
    let mut len = 0;
    // Whether `out[len - 1]` may still absorb an equal tile.
    let mut open = false;
    let mut score_delta = 0;
    let mut merges = 0;

    for rank in line.into_iter().filter(|rank| !rank.is_empty()) {
        if open && out[len - 1] == rank {
            if let Some(merged) = rank.succ() {
                out[len - 1] = merged;
                score_delta += merged.value();
                merges += 1;
                open = false;
                continue;
            }
        }
        out[len] = rank;
        len += 1;
        open = true;
    }

    LineOutcome {
        line: out,
        score_delta,
        merges,
    }
}

/// Slides `board` in `direction`.
///
/// Total for every board and direction. When nothing moves, the returned
/// outcome has `changed == false`, `score_delta == 0` and the input board.
///
/// ```
/// use twenty48_engine::{Board, Direction, move_engine};
///
/// let board = Board::from_ranks([
///     [1, 1, 1, 1],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
/// ])
/// .unwrap();
///
/// let outcome = move_engine::apply(&board, Direction::Right);
/// assert_eq!(outcome.board.to_ranks()[0], [0, 0, 2, 2]);
/// assert_eq!(outcome.score_delta, 8);
/// assert!(outcome.changed);
/// ```
#[must_use]
pub fn apply(board: &Board, direction: Direction) -> MoveOutcome {
    let axis = direction.axis();
    let reversed = direction.is_reversed();

    let mut result = *board;
    let mut score_delta = 0;
    let mut merges = 0;
    for index in 0..BOARD_SIZE {
        let line = merge_line(board.line(axis, index, reversed));
        result.set_line(axis, index, reversed, line.line);
        score_delta += line.score_delta;
        merges += line.merges;
    }

    MoveOutcome {
        board: result,
        score_delta,
        merges,
        changed: result != *board,
    }
}

/// Like [`apply`], for a raw direction index (`Up = 0 .. Right = 3`).
pub fn apply_index(board: &Board, index: i64) -> Result<MoveOutcome, InvalidDirectionError> {
    let direction = Direction::try_from(index)?;
    Ok(apply(board, direction))
}

/// Directions that change `board`, in `Up, Down, Left, Right` order.
#[must_use]
pub fn legal_directions(board: &Board) -> ArrayVec<Direction, { Direction::LEN }> {
    Direction::ALL
        .into_iter()
        .filter(|&dir| apply(board, dir).changed)
        .collect()
}

/// Whether any direction changes `board`.
#[must_use]
pub fn can_move(board: &Board) -> bool {
    Direction::ALL.into_iter().any(|dir| apply(board, dir).changed)
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn line(ranks: [u8; 4]) -> Line {
        ranks.map(|r| Rank::new(r).unwrap())
    }

    fn board(ranks: [[u8; 4]; 4]) -> Board {
        Board::from_ranks(ranks).unwrap()
    }

    fn random_board(rng: &mut Pcg32) -> Board {
        let mut ranks = [[0; 4]; 4];
        for cell in ranks.iter_mut().flatten() {
            *cell = if rng.random_bool(0.3) {
                0
            } else {
                rng.random_range(1..=4)
            };
        }
        board(ranks)
    }

    #[test]
    fn test_single_merge_rule() {
        let outcome = merge_line(line([1, 1, 1, 1]));
        assert_eq!(outcome.line, line([2, 2, 0, 0]));
        assert_eq!(outcome.score_delta, 8);
        assert_eq!(outcome.merges, 2);
    }

    #[test]
    fn test_no_phantom_merge_across_gap() {
        let outcome = merge_line(line([1, 0, 1, 0]));
        assert_eq!(outcome.line, line([2, 0, 0, 0]));
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_merged_slot_is_closed() {
        // [2,1,1,2]: the merged 2 must not absorb the trailing 2.
        let outcome = merge_line(line([2, 1, 1, 2]));
        assert_eq!(outcome.line, line([2, 2, 2, 0]));
        assert_eq!(outcome.score_delta, 4);

        let outcome = merge_line(line([1, 1, 2, 0]));
        assert_eq!(outcome.line, line([2, 2, 0, 0]));
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_merge_prefers_leading_pair() {
        let outcome = merge_line(line([3, 3, 3, 0]));
        assert_eq!(outcome.line, line([4, 3, 0, 0]));
        assert_eq!(outcome.score_delta, 16);
    }

    #[test]
    fn test_empty_and_unmergeable_lines() {
        assert_eq!(merge_line(line([0, 0, 0, 0])).line, line([0, 0, 0, 0]));
        let outcome = merge_line(line([1, 2, 3, 4]));
        assert_eq!(outcome.line, line([1, 2, 3, 4]));
        assert_eq!(outcome.score_delta, 0);
        assert_eq!(outcome.merges, 0);
    }

    #[test]
    fn test_max_rank_does_not_merge() {
        let outcome = merge_line(line([31, 31, 0, 0]));
        assert_eq!(outcome.line, line([31, 31, 0, 0]));
        assert_eq!(outcome.score_delta, 0);

        let outcome = merge_line(line([30, 30, 31, 31]));
        assert_eq!(outcome.line, line([31, 31, 31, 0]));
        assert_eq!(outcome.score_delta, 1 << 31);
    }

    #[test]
    fn test_direction_mapping() {
        let b = board([
            [1, 0, 0, 1], //
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [2, 0, 0, 0],
        ]);

        let up = apply(&b, Direction::Up).board;
        assert_eq!(
            up.to_ranks(),
            [[1, 0, 0, 1], [2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
        );

        let down = apply(&b, Direction::Down).board;
        assert_eq!(
            down.to_ranks(),
            [[0, 0, 0, 0], [0, 0, 0, 0], [1, 0, 0, 0], [2, 0, 0, 1]]
        );

        let left = apply(&b, Direction::Left).board;
        assert_eq!(
            left.to_ranks(),
            [[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0]]
        );

        let right = apply(&b, Direction::Right).board;
        assert_eq!(
            right.to_ranks(),
            [[0, 0, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 2]]
        );
    }

    #[test]
    fn test_terminal_slide_is_idempotent() {
        let b = board([
            [0, 1, 0, 2], //
            [3, 0, 0, 0],
            [0, 0, 4, 0],
            [1, 2, 3, 4],
        ]);
        for dir in Direction::ALL {
            let first = apply(&b, dir);
            let second = apply(&first.board, dir);
            assert!(!second.changed, "{dir}");
            assert_eq!(second.score_delta, 0, "{dir}");
            assert_eq!(second.board, first.board, "{dir}");
        }
    }

    #[test]
    fn test_no_change_means_no_score() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let b = random_board(&mut rng);
            for dir in Direction::ALL {
                let outcome = apply(&b, dir);
                if !outcome.changed {
                    assert_eq!(outcome.score_delta, 0);
                    assert_eq!(outcome.merges, 0);
                    assert_eq!(outcome.board, b);
                }
            }
        }
    }

    #[test]
    fn test_direction_symmetry() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let b = random_board(&mut rng);

            let left = apply(&b, Direction::Left);
            let right = apply(&b.mirrored_horizontally(), Direction::Right);
            assert_eq!(left.board.mirrored_horizontally(), right.board, "\n{b}");
            assert_eq!(left.score_delta, right.score_delta);

            let up = apply(&b, Direction::Up);
            let down = apply(&b.mirrored_vertically(), Direction::Down);
            assert_eq!(up.board.mirrored_vertically(), down.board, "\n{b}");
            assert_eq!(up.score_delta, down.score_delta);

            let up_via_left = apply(&b.transposed(), Direction::Left);
            assert_eq!(up.board.transposed(), up_via_left.board, "\n{b}");
        }
    }

    #[test]
    fn test_tile_sum_is_preserved() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let b = random_board(&mut rng);
            let sum = |b: &Board| b.to_values().iter().flatten().sum::<u64>();
            for dir in Direction::ALL {
                let outcome = apply(&b, dir);
                assert_eq!(sum(&outcome.board), sum(&b));
                assert_eq!(
                    outcome.board.tile_count() + outcome.merges,
                    b.tile_count()
                );
            }
        }
    }

    #[test]
    fn test_apply_index() {
        let b = board([[1, 1, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let outcome = apply_index(&b, 3).unwrap();
        assert_eq!(outcome, apply(&b, Direction::Right));
        assert_eq!(
            apply_index(&b, 4),
            Err(InvalidDirectionError { index: 4 })
        );
        assert_eq!(
            apply_index(&b, -1),
            Err(InvalidDirectionError { index: -1 })
        );
    }

    #[test]
    fn test_legal_directions() {
        assert!(legal_directions(&Board::EMPTY).is_empty());
        assert!(!can_move(&Board::EMPTY));

        let corner = board([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(
            legal_directions(&corner).as_slice(),
            &[Direction::Down, Direction::Right]
        );

        let stuck = board([
            [1, 2, 1, 2], //
            [2, 1, 2, 1],
            [1, 2, 1, 2],
            [2, 1, 2, 1],
        ]);
        assert!(!can_move(&stuck));
    }
}
