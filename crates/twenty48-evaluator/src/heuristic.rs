//! Static board heuristic.
//!
//! A board scores the sum of its 4 rows and 4 columns, each scored
//! independently:
//!
//! ```text
//! line = LOST_PENALTY
//!      + EMPTY_WEIGHT * empty cells
//!      + MERGES_WEIGHT * mergeable neighbours
//!      - MONOTONICITY_WEIGHT * min(left, right) non-monotonicity
//!      - SUM_WEIGHT * Σ rank^SUM_POWER
//! ```
//!
//! All terms work on ranks, not displayed values. Lines whose ranks all fit
//! in 4 bits are looked up in a table of 65536 precomputed scores; lines
//! holding a 65536 tile or larger are scored directly.

use std::sync::OnceLock;

use twenty48_engine::Board;

const LOST_PENALTY: f64 = 200_000.0;
const SUM_POWER: f64 = 3.5;
const SUM_WEIGHT: f64 = 11.0;
const EMPTY_WEIGHT: f64 = 270.0;
const MERGES_WEIGHT: f64 = 700.0;
const MONOTONICITY_POWER: f64 = 4.0;
const MONOTONICITY_WEIGHT: f64 = 47.0;

const TABLE_MAX_RANK: u8 = 0xf;

static LINE_SCORES: OnceLock<Box<[f64]>> = OnceLock::new();

fn line_scores() -> &'static [f64] {
    LINE_SCORES.get_or_init(|| {
        (0..=u16::MAX)
            .map(|key| line_score(unpack_line(key)))
            .collect()
    })
}

/// Forces the line table to be built now instead of on first use.
pub fn warm() {
    let _ = line_scores();
}

fn pack_line(line: [u8; 4]) -> Option<u16> {
    line.iter().try_fold(0u16, |key, &rank| {
        (rank <= TABLE_MAX_RANK).then(|| (key << 4) | u16::from(rank))
    })
}

// Masked to 4 bits, so the casts cannot truncate.
#[expect(clippy::cast_possible_truncation)]
fn unpack_line(key: u16) -> [u8; 4] {
    [12, 8, 4, 0].map(|shift| ((key >> shift) & 0xf) as u8)
}

/// Heuristic value of a board; higher is better.
///
/// ```
/// use twenty48_engine::Board;
/// use twenty48_evaluator::heuristic;
///
/// let tidy = Board::from_ranks([
///     [4, 3, 2, 1],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
/// ])
/// .unwrap();
/// let messy = Board::from_ranks([
///     [1, 4, 2, 3],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 0],
/// ])
/// .unwrap();
/// assert!(heuristic::evaluate(&tidy) > heuristic::evaluate(&messy));
/// ```
#[must_use]
pub fn evaluate(board: &Board) -> f64 {
    let table = line_scores();
    let score = |line: [u8; 4]| match pack_line(line) {
        Some(key) => table[usize::from(key)],
        None => line_score(line),
    };

    let rows = board.to_ranks();
    let columns = board.transposed().to_ranks();
    rows.into_iter().chain(columns).map(score).sum()
}

/// Heuristic value of a single line of ranks, in traversal order.
#[must_use]
pub fn line_score(line: [u8; 4]) -> f64 {
    LOST_PENALTY + empty_term(line) + merges_term(line)
        - monotonicity_term(line)
        - sum_term(line)
}

fn sum_term(line: [u8; 4]) -> f64 {
    line.iter()
        .map(|&rank| f64::from(rank).powf(SUM_POWER))
        .sum::<f64>()
        * SUM_WEIGHT
}

fn empty_term(line: [u8; 4]) -> f64 {
    let empty = line.iter().map(|&rank| u8::from(rank == 0)).sum::<u8>();
    f64::from(empty) * EMPTY_WEIGHT
}

fn merges_term(line: [u8; 4]) -> f64 {
    let mut prev = 0;
    let mut run = 0u8;
    let mut merges = 0u8;
    for rank in line {
        if rank != 0 && rank == prev {
            run += 1;
        } else if run > 0 {
            merges += run + 1;
            run = 0;
        }
        prev = rank;
    }
    if run > 0 {
        merges += run + 1;
    }
    f64::from(merges) * MERGES_WEIGHT
}

fn monotonicity_term(line: [u8; 4]) -> f64 {
    let mut left = 0.0;
    let mut right = 0.0;
    for pair in line.windows(2) {
        let a = f64::from(pair[0]).powf(MONOTONICITY_POWER);
        let b = f64::from(pair[1]).powf(MONOTONICITY_POWER);
        if a > b {
            left += a - b;
        } else {
            right += b - a;
        }
    }
    f64::min(left, right) * MONOTONICITY_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(ranks: [[u8; 4]; 4]) -> Board {
        Board::from_ranks(ranks).unwrap()
    }

    #[test]
    fn test_empty_board_score() {
        let expected = 8.0 * (LOST_PENALTY + 4.0 * EMPTY_WEIGHT);
        assert!((evaluate(&Board::EMPTY) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_pack_round_trip() {
        for line in [[0, 0, 0, 0], [1, 2, 3, 4], [15, 0, 15, 7]] {
            let key = pack_line(line).unwrap();
            assert_eq!(unpack_line(key), line);
        }
        assert_eq!(pack_line([16, 0, 0, 0]), None);
    }

    #[test]
    fn test_table_matches_direct_score() {
        for line in [[0, 0, 0, 0], [1, 1, 2, 2], [5, 3, 3, 9], [15, 14, 13, 12]] {
            let key = pack_line(line).unwrap();
            assert!((line_scores()[usize::from(key)] - line_score(line)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_large_ranks_are_scored_directly() {
        let b = board([
            [20, 18, 0, 0], //
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]);
        let expected = line_score([20, 18, 0, 0])
            + line_score([20, 0, 0, 0])
            + line_score([18, 0, 0, 0])
            + 5.0 * line_score([0, 0, 0, 0]);
        assert!((evaluate(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_merges_term() {
        assert!((merges_term([0, 0, 0, 0])).abs() < f64::EPSILON);
        assert!((merges_term([1, 2, 3, 4])).abs() < f64::EPSILON);
        assert!((merges_term([1, 1, 0, 0]) - 2.0 * MERGES_WEIGHT).abs() < f64::EPSILON);
        assert!((merges_term([2, 2, 2, 0]) - 3.0 * MERGES_WEIGHT).abs() < f64::EPSILON);
        assert!((merges_term([1, 1, 3, 3]) - 4.0 * MERGES_WEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_monotonic_line_has_no_penalty() {
        assert!(monotonicity_term([4, 3, 2, 1]).abs() < f64::EPSILON);
        assert!(monotonicity_term([1, 2, 3, 4]).abs() < f64::EPSILON);
        assert!(monotonicity_term([1, 4, 2, 3]) > 0.0);
    }

    #[test]
    fn test_symmetric_boards_score_equally() {
        let b = board([
            [3, 1, 0, 0], //
            [2, 2, 0, 1],
            [0, 5, 0, 0],
            [1, 0, 0, 7],
        ]);
        let score = evaluate(&b);
        assert!((evaluate(&b.mirrored_horizontally()) - score).abs() < 1e-6);
        assert!((evaluate(&b.mirrored_vertically()) - score).abs() < 1e-6);
        assert!((evaluate(&b.transposed()) - score).abs() < 1e-6);
    }
}
