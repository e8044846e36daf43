use std::path::PathBuf;

use anyhow::{Context as _, bail};
use serde::Serialize;
use twenty48_engine::{BOARD_SIZE, Board, Direction, Rank, move_engine};
use twenty48_evaluator::expectimax::ExpectimaxSelector;

use crate::{
    logging,
    util::{self, Output},
};

/// How the numbers given to `--board` are read.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum BoardEncoding {
    /// Exponents: 0 is empty, 1 is a 2, 11 is a 2048.
    #[default]
    Ranks,
    /// Displayed tile values: 0, 2, 4, 8, ...
    Values,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// 16 comma-separated cells in row-major order
    #[clap(long)]
    board: String,
    /// Whether --board holds ranks or tile values
    #[clap(long, default_value = "ranks")]
    encoding: BoardEncoding,
    /// Path to an expectimax configuration file (JSON format)
    #[clap(long)]
    selector_config: Option<PathBuf>,
    /// Output file path (stdout if not specified)
    #[clap(long)]
    output: Option<PathBuf>,
    /// Tracing filter for stderr logs
    #[clap(long, default_value = "warn")]
    log: String,
}

#[derive(Debug, Serialize)]
struct OutcomeReport {
    direction: Direction,
    changed: bool,
    score_delta: u64,
    value: Option<f64>,
}

#[derive(Debug, Serialize)]
struct SuggestReport {
    board: [[u8; BOARD_SIZE]; BOARD_SIZE],
    values: [[u64; BOARD_SIZE]; BOARD_SIZE],
    direction: Option<Direction>,
    outcomes: Vec<OutcomeReport>,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let SuggestArg {
        board,
        encoding,
        selector_config,
        output,
        log,
    } = arg;

    logging::init_stderr(log)?;
    let board = parse_board(board, *encoding)?;
    let mut selector = util::build_selector(selector_config.as_deref())?;
    let report = suggest(&mut selector, &board);
    tracing::info!(
        direction = report.direction.map(Direction::as_str),
        "suggestion ready"
    );
    Output::save_json(&report, output.as_deref())
}

fn suggest(selector: &mut ExpectimaxSelector, board: &Board) -> SuggestReport {
    let direction = selector.best_move(board);
    let values = selector.branch_values(board);
    let outcomes = Direction::ALL
        .into_iter()
        .zip(values)
        .map(|(direction, value)| {
            let outcome = move_engine::apply(board, direction);
            OutcomeReport {
                direction,
                changed: outcome.changed,
                score_delta: outcome.score_delta,
                value,
            }
        })
        .collect();
    SuggestReport {
        board: board.to_ranks(),
        values: board.to_values(),
        direction,
        outcomes,
    }
}

fn parse_board(text: &str, encoding: BoardEncoding) -> anyhow::Result<Board> {
    let cells = text
        .split(',')
        .map(|cell| {
            let cell = cell.trim();
            cell.parse::<u64>()
                .with_context(|| format!("Invalid board cell: {cell:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if cells.len() != BOARD_SIZE * BOARD_SIZE {
        bail!(
            "Board must have {} cells, got {}",
            BOARD_SIZE * BOARD_SIZE,
            cells.len()
        );
    }

    let mut grid = [[0; BOARD_SIZE]; BOARD_SIZE];
    for (slot, cell) in grid.iter_mut().flatten().zip(cells) {
        *slot = cell;
    }
    let board = match encoding {
        BoardEncoding::Ranks => {
            let mut cells = [[Rank::EMPTY; BOARD_SIZE]; BOARD_SIZE];
            for (slot, &rank) in cells.iter_mut().flatten().zip(grid.iter().flatten()) {
                *slot = Rank::try_from_u32(u32::try_from(rank).unwrap_or(u32::MAX))?;
            }
            Board::new(cells)
        }
        BoardEncoding::Values => Board::from_values(grid)?,
    };
    Ok(board)
}

#[cfg(test)]
mod tests {
    use twenty48_evaluator::expectimax::ExpectimaxConfig;

    use super::*;

    #[test]
    fn test_parse_ranks() {
        let board = parse_board("1,1,0,0, 0,0,0,0, 0,0,0,0, 0,0,0,11", BoardEncoding::Ranks).unwrap();
        assert_eq!(board.to_ranks()[0], [1, 1, 0, 0]);
        assert_eq!(board.to_values()[3][3], 2048);
    }

    #[test]
    fn test_parse_values() {
        let board =
            parse_board("2,2,0,0,0,0,0,0,0,0,0,0,0,0,0,2048", BoardEncoding::Values).unwrap();
        assert_eq!(board.to_ranks()[0], [1, 1, 0, 0]);
        assert_eq!(board.to_ranks()[3][3], 11);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_board("1,2,3", BoardEncoding::Ranks).is_err());
        assert!(parse_board(&["x"; 16].join(","), BoardEncoding::Ranks).is_err());
        assert!(parse_board(&["40"; 16].join(","), BoardEncoding::Ranks).is_err());
        let err = parse_board(&["300"; 16].join(","), BoardEncoding::Ranks).unwrap_err();
        assert!(err.to_string().starts_with("rank 300 "), "{err}");
        assert!(parse_board(&["3"; 16].join(","), BoardEncoding::Values).is_err());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("ranks".parse::<BoardEncoding>().unwrap(), BoardEncoding::Ranks);
        assert_eq!("Values".parse::<BoardEncoding>().unwrap(), BoardEncoding::Values);
        assert!("hex".parse::<BoardEncoding>().is_err());
    }

    #[test]
    fn test_suggest_report() {
        let board = parse_board("1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0", BoardEncoding::Ranks).unwrap();
        let mut selector = ExpectimaxSelector::new(ExpectimaxConfig::default()).unwrap();
        let report = suggest(&mut selector, &board);

        let direction = report.direction.unwrap();
        assert_ne!(direction, Direction::Up);
        assert_eq!(report.outcomes.len(), 4);
        assert!(!report.outcomes[0].changed);
        assert_eq!(report.outcomes[0].value, None);
        assert_eq!(report.outcomes[2].score_delta, 4);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][3]["direction"], "right");
        assert_eq!(json["values"][0][0], 2);
    }
}
