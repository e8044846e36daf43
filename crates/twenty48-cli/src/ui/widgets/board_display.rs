use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use twenty48_engine::Board;

use crate::ui::widgets::{TileDisplay, style};

const SPACING: u16 = 1;

/// The 4x4 grid, with an optional highlighted cursor cell.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    cursor: Option<(usize, usize)>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            cursor: None,
            block: None,
        }
    }

    pub fn cursor(self, cursor: Option<(usize, usize)>) -> Self {
        Self { cursor, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        let n = Board::SIZE as u16;
        n * TileDisplay::WIDTH + (n + 1) * SPACING + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        let n = Board::SIZE as u16;
        n * TileDisplay::HEIGHT + (n + 1) * SPACING + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        buf.set_style(area, style::FRAME);

        let rows = Layout::vertical([Constraint::Length(TileDisplay::HEIGHT); Board::SIZE])
            .spacing(SPACING)
            .horizontal_margin(SPACING)
            .vertical_margin(SPACING)
            .split(area);
        for (row, row_area) in rows.iter().enumerate() {
            let cols = Layout::horizontal([Constraint::Length(TileDisplay::WIDTH); Board::SIZE])
                .spacing(SPACING)
                .split(*row_area);
            for (col, cell_area) in cols.iter().enumerate() {
                let Some(rank) = self.board.get(row, col) else {
                    continue;
                };
                TileDisplay::new(rank)
                    .selected(self.cursor == Some((row, col)))
                    .render(*cell_area, buf);
            }
        }
    }
}
