use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use twenty48_engine::Snapshot;

use crate::ui::widgets::style;

pub struct SessionStatsDisplay<'a> {
    snapshot: &'a Snapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        22 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&Snapshot) -> String),
    LabelValue(&'static str, &'static dyn Fn(&Snapshot) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|snapshot| snapshot.score.to_string()),
    Row::Empty,
    Row::FullLabel("MODE:"),
    Row::FullValue(&|snapshot| snapshot.mode.to_string()),
    Row::FullLabel("LAST:"),
    Row::FullValue(&|snapshot| snapshot.last_action.to_string()),
    Row::Empty,
    Row::LabelValue("MOVES:", &|snapshot| snapshot.stats.moves().to_string()),
    Row::LabelValue("MERGES:", &|snapshot| snapshot.stats.merges().to_string()),
    Row::LabelValue("TILES:", &|snapshot| snapshot.board.tile_count().to_string()),
    Row::LabelValue("MAX TILE:", &|snapshot| {
        let max = snapshot.board.max_rank();
        if max.is_empty() {
            "-".to_owned()
        } else {
            max.value().to_string()
        }
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.snapshot), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
