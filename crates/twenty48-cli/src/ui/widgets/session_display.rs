use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use twenty48_engine::Snapshot;

use crate::ui::widgets::{BoardDisplay, SessionStatsDisplay, color, style};

/// Board and statistics side by side, centered in the area.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a Snapshot,
    cursor: Option<(usize, usize)>,
    auto_play: bool,
    stuck: bool,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            cursor: None,
            auto_play: false,
            stuck: false,
        }
    }

    pub fn cursor(self, cursor: Option<(usize, usize)>) -> Self {
        Self { cursor, ..self }
    }

    pub fn auto_play(self, auto_play: bool) -> Self {
        Self { auto_play, ..self }
    }

    /// Shows a "NO MOVES" banner over the board.
    pub fn stuck(self, stuck: bool) -> Self {
        Self { stuck, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.stuck {
            color::RED
        } else if self.auto_play {
            color::CYAN
        } else {
            color::WHITE
        };

        let board = BoardDisplay::new(&self.snapshot.board)
            .cursor(self.cursor)
            .block(
                Block::bordered()
                    .title(Line::from("2048").centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats = SessionStatsDisplay::new(self.snapshot).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(Padding::horizontal(1))
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_column);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        let board_width = board.width();
        (&board).render(board_area, buf);
        stats.render(stats_area, buf);

        if self.stuck {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("NO MOVES", style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
