use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Widget,
};
use twenty48_engine::Rank;

use crate::ui::widgets::{color, style};

/// One board cell: a coloured box with the tile value centered in it.
#[derive(Debug)]
pub struct TileDisplay {
    rank: Rank,
    selected: bool,
}

impl TileDisplay {
    pub const WIDTH: u16 = 10;
    pub const HEIGHT: u16 = 3;

    pub fn new(rank: Rank) -> Self {
        Self {
            rank,
            selected: false,
        }
    }

    pub fn selected(self, selected: bool) -> Self {
        Self { selected, ..self }
    }

    /// Background and text colours of the classic 2048 palette.
    pub fn style(rank: Rank) -> Style {
        if rank.is_empty() {
            return style::EMPTY_TILE;
        }
        let index = usize::from(rank.get() - 1);
        let bg = color::TILES.get(index).copied().unwrap_or(color::SUPER_TILE);
        let fg = if rank.get() <= 2 {
            color::DARK_TEXT
        } else {
            color::LIGHT_TEXT
        };
        Style::new().fg(fg).bg(bg)
    }

    pub fn label(rank: Rank) -> String {
        if rank.is_empty() {
            String::new()
        } else {
            rank.value().to_string()
        }
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut style = Self::style(self.rank);
        if self.selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        buf.set_style(area, style);

        let mut text_style = style.add_modifier(Modifier::BOLD);
        if self.selected {
            text_style = text_style.add_modifier(Modifier::UNDERLINED);
        }
        let [_, text_area, _] = area.layout(&Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ]));
        Line::styled(Self::label(self.rank), text_style)
            .centered()
            .render(text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        let r = |v| Rank::new(v).unwrap();
        assert_eq!(TileDisplay::style(Rank::EMPTY), style::EMPTY_TILE);
        assert_eq!(TileDisplay::style(r(1)).bg, Some(color::TILES[0]));
        assert_eq!(TileDisplay::style(r(11)).bg, Some(color::TILES[10]));
        assert_eq!(TileDisplay::style(r(12)).bg, Some(color::SUPER_TILE));
        assert_eq!(TileDisplay::style(r(2)).fg, Some(color::DARK_TEXT));
        assert_eq!(TileDisplay::style(r(3)).fg, Some(color::LIGHT_TEXT));
    }

    #[test]
    fn test_renders_value() {
        let area = Rect::new(0, 0, TileDisplay::WIDTH, TileDisplay::HEIGHT);
        let mut buf = Buffer::empty(area);
        TileDisplay::new(Rank::new(11).unwrap()).render(area, &mut buf);
        let middle = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect::<String>();
        assert_eq!(middle.trim(), "2048");
    }

    #[test]
    fn test_selected_tile_keeps_full_width() {
        let area = Rect::new(0, 0, TileDisplay::WIDTH, TileDisplay::HEIGHT);
        let mut buf = Buffer::empty(area);
        let rank = Rank::new(27).unwrap();
        TileDisplay::new(rank).selected(true).render(area, &mut buf);

        let middle = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect::<String>();
        assert_eq!(middle.trim(), "134217728");
        assert!(buf[(0, 0)].modifier.contains(Modifier::REVERSED));
    }
}
