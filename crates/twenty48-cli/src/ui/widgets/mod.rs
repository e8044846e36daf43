use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, key_binding_display::*, session_display::*, session_stats_display::*,
    tile_display::*,
};

mod board_display;
mod key_binding_display;
mod session_display;
mod session_stats_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    #[expect(clippy::cast_possible_truncation)]
    const fn hex(rgb: u32) -> Color {
        Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const FRAME: Color = hex(0x00bb_ada0);
    pub const EMPTY: Color = hex(0x00cc_c0b3);
    pub const DARK_TEXT: Color = hex(0x0077_6e65);
    pub const LIGHT_TEXT: Color = hex(0x00f9_f6f2);
    pub const SUPER_TILE: Color = hex(0x003c_3a32);

    /// Tile backgrounds for values 2 through 2048.
    pub const TILES: [Color; 11] = [
        hex(0x00ee_e4da),
        hex(0x00ed_e0c8),
        hex(0x00f2_b179),
        hex(0x00f5_9563),
        hex(0x00f6_7c5f),
        hex(0x00f6_5e3b),
        hex(0x00ed_cf72),
        hex(0x00ed_cc61),
        hex(0x00ed_c850),
        hex(0x00ed_c53f),
        hex(0x00ed_c22e),
    ];

    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HELP: Style = Style::new().fg(color::GRAY);
    pub const FRAME: Style = Style::new().bg(color::FRAME);
    pub const EMPTY_TILE: Style = fg_bg(color::DARK_TEXT, color::EMPTY);
    pub const KEY: Style = Style::new().fg(color::CYAN);
    pub const MESSAGE: Style = Style::new().fg(color::YELLOW);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
