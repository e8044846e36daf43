use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event; configure the tick interval here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, ...).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Called on every tick while a tick interval is set.
    fn update(&mut self, tui: &mut Tui);
}
