use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use rand_pcg::Pcg32;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};
use twenty48_engine::{
    Board, Direction, MoveSelector, Session, SessionStats, SetCellError, move_engine,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay, style},
};

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←", "↓", "↑", "→"], "Move"),
    (&["h", "j", "k", "l"], "Cursor"),
    (&["+", "-"], "Step"),
    (&["0-9"], "Set"),
    (&["Space"], "AI"),
    (&["a"], "Auto"),
    (&["r"], "Random"),
    (&["c"], "Clear"),
    (&["q"], "Quit"),
];

pub struct PlayApp {
    session: Session,
    selector: Box<dyn MoveSelector>,
    rng: Pcg32,
    cursor: (usize, usize),
    spawn_tiles: bool,
    auto_play: bool,
    interval: Duration,
    message: Option<String>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(
        selector: Box<dyn MoveSelector>,
        rng: Pcg32,
        spawn_tiles: bool,
        interval: Duration,
    ) -> Self {
        Self {
            session: Session::new(),
            selector,
            rng,
            cursor: (0, 0),
            spawn_tiles,
            auto_play: false,
            interval,
            message: None,
            is_exiting: false,
        }
    }

    pub fn stats(&self) -> &SessionStats {
        self.session.stats()
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let (row, col) = self.cursor;
        let max = Board::SIZE - 1;
        self.cursor = (
            row.saturating_add_signed(d_row).min(max),
            col.saturating_add_signed(d_col).min(max),
        );
    }

    fn edit(&mut self, f: impl FnOnce(&mut Session, usize, usize) -> Result<(), SetCellError>) {
        let (row, col) = self.cursor;
        if let Err(err) = f(&mut self.session, row, col) {
            self.message = Some(err.to_string());
        }
    }

    fn spawn_after_move(&mut self) {
        if self.spawn_tiles {
            self.session.spawn_tile(&mut self.rng);
        }
    }

    fn apply_direction(&mut self, direction: Direction) {
        match self.session.apply_direction(direction) {
            Ok(_) => self.spawn_after_move(),
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Performs one selector move; returns whether the board changed.
    fn engine_step(&mut self) -> bool {
        match self.session.request_engine_move(self.selector.as_mut()) {
            Ok(applied) => {
                self.message = Some(format!(
                    "AI moved {} (+{})",
                    applied.direction, applied.score_delta
                ));
                self.spawn_after_move();
                true
            }
            Err(err) => {
                tracing::debug!(%err, "engine move rejected");
                self.message = Some(err.to_string());
                false
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        self.message = None;
        match code {
            KeyCode::Up => self.apply_direction(Direction::Up),
            KeyCode::Down => self.apply_direction(Direction::Down),
            KeyCode::Left => self.apply_direction(Direction::Left),
            KeyCode::Right => self.apply_direction(Direction::Right),
            KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char('+' | '=') => self.edit(Session::increase_cell),
            KeyCode::Char('-') => self.edit(Session::decrease_cell),
            KeyCode::Char('0') | KeyCode::Backspace | KeyCode::Delete => {
                self.edit(|session, row, col| session.set_cell(row, col, 0));
            }
            KeyCode::Char(c @ '1'..='9') => {
                let rank = c.to_digit(10).unwrap_or_default();
                self.edit(|session, row, col| session.set_cell(row, col, rank));
            }
            KeyCode::Char(' ') | KeyCode::Enter => _ = self.engine_step(),
            KeyCode::Char('a') => self.auto_play = !self.auto_play,
            KeyCode::Char('r') => self.session.randomize(&mut self.rng),
            KeyCode::Char('c') => self.session.clear(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn sync_tick_interval(&self, tui: &mut Tui) {
        tui.set_tick_interval(self.auto_play.then_some(self.interval));
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_tick_interval(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(event) = event.as_key_event() {
            self.handle_key(event.code);
            self.sync_tick_interval(tui);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let session_display = SessionDisplay::new(&snapshot)
            .cursor(Some(self.cursor))
            .auto_play(self.auto_play)
            .stuck(!snapshot.board.is_empty() && !move_engine::can_move(&snapshot.board));
        let status = match (&self.message, self.auto_play) {
            (Some(message), _) => Line::styled(message.as_str(), style::MESSAGE),
            (None, true) => Line::styled("Auto-play running", style::KEY),
            (None, false) => Line::styled("", style::HELP),
        }
        .centered();

        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(&session_display, main_area);
        frame.render_widget(status, status_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if self.auto_play && !self.engine_step() {
            self.auto_play = false;
            self.sync_tick_interval(tui);
        }
    }
}
