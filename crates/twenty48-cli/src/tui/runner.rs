use std::time::Duration;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

/// Runs an [`App`] inside the terminal.
#[derive(Default, Debug)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick interval; `None` stops ticking.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        self.events.tick_interval()
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// Ticks call [`App::update`], renders call [`App::draw`] and terminal
    /// events call [`App::handle_event`].
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
