use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks, renders and terminal events in order.
///
/// A render is issued whenever a tick or terminal event happened since the
/// last render. Without a tick interval only terminal events wake the loop.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // Draw the first frame immediately.
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if interval.is_some() && self.tick_interval.is_none() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}
