//! Minimal terminal application runtime on top of ratatui and crossterm.

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
