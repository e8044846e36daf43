//! Tracing subscriber setup.
//!
//! `serve` and `suggest` log to stderr. `play` owns the terminal, so it logs
//! only into a file when asked to.

use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter: {directives}"))
}

pub fn init_stderr(directives: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(filter(directives)?)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("Failed to install the tracing subscriber")
}

pub fn init_file(directives: &str, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    tracing_subscriber::registry()
        .with(filter(directives)?)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("Failed to install the tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_reported() {
        let err = filter("twenty48=loud").unwrap_err();
        assert!(err.to_string().contains("Invalid log filter"));
        assert!(filter("info,twenty48_engine=debug").is_ok());
    }
}
