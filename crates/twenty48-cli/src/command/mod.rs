use clap::{Parser, Subcommand};

use self::{play::PlayArg, serve::ServeArg, suggest::SuggestArg};

mod play;
mod serve;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Edit and drive a board in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Serve a board over HTTP with a browser front-end
    Serve(#[clap(flatten)] ServeArg),
    /// Print the selector's decision for one board as JSON
    Suggest(#[clap(flatten)] SuggestArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Serve(arg) => serve::run(&arg)?,
        Mode::Suggest(arg) => suggest::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default() {
        let args = CommandArgs::try_parse_from(["twenty48"]).unwrap();
        assert!(args.mode.is_none());

        let args =
            CommandArgs::try_parse_from(["twenty48", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::Serve(_))));
    }
}
