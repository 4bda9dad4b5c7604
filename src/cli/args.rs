//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::play::PlayArgs;

#[derive(StructOpt)]
#[structopt(
    name = "chess-match",
    about = "Timed chess matches against a built-in opponent, with results recorded to a ledger ♛"
)]
pub enum ChessMatch {
    #[structopt(
        name = "play",
        about = "Play timed games as white against the built-in opponent. The starting `--mode` (default: beginner) picks the time control and opponent strength and can be changed between games. Finished games are appended to the `--ledger` file (default: chess_ledger.jsonl)."
    )]
    Play(PlayArgs),
}

impl crate::cli::commands::Command for ChessMatch {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
        }
    }
}
