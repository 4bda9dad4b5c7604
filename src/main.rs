mod cli;

use cli::commands::Command;
use cli::ChessMatch;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    ChessMatch::from_args().execute();
}
