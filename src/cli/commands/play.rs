//! Play command - timed games against the built-in opponent.

use std::path::PathBuf;
use std::time::Duration;

use chess_match::engine::ShakmatyEngine;
use chess_match::game::{GameLoop, MatchController, Mode, SessionConfig};
use chess_match::settlement::{FileLedger, SettlementWorker};
use chess_match::tui::TuiApp;
use log::info;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(
        short,
        long,
        default_value = "beginner",
        help = "beginner (10+0), intermediate (5+0) or advanced (3+0)"
    )]
    pub mode: Mode,
    #[structopt(long = "ledger", default_value = "chess_ledger.jsonl", parse(from_os_str))]
    pub ledger: PathBuf,
    #[structopt(
        long = "think-ms",
        default_value = "1000",
        help = "Delay before each opponent move in milliseconds"
    )]
    pub think_ms: u64,
    #[structopt(
        long = "settlement-timeout-secs",
        default_value = "30",
        help = "How long to wait for the ledger before starting over anyway"
    )]
    pub settlement_timeout_secs: u64,
    #[structopt(long = "seed", help = "Seed for the opponent's move choice")]
    pub seed: Option<u64>,
}

impl PlayArgs {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            opponent_delay: Duration::from_millis(self.think_ms),
            settlement_timeout: Duration::from_secs(self.settlement_timeout_secs),
            ..SessionConfig::default()
        }
    }
}

impl Command for PlayArgs {
    fn execute(self) {
        let engine = match self.seed {
            Some(seed) => ShakmatyEngine::seeded(seed),
            None => ShakmatyEngine::new(),
        };
        let controller = MatchController::new(engine, self.session_config());

        let ledger = FileLedger::new(self.ledger);
        info!("recording results to {}", ledger.path().display());
        let worker = SettlementWorker::spawn(ledger);

        let frontend = match TuiApp::new() {
            Ok(frontend) => frontend,
            Err(e) => {
                eprintln!("Failed to initialize TUI: {}", e);
                std::process::exit(1);
            }
        };

        let mut game = GameLoop::new(controller, frontend, worker);
        if let Err(e) = game.run() {
            // drop the TUI first so the message lands on the restored terminal
            drop(game);
            eprintln!("Game loop failed: {}", e);
            std::process::exit(1);
        }
    }
}
