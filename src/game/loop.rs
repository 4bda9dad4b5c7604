use std::io;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::engine::MoveEngine;
use crate::settlement::SettlementWorker;

use super::action::Action;
use super::controller::{MatchController, Phase};

/// Longest the loop waits for input before re-rendering the clocks.
const MAX_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendEvent {
    Action(Action),
    Quit,
}

/// Where the loop draws the match and gets user input from.
pub trait Frontend {
    fn render<E: MoveEngine>(&mut self, controller: &MatchController<E>) -> io::Result<()>;

    /// Waits up to `timeout` for the next event. `Ok(None)` means nothing happened.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<FrontendEvent>>;
}

/// Drives a [`MatchController`] in real time: renders, waits for input until the next
/// scheduled task, advances the controller by the wall-clock time that passed, and shuttles
/// settlement requests and completions to and from the worker thread.
pub struct GameLoop<E: MoveEngine, F: Frontend> {
    controller: MatchController<E>,
    frontend: F,
    worker: SettlementWorker,
}

impl<E: MoveEngine, F: Frontend> GameLoop<E, F> {
    pub fn new(controller: MatchController<E>, frontend: F, worker: SettlementWorker) -> Self {
        Self {
            controller,
            frontend,
            worker,
        }
    }

    pub fn controller(&self) -> &MatchController<E> {
        &self.controller
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut last_instant = Instant::now();
        loop {
            self.frontend.render(&self.controller)?;

            let timeout = self
                .controller
                .time_until_next_event()
                .map_or(MAX_POLL, |until| until.min(MAX_POLL));
            let event = self.frontend.next_event(timeout)?;

            let now = Instant::now();
            self.controller.advance(now.duration_since(last_instant));
            last_instant = now;

            match event {
                Some(FrontendEvent::Quit) => {
                    if self.controller.phase() != Phase::Idle {
                        warn!("quitting with a match in {:?}", self.controller.phase());
                    }
                    info!("quit requested");
                    return Ok(());
                }
                Some(FrontendEvent::Action(action)) => {
                    debug!("action: {:?}", action);
                    self.controller.handle(action);
                }
                None => {}
            }

            self.pump_settlement();
        }
    }

    fn pump_settlement(&mut self) {
        for request in self.controller.take_settlement_requests() {
            let ticket = request.ticket;
            if let Err(error) = self.worker.submit(request) {
                self.controller.settlement_finished(ticket, Err(error));
            }
        }
        let completions: Vec<_> = self.worker.completions().collect();
        for completion in completions {
            self.controller
                .settlement_finished(completion.ticket, completion.result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ShakmatyEngine;
    use crate::game::{EndReason, GameResult, SessionConfig};
    use crate::settlement::{Receipt, Settlement, SettlementError, SettlementRecord};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Clone, Default)]
    struct RecordingLedger {
        records: Arc<Mutex<Vec<SettlementRecord>>>,
    }

    impl Settlement for RecordingLedger {
        fn submit_result(
            &mut self,
            record: &SettlementRecord,
        ) -> Result<Receipt, SettlementError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(Receipt::acknowledged())
        }
    }

    /// Plays a fixed script, then quits once the controller is idle again.
    struct ScriptedFrontend {
        script: VecDeque<Action>,
        phases: Vec<Phase>,
        polls: u32,
    }

    impl Frontend for ScriptedFrontend {
        fn render<E: MoveEngine>(&mut self, controller: &MatchController<E>) -> io::Result<()> {
            if self.phases.last() != Some(&controller.phase()) {
                self.phases.push(controller.phase());
            }
            Ok(())
        }

        fn next_event(&mut self, timeout: Duration) -> io::Result<Option<FrontendEvent>> {
            self.polls += 1;
            if let Some(action) = self.script.pop_front() {
                return Ok(Some(FrontendEvent::Action(action)));
            }
            if self.phases.last() == Some(&Phase::Idle) || self.polls > 500 {
                return Ok(Some(FrontendEvent::Quit));
            }
            thread::sleep(timeout);
            Ok(None)
        }
    }

    #[test]
    fn test_resignation_is_recorded_through_worker() {
        let ledger = RecordingLedger::default();
        let config = SessionConfig {
            settlement_delay: Duration::from_millis(20),
            ..SessionConfig::default()
        };
        let controller = MatchController::new(ShakmatyEngine::seeded(3), config);
        let frontend = ScriptedFrontend {
            script: VecDeque::from(vec![Action::NewGame, Action::Resign]),
            phases: Vec::new(),
            polls: 0,
        };

        let mut game = GameLoop::new(
            controller,
            frontend,
            SettlementWorker::spawn(ledger.clone()),
        );
        game.run().unwrap();

        assert_eq!(game.controller().phase(), Phase::Idle);
        assert_eq!(
            game.frontend.phases,
            vec![Phase::Idle, Phase::InProgress, Phase::Finalizing, Phase::Idle]
        );
        let records = ledger.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            (records[0].result, records[0].reason),
            (GameResult::Loss, EndReason::Resignation)
        );
    }
}
