//! Runs settlement calls on their own thread so a slow ledger never blocks the game loop.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, warn};

use super::{Settlement, SettlementCompletion, SettlementError, SettlementRequest};

/// How long dropping the worker waits for an in-flight ledger call before leaving the thread
/// behind.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub struct SettlementWorker {
    requests: Option<Sender<SettlementRequest>>,
    completions: Receiver<SettlementCompletion>,
    done: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl SettlementWorker {
    pub fn spawn<S>(mut settlement: S) -> Self
    where
        S: Settlement + Send + 'static,
    {
        let (request_tx, request_rx) = unbounded::<SettlementRequest>();
        let (completion_tx, completion_rx) = unbounded();
        let (done_tx, done_rx) = bounded(1);

        let handle = thread::spawn(move || {
            debug!("settlement worker started");
            for request in request_rx.iter() {
                let result = settlement.submit_result(&request.record);
                if let Err(error) = &result {
                    error!("settlement for {:?} failed: {}", request.ticket, error);
                }
                let completion = SettlementCompletion {
                    ticket: request.ticket,
                    result,
                };
                if completion_tx.send(completion).is_err() {
                    break;
                }
            }
            debug!("settlement worker stopped");
            let _ = done_tx.send(());
        });

        Self {
            requests: Some(request_tx),
            completions: completion_rx,
            done: done_rx,
            handle: Some(handle),
        }
    }

    pub fn submit(&self, request: SettlementRequest) -> Result<(), SettlementError> {
        let requests = self
            .requests
            .as_ref()
            .ok_or(SettlementError::WorkerUnavailable)?;
        requests
            .send(request)
            .map_err(|_| SettlementError::WorkerUnavailable)
    }

    /// Completions that have arrived so far, without blocking.
    pub fn completions(&self) -> impl Iterator<Item = SettlementCompletion> + '_ {
        self.completions.try_iter()
    }

    pub fn completion_receiver(&self) -> &Receiver<SettlementCompletion> {
        &self.completions
    }
}

impl Drop for SettlementWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker's loop once in-flight calls finish.
        self.requests.take();
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return,
        };
        match self.done.recv_timeout(SHUTDOWN_GRACE) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if handle.join().is_err() {
                    error!("settlement worker panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "ledger still busy after {:?}, leaving the settlement worker behind",
                    SHUTDOWN_GRACE
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EndReason, GameResult, Mode, Outcome, Ticket};
    use crate::settlement::{Receipt, SettlementRecord};
    use std::time::Instant;

    struct Rejecting;

    impl Settlement for Rejecting {
        fn submit_result(
            &mut self,
            _record: &SettlementRecord,
        ) -> Result<Receipt, SettlementError> {
            Err(SettlementError::Rejected {
                reason: "ledger closed".to_string(),
            })
        }
    }

    struct Accepting;

    /// Blocks every call until `release` is dropped.
    struct Stuck {
        release: Receiver<()>,
    }

    impl Settlement for Stuck {
        fn submit_result(
            &mut self,
            _record: &SettlementRecord,
        ) -> Result<Receipt, SettlementError> {
            let _ = self.release.recv();
            Err(SettlementError::Rejected {
                reason: "released".to_string(),
            })
        }
    }

    impl Settlement for Accepting {
        fn submit_result(
            &mut self,
            _record: &SettlementRecord,
        ) -> Result<Receipt, SettlementError> {
            Ok(Receipt::acknowledged())
        }
    }

    fn request(ticket: Ticket) -> SettlementRequest {
        SettlementRequest {
            ticket,
            record: SettlementRecord::new(
                Outcome::new(GameResult::Win, EndReason::Checkmate),
                Mode::Beginner,
            ),
        }
    }

    #[test]
    fn test_completion_carries_ticket_and_result() {
        let worker = SettlementWorker::spawn(Accepting);
        let ticket = Ticket::for_test(7);
        worker.submit(request(ticket)).unwrap();

        let completion = worker
            .completion_receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(completion.ticket, ticket);
        assert_eq!(completion.result.unwrap(), Receipt::acknowledged());
    }

    #[test]
    fn test_failure_is_reported_not_dropped() {
        let worker = SettlementWorker::spawn(Rejecting);
        worker.submit(request(Ticket::for_test(1))).unwrap();

        let completion = worker
            .completion_receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(matches!(
            completion.result,
            Err(SettlementError::Rejected { .. })
        ));
    }

    #[test]
    fn test_drop_does_not_wait_on_a_stuck_ledger() {
        let (release_tx, release_rx) = unbounded::<()>();
        let worker = SettlementWorker::spawn(Stuck {
            release: release_rx,
        });
        worker.submit(request(Ticket::for_test(1))).unwrap();

        let started = Instant::now();
        drop(worker);
        assert!(started.elapsed() < SHUTDOWN_GRACE + Duration::from_secs(2));
        drop(release_tx);
    }

    #[test]
    fn test_drop_joins_an_idle_worker() {
        let worker = SettlementWorker::spawn(Accepting);
        let started = Instant::now();
        drop(worker);
        assert!(started.elapsed() < SHUTDOWN_GRACE);
    }
}
