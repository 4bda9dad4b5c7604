use std::mem;
use std::time::Duration;

use log::{debug, info, warn};

use crate::engine::{BoardSnapshot, EngineError, EngineMove, MoveEngine, Square};
use crate::settlement::{Receipt, SettlementError, SettlementRequest};

use super::action::Action;
use super::clock::{ClockPair, Tick};
use super::config::SessionConfig;
use super::finalizer::{Completion, Finalizer, Overlay, Ticket};
use super::mode::Mode;
use super::notification::{Notification, NotificationId, NotificationQueue, Severity};
use super::outcome::Outcome;
use super::scheduler::{Scheduler, TimerId};
use super::side::Side;
use super::termination::{self, Trigger};
use super::turn::{Selection, TurnState};

pub const IDLE_STATUS: &str = "Select game mode and start a new game";
const THINKING_STATUS: &str = "AI is thinking...";
const ABANDON_PROMPT: &str =
    "Abandoning this game will count as a loss. Start a new game again to confirm.";
const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    InProgress,
    Finalizing,
}

/// Delayed work. Session-bound tasks carry the epoch that scheduled them and are dropped
/// when it no longer matches.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Task {
    ClockTick { side: Side, epoch: u64 },
    OpponentMove { epoch: u64 },
    SubmitResult { epoch: u64 },
    SettlementDeadline { ticket: Ticket },
    ExpireNotification { id: NotificationId },
}

/// Runs one match at a time against the built-in opponent, from idle through the move
/// exchange and clocks to handing the outcome to settlement and resetting.
///
/// Everything happens on the caller's thread. Time only moves through [`advance`], and
/// settlement requests leave through [`take_settlement_requests`] and come back through
/// [`settlement_finished`].
///
/// [`advance`]: MatchController::advance
/// [`take_settlement_requests`]: MatchController::take_settlement_requests
/// [`settlement_finished`]: MatchController::settlement_finished
pub struct MatchController<E: MoveEngine> {
    engine: E,
    config: SessionConfig,
    mode: Mode,
    phase: Phase,
    epoch: u64,
    turn: Side,
    turn_state: TurnState,
    selection: Option<Selection>,
    board: BoardSnapshot,
    clock: ClockPair,
    clock_timer: Option<TimerId>,
    opponent_timer: Option<TimerId>,
    deadline_timer: Option<TimerId>,
    opponent_failures: u32,
    /// Confirmation prompt shown by the first new-game request of a running match.
    abandon_prompt: Option<NotificationId>,
    scheduler: Scheduler<Task>,
    notifications: NotificationQueue,
    finalizer: Finalizer,
    outbox: Vec<SettlementRequest>,
    status: String,
    last_outcome: Option<Outcome>,
}

impl<E: MoveEngine> MatchController<E> {
    pub fn new(engine: E, config: SessionConfig) -> Self {
        let mode = config.mode;
        Self {
            engine,
            config,
            mode,
            phase: Phase::Idle,
            epoch: 0,
            turn: Side::Player,
            turn_state: TurnState::AwaitingPlayerSelection,
            selection: None,
            board: BoardSnapshot::default(),
            clock: ClockPair::new(mode),
            clock_timer: None,
            opponent_timer: None,
            deadline_timer: None,
            opponent_failures: 0,
            abandon_prompt: None,
            scheduler: Scheduler::new(),
            notifications: NotificationQueue::new(),
            finalizer: Finalizer::new(),
            outbox: Vec::new(),
            status: IDLE_STATUS.to_string(),
            last_outcome: None,
        }
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::ClickSquare(square) => self.click_square(square),
            Action::Resign => self.resign(),
            Action::OfferDraw => self.offer_draw(),
            Action::NewGame => self.new_game(),
            Action::SelectMode(mode) => self.select_mode(mode),
        }
    }

    pub fn new_game(&mut self) {
        match self.phase {
            Phase::Idle => self.start_session(),
            Phase::InProgress => {
                let confirmed = self
                    .abandon_prompt
                    .take()
                    .is_some_and(|id| self.notifications.current().map(|n| n.id) == Some(id));
                if confirmed {
                    info!("abandoning the match in progress");
                    self.try_end(Trigger::Resignation);
                } else {
                    let id = self.notify(ABANDON_PROMPT, Severity::Info);
                    self.abandon_prompt = Some(id);
                }
            }
            Phase::Finalizing => debug!("new game ignored while the last result is recorded"),
        }
    }

    pub fn select_mode(&mut self, mode: Mode) {
        if self.phase != Phase::Idle {
            debug!("mode change to {} ignored during a match", mode);
            return;
        }
        self.mode = mode;
        self.clock.reset(mode);
        info!("mode set to {}", mode);
    }

    pub fn click_square(&mut self, square: Square) {
        if self.phase != Phase::InProgress
            || self.turn != Side::Player
            || !self.turn_state.accepts_clicks()
        {
            debug!("click on {} ignored in {:?}", square, self.turn_state);
            return;
        }
        match self.turn_state {
            TurnState::AwaitingPlayerSelection => self.select(square),
            TurnState::AwaitingPlayerTarget => self.target(square),
            _ => {}
        }
    }

    pub fn resign(&mut self) {
        if self.phase != Phase::InProgress {
            debug!("resignation ignored without a match in progress");
            return;
        }
        self.try_end(Trigger::Resignation);
    }

    pub fn offer_draw(&mut self) {
        if self.phase != Phase::InProgress {
            debug!("draw offer ignored without a match in progress");
            return;
        }
        self.try_end(Trigger::DrawAccepted);
    }

    /// Moves virtual time forward by `elapsed`, running every task that falls due on the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        while let Some((id, task)) = self.scheduler.pop_due(target) {
            self.dispatch(id, task);
        }
        self.scheduler.set_now(target);
    }

    /// Settlement requests produced since the last call. Each must be answered with
    /// [`settlement_finished`](MatchController::settlement_finished).
    pub fn take_settlement_requests(&mut self) -> Vec<SettlementRequest> {
        mem::take(&mut self.outbox)
    }

    pub fn settlement_finished(
        &mut self,
        ticket: Ticket,
        result: Result<Receipt, SettlementError>,
    ) {
        let (message, severity) = match &result {
            Ok(Receipt {
                totals: Some(totals),
            }) => (
                format!("Game result recorded! ({})", totals),
                Severity::Success,
            ),
            Ok(_) => ("Game result recorded!".to_string(), Severity::Success),
            Err(error) => (
                format!("Failed to record game result: {}", error),
                Severity::Error,
            ),
        };

        match self.finalizer.settle(ticket) {
            Completion::Current => {
                self.cancel_timer(TimerSlot::Deadline);
                self.notify(message, severity);
                self.reset();
            }
            Completion::Stale => {
                debug!("settlement for {:?} arrived after its session was reset", ticket);
                self.notify(message, severity);
            }
        }
    }

    fn start_session(&mut self) {
        self.epoch += 1;
        self.board = self.engine.new_game();
        self.phase = Phase::InProgress;
        self.turn = Side::Player;
        self.turn_state = TurnState::AwaitingPlayerSelection;
        self.selection = None;
        self.opponent_failures = 0;
        self.abandon_prompt = None;
        self.last_outcome = None;
        self.clock.reset(self.mode);
        self.start_clock(Side::Player);

        let message = format!(
            "Game started! You're playing as {} against {} AI.",
            Side::Player.color(),
            self.mode
        );
        info!("session {} started in {} mode", self.epoch, self.mode);
        self.status = message.clone();
        self.notify(message, Severity::Success);
    }

    fn select(&mut self, square: Square) {
        if !self.board.is_occupied_by(square, Side::Player.color()) {
            return;
        }
        let destinations = self.engine.legal_moves(square);
        debug!("selected {} with {} destinations", square, destinations.len());
        self.selection = Some(Selection::new(square, destinations));
        self.turn_state = TurnState::AwaitingPlayerTarget;
    }

    fn target(&mut self, square: Square) {
        let from = self
            .selection
            .as_ref()
            .filter(|selection| selection.allows(square))
            .map(|selection| selection.square);
        let from = match from {
            Some(from) => from,
            None if self.board.is_occupied_by(square, Side::Player.color()) => {
                self.select(square);
                return;
            }
            None => {
                self.clear_selection();
                return;
            }
        };

        match self.engine.apply_move(from, square) {
            Ok(board) => {
                self.board = board;
                self.clear_selection();
                if !self.try_end(Trigger::HalfMove {
                    mover: Side::Player,
                }) {
                    self.begin_opponent_turn();
                }
            }
            Err(error) => {
                warn!("engine rejected {}{}: {}", from, square, error);
                self.notify("Invalid move! Try again.", Severity::Error);
            }
        }
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        if self.turn_state == TurnState::AwaitingPlayerTarget {
            self.turn_state = TurnState::AwaitingPlayerSelection;
        }
    }

    fn begin_opponent_turn(&mut self) {
        self.turn = Side::Opponent;
        self.turn_state = TurnState::OpponentThinking;
        self.selection = None;
        self.opponent_failures = 0;
        self.start_clock(Side::Opponent);
        self.status = THINKING_STATUS.to_string();
        self.schedule_opponent_move();
    }

    fn schedule_opponent_move(&mut self) {
        let id = self.scheduler.schedule(
            self.config.opponent_delay,
            Task::OpponentMove { epoch: self.epoch },
        );
        self.opponent_timer = Some(id);
    }

    fn play_opponent_move(&mut self) -> Result<EngineMove, EngineError> {
        let chosen = self.engine.choose_move(self.mode.difficulty())?;
        self.board = self.engine.apply_move(chosen.from, chosen.to)?;
        Ok(chosen)
    }

    fn on_opponent_move(&mut self, epoch: u64) {
        if epoch != self.epoch
            || self.phase != Phase::InProgress
            || self.turn_state != TurnState::OpponentThinking
        {
            debug!("dropping stale opponent move for session {}", epoch);
            return;
        }

        match self.play_opponent_move() {
            Ok(chosen) => {
                self.opponent_failures = 0;
                self.status = format!("AI moved {} to {}. Your turn!", chosen.from, chosen.to);
                if self.try_end(Trigger::HalfMove {
                    mover: Side::Opponent,
                }) {
                    return;
                }
                self.turn = Side::Player;
                self.turn_state = TurnState::AwaitingPlayerSelection;
                self.start_clock(Side::Player);
            }
            Err(error) => {
                self.opponent_failures += 1;
                warn!(
                    "opponent move failed (attempt {}): {}",
                    self.opponent_failures, error
                );
                if self.opponent_failures <= self.config.opponent_retry_limit {
                    self.notify("Error in AI move. Retrying...", Severity::Error);
                    self.schedule_opponent_move();
                } else {
                    let message = "Error in AI move. Resign or start a new game.";
                    self.status = message.to_string();
                    self.notify(message, Severity::Error);
                }
            }
        }
    }

    fn on_clock_tick(&mut self, side: Side, epoch: u64) {
        if epoch != self.epoch || self.phase != Phase::InProgress {
            return;
        }
        match self.clock.tick(side) {
            Tick::Running(_) => {
                let id = self.scheduler.schedule(TICK, Task::ClockTick { side, epoch });
                self.clock_timer = Some(id);
            }
            Tick::Expired => {
                info!("{} clock ran out", side);
                self.try_end(Trigger::Timeout { expired: side });
            }
            Tick::Ignored => debug!("tick for stopped {} clock", side),
        }
    }

    fn on_submit_result(&mut self, epoch: u64) {
        if epoch != self.epoch || self.phase != Phase::Finalizing {
            return;
        }
        if let Some(request) = self.finalizer.submit(self.mode) {
            info!(
                "submitting {} by {} as {:?}",
                request.record.result, request.record.reason, request.ticket
            );
            let id = self.scheduler.schedule(
                self.config.settlement_timeout,
                Task::SettlementDeadline {
                    ticket: request.ticket,
                },
            );
            self.deadline_timer = Some(id);
            self.outbox.push(request);
        }
    }

    fn on_settlement_deadline(&mut self, ticket: Ticket) {
        if self.finalizer.settle(ticket) == Completion::Current {
            warn!("no settlement answer for {:?}, resetting anyway", ticket);
            self.notify(
                "Ledger is not responding; the result will not be retried by the game.",
                Severity::Error,
            );
            self.reset();
        }
    }

    fn dispatch(&mut self, id: TimerId, task: Task) {
        for slot in [
            &mut self.clock_timer,
            &mut self.opponent_timer,
            &mut self.deadline_timer,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }

        match task {
            Task::ClockTick { side, epoch } => self.on_clock_tick(side, epoch),
            Task::OpponentMove { epoch } => self.on_opponent_move(epoch),
            Task::SubmitResult { epoch } => self.on_submit_result(epoch),
            Task::SettlementDeadline { ticket } => self.on_settlement_deadline(ticket),
            Task::ExpireNotification { id } => {
                self.notifications.expire(id);
            }
        }
    }

    /// Ends the match if `trigger` produces an outcome. Returns true if it did.
    fn try_end(&mut self, trigger: Trigger) -> bool {
        if self.phase != Phase::InProgress {
            debug!("{:?} discarded, no match in progress", trigger);
            return false;
        }
        let outcome = match termination::detect(trigger, &self.engine.terminal_state()) {
            Some(outcome) => outcome,
            None => return false,
        };
        if !self.finalizer.begin(outcome) {
            return false;
        }

        self.phase = Phase::Finalizing;
        self.turn_state = TurnState::Ended;
        self.abandon_prompt = None;
        self.selection = None;
        self.cancel_timer(TimerSlot::Opponent);
        self.stop_clock();
        self.last_outcome = Some(outcome);

        let (message, severity) = termination::announcement(trigger, &outcome);
        self.notify(message, severity);
        self.status = format!("Game over! {}", outcome.summary());
        info!("session {} over: {}", self.epoch, outcome);

        self.scheduler.schedule(
            self.config.settlement_delay,
            Task::SubmitResult { epoch: self.epoch },
        );
        true
    }

    fn reset(&mut self) {
        self.epoch += 1;
        self.cancel_timer(TimerSlot::Opponent);
        self.cancel_timer(TimerSlot::Deadline);
        self.stop_clock();
        self.clock.reset(self.mode);
        self.phase = Phase::Idle;
        self.turn = Side::Player;
        self.turn_state = TurnState::AwaitingPlayerSelection;
        self.selection = None;
        self.board = BoardSnapshot::default();
        self.opponent_failures = 0;
        self.abandon_prompt = None;
        self.finalizer.finish();
        self.status = IDLE_STATUS.to_string();
        debug!("reset to idle, next session {}", self.epoch + 1);
    }

    fn start_clock(&mut self, side: Side) {
        self.cancel_timer(TimerSlot::Clock);
        self.clock.start(side);
        let id = self.scheduler.schedule(
            TICK,
            Task::ClockTick {
                side,
                epoch: self.epoch,
            },
        );
        self.clock_timer = Some(id);
    }

    fn stop_clock(&mut self) {
        self.cancel_timer(TimerSlot::Clock);
        self.clock.stop();
    }

    fn cancel_timer(&mut self, slot: TimerSlot) {
        let timer = match slot {
            TimerSlot::Clock => self.clock_timer.take(),
            TimerSlot::Opponent => self.opponent_timer.take(),
            TimerSlot::Deadline => self.deadline_timer.take(),
        };
        if let Some(id) = timer {
            self.scheduler.cancel(id);
        }
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let expires_at = self.scheduler.now() + self.config.notification_ttl;
        let id = self.notifications.post(message, severity, expires_at);
        self.scheduler
            .schedule(self.config.notification_ttl, Task::ExpireNotification { id });
        id
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::InProgress
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn_state
    }

    pub fn board(&self) -> &BoardSnapshot {
        &self.board
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn clock(&self) -> &ClockPair {
        &self.clock
    }

    /// `mm:ss` for `side`'s clock.
    pub fn clock_display(&self, side: Side) -> String {
        self.clock.display(side)
    }

    pub fn running_clock(&self) -> Option<Side> {
        self.clock.running()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.finalizer.overlay()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// How long until the next scheduled task is due, if any is pending.
    pub fn time_until_next_event(&self) -> Option<Duration> {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.scheduler.now()))
    }
}

#[derive(Clone, Copy)]
enum TimerSlot {
    Clock,
    Opponent,
    Deadline,
}
