//! Deterministic timer queue.
//!
//! Time only moves when the owner says so, either by popping due tasks up to a target instant
//! or by setting the clock directly. Tasks due at the same instant fire in scheduling order.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimerId(u64);

pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), T>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.queue.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes the earliest task due at or before `until` and moves the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let (deadline, id) = *self.queue.keys().next()?;
        if deadline > until {
            return None;
        }
        let task = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, task))
    }

    /// Moves the clock forward to `instant`. Never moves it backwards.
    pub fn set_now(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_tasks_pop_in_deadline_then_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), "late");
        scheduler.schedule(ms(100), "first");
        scheduler.schedule(ms(100), "second");

        let mut fired = Vec::new();
        while let Some((_, task)) = scheduler.pop_due(ms(1000)) {
            fired.push((task, scheduler.now()));
        }
        assert_eq!(
            fired,
            vec![("first", ms(100)), ("second", ms(100)), ("late", ms(300))]
        );
    }

    #[test]
    fn test_pop_due_respects_target() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), ());
        assert!(scheduler.pop_due(ms(499)).is_none());
        scheduler.set_now(ms(499));
        assert_eq!(scheduler.next_deadline(), Some(ms(500)));
        assert!(scheduler.pop_due(ms(500)).is_some());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(ms(10), "keep");
        let dropped = scheduler.schedule(ms(5), "dropped");
        assert!(scheduler.cancel(dropped));
        assert!(!scheduler.cancel(dropped));
        assert!(scheduler.is_pending(keep));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pop_due(ms(10)).map(|(_, task)| task), Some("keep"));
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(ms(1000));
        scheduler.schedule(ms(250), ());
        assert_eq!(scheduler.next_deadline(), Some(ms(1250)));
        scheduler.set_now(ms(10));
        assert_eq!(scheduler.now(), ms(1000));
    }
}
