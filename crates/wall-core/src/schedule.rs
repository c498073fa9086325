//! Cooperative delayed tasks.
//!
//! A `DelayedTask` is a single pending deadline on the update loop. Starting
//! it again replaces the old deadline instead of queuing a second one.

use wall_events::WallTime;

/// A cancellable one-shot deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DelayedTask {
    due: Option<WallTime>,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the wait. Returns the new deadline.
    pub fn start(&mut self, now: WallTime, delay: f64) -> WallTime {
        let due = now + delay.max(0.0);
        self.due = Some(due);
        due
    }

    /// Cancels the pending wait. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: WallTime) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let mut task = DelayedTask::new();
        task.start(WallTime::start(), 0.5);

        assert!(!task.poll(WallTime::from_seconds(0.25)));
        assert!(task.poll(WallTime::from_seconds(0.5)));
        assert!(!task.poll(WallTime::from_seconds(0.75)));
        assert!(!task.is_pending());
    }

    #[test]
    fn test_restart_replaces_deadline() {
        let mut task = DelayedTask::new();
        task.start(WallTime::start(), 0.5);
        let due = task.start(WallTime::from_seconds(0.25), 0.5);

        assert_eq!(due, WallTime::from_seconds(0.75));
        assert!(!task.poll(WallTime::from_seconds(0.5)));
        assert!(task.poll(WallTime::from_seconds(0.75)));
    }

    #[test]
    fn test_cancel() {
        let mut task = DelayedTask::new();
        assert!(!task.cancel());
        task.start(WallTime::start(), 0.1);
        assert!(task.cancel());
        assert!(!task.poll(WallTime::from_seconds(1.0)));
    }

    #[test]
    fn test_zero_delay_fires_immediately() {
        let mut task = DelayedTask::new();
        let now = WallTime::from_seconds(2.0);
        task.start(now, 0.0);
        assert!(task.poll(now));
    }
}
