//! Pending wall events, drained by whoever reports them.

use wall_events::WallEvent;

/// Events queued since the last drain
#[derive(Debug, Default)]
pub struct PendingEvents {
    events: Vec<WallEvent>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: WallEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<WallEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wall_events::WallTime;

    #[test]
    fn test_pending_events() {
        let mut pending = PendingEvents::new();
        assert!(pending.drain().is_empty());

        pending.push(WallEvent::PauseChanged {
            at: WallTime::start(),
            paused: true,
        });

        let drained = pending.drain();
        assert_eq!(drained.len(), 1);
        assert!(pending.drain().is_empty());
    }
}
