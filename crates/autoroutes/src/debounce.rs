// File: src/debounce.rs
// Purpose: Trailing-edge debounce buffer for filesystem events

use crate::change::{FsEvent, FsEventKind};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Coalesces rapid events into one burst
///
/// Every push restarts the window. One event per path is kept; a path
/// seen again moves to the end, so drained events are in order of their
/// latest arrival. A pending `add` or `unlink` is never downgraded by a
/// later `change` (editors create a file and then write to it). The clock is passed in, which keeps this type
/// free of timers and easy to drive from tests or an async loop.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending: IndexMap<PathBuf, FsEvent>,
    last_push: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: IndexMap::new(),
            last_push: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn push(&mut self, mut event: FsEvent, now: Instant) {
        if let Some(previous) = self.pending.shift_remove(&event.path) {
            if event.kind == FsEventKind::Change && previous.kind != FsEventKind::Change {
                event.kind = previous.kind;
            }
        }
        self.pending.insert(event.path.clone(), event);
        self.last_push = Some(now);
    }

    /// Instant at which the pending burst becomes ready, if any
    pub fn deadline(&self) -> Option<Instant> {
        if self.pending.is_empty() {
            return None;
        }
        self.last_push.map(|t| t + self.window)
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.deadline().map_or(false, |deadline| now >= deadline)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Takes the pending burst and resets the window
    pub fn drain(&mut self) -> Vec<FsEvent> {
        self.last_push = None;
        self.pending.drain(..).map(|(_, event)| event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_has_no_deadline() {
        let debouncer = Debouncer::default();
        assert_eq!(debouncer.deadline(), None);
        assert!(!debouncer.is_ready(Instant::now()));
    }

    #[test]
    fn test_each_push_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push(FsEvent::add("/p/a.tsx"), start);
        debouncer.push(FsEvent::add("/p/b.tsx"), start + Duration::from_millis(200));

        assert!(!debouncer.is_ready(start + Duration::from_millis(300)));
        assert!(debouncer.is_ready(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_last_event_per_path_wins() {
        let now = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(FsEvent::add("/p/a.tsx"), now);
        debouncer.push(FsEvent::add("/p/b.tsx"), now);
        debouncer.push(FsEvent::unlink("/p/a.tsx"), now);

        let events = debouncer.drain();
        assert_eq!(events, vec![FsEvent::add("/p/b.tsx"), FsEvent::unlink("/p/a.tsx")]);
        assert_eq!(events[1].kind, FsEventKind::Unlink);
    }

    #[test]
    fn test_change_does_not_downgrade_add() {
        let now = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(FsEvent::add("/p/contact.tsx"), now);
        debouncer.push(FsEvent::change("/p/contact.tsx"), now);
        debouncer.push(FsEvent::unlink("/p/old.tsx"), now);
        debouncer.push(FsEvent::change("/p/old.tsx"), now);

        assert_eq!(
            debouncer.drain(),
            vec![FsEvent::add("/p/contact.tsx"), FsEvent::unlink("/p/old.tsx")]
        );
    }

    #[test]
    fn test_unlink_then_add_keeps_add() {
        let now = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.push(FsEvent::unlink("/p/a.tsx"), now);
        debouncer.push(FsEvent::add("/p/a.tsx"), now);
        debouncer.push(FsEvent::change("/p/a.tsx"), now);

        assert_eq!(debouncer.drain(), vec![FsEvent::add("/p/a.tsx")]);
    }

    #[test]
    fn test_drain_resets() {
        let now = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push(FsEvent::change("/p/a.meta.json"), now);

        assert_eq!(debouncer.len(), 1);
        debouncer.drain();
        assert!(debouncer.is_empty());
        assert_eq!(debouncer.deadline(), None);
    }
}
