use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Instant;

/// Shared record of what the emitter sent and what the peer acknowledged.
/// Both loops hold an `Arc` to one tracker; every operation takes the lock
/// once, so concurrent callers never observe a partial update.
#[derive(Debug, Default)]
pub struct DeliveryTracker {
    state: Mutex<TrackerState>,
}

#[derive(Debug, Default)]
struct TrackerState {
    sent: HashMap<u32, Instant>,
    received: HashSet<u32>,
    first_received: Option<u32>,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl DeliveryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&self, sequence: u32, at: Instant) {
        let mut state = self.state.lock().unwrap();
        state.sent.insert(sequence, at);
    }

    /// Records an acknowledged sequence number. The first successful call
    /// also anchors `first_received`/`started_at`; later calls leave those
    /// two fields untouched.
    pub fn record_received(&self, sequence: u32, at: Instant) {
        let mut state = self.state.lock().unwrap();
        state.received.insert(sequence);
        if state.first_received.is_none() {
            state.first_received = Some(sequence);
            state.started_at = Some(at);
        }
    }

    /// Marks the end of the run. First caller wins.
    pub fn mark_stopped(&self, at: Instant) {
        let mut state = self.state.lock().unwrap();
        if state.stopped_at.is_none() {
            state.stopped_at = Some(at);
        }
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let state = self.state.lock().unwrap();
        TrackerSnapshot {
            sent: state.sent.clone(),
            received: state.received.clone(),
            first_received: state.first_received,
            started_at: state.started_at,
            stopped_at: state.stopped_at,
        }
    }
}

/// Consistent copy of the tracker, taken once after both loops have joined.
#[derive(Debug, Clone, Default)]
pub struct TrackerSnapshot {
    pub sent: HashMap<u32, Instant>,
    pub received: HashSet<u32>,
    pub first_received: Option<u32>,
    pub started_at: Option<Instant>,
    pub stopped_at: Option<Instant>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_recording_loses_nothing() {
        let tracker = Arc::new(DeliveryTracker::new());
        let threads = 8;
        let per_thread = 500u32;

        thread::scope(|scope| {
            for t in 0..threads {
                let tracker = Arc::clone(&tracker);
                scope.spawn(move || {
                    let base = t * per_thread;
                    for i in 0..per_thread {
                        tracker.record_sent(base + i, Instant::now());
                        tracker.record_received(base + i, Instant::now());
                    }
                });
            }
        });

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.sent.len(), (threads * per_thread) as usize);
        assert_eq!(snapshot.received.len(), (threads * per_thread) as usize);
    }

    #[test]
    fn test_first_received_is_immutable() {
        let tracker = DeliveryTracker::new();
        tracker.record_received(5, Instant::now());
        let anchor = tracker.snapshot();

        tracker.record_received(2, Instant::now());
        tracker.record_received(9, Instant::now());

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.first_received, Some(5));
        assert_eq!(snapshot.started_at, anchor.started_at);
        assert_eq!(snapshot.received.len(), 3);
    }

    #[test]
    fn test_mark_stopped_first_caller_wins() {
        let tracker = DeliveryTracker::new();
        let first = Instant::now();
        tracker.mark_stopped(first);
        tracker.mark_stopped(first + std::time::Duration::from_secs(5));
        assert_eq!(tracker.snapshot().stopped_at, Some(first));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = DeliveryTracker::new().snapshot();
        assert!(snapshot.sent.is_empty());
        assert!(snapshot.received.is_empty());
        assert_eq!(snapshot.first_received, None);
        assert_eq!(snapshot.started_at, None);
        assert_eq!(snapshot.stopped_at, None);
    }
}
