//! Deferred timers and frame-loop registration
//!
//! The host only hands us timestamps (animation frames). Timers are stored
//! here and fire from inside the frame callback once their deadline has
//! passed, so a deadline is a lower bound, never an exact firing time.

/// Cancellation token for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<K> {
    id: TimerId,
    deadline: f64,
    kind: K,
}

/// Fire-once timers keyed by what they trigger
#[derive(Debug, Clone)]
pub struct Timers<K> {
    next_id: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Timers<K> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Schedule `kind` to fire no earlier than `now + delay_ms`
    pub fn schedule(&mut self, now: f64, delay_ms: f64, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: now + delay_ms.max(0.0),
            kind,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return every timer due at `now`, earliest deadline first
    pub fn take_due(&mut self, now: f64) -> Vec<K> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].deadline <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| {
            a.deadline
                .partial_cmp(&b.deadline)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.0.cmp(&b.id.0))
        });
        due.into_iter().map(|p| p.kind).collect()
    }
}

/// Registration state of the per-frame callback.
///
/// The platform asks `is_requested()` after each frame to decide whether to
/// request another one; `cancel()` makes the next callback a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLoop {
    requested: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) {
        self.requested = true;
    }

    pub fn cancel(&mut self) {
        self.requested = false;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_after_deadline() {
        let mut timers = Timers::new();
        timers.schedule(100.0, 1000.0, "reset");

        assert!(timers.take_due(1099.0).is_empty());
        assert_eq!(timers.take_due(1100.0), vec!["reset"]);
        assert!(timers.take_due(5000.0).is_empty(), "Timers are fire-once");
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let id = timers.schedule(0.0, 10.0, 1);
        let kept = timers.schedule(0.0, 20.0, 2);
        assert!(timers.cancel(id));
        assert_eq!(timers.len(), 1);
        assert!(!timers.cancel(id));
        assert_eq!(timers.take_due(100.0), vec![2]);
        assert!(!timers.cancel(kept), "Fired timers cannot be cancelled");
    }

    #[test]
    fn test_due_order() {
        let mut timers = Timers::new();
        timers.schedule(0.0, 30.0, 'c');
        timers.schedule(0.0, 10.0, 'a');
        timers.schedule(0.0, 20.0, 'b');
        timers.schedule(0.0, 99.0, 'z');
        assert_eq!(timers.take_due(50.0), vec!['a', 'b', 'c']);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::new();
        timers.schedule(0.0, 10.0, ());
        timers.schedule(0.0, 20.0, ());
        timers.cancel_all();
        assert!(timers.is_empty());
    }

    #[test]
    fn test_frame_loop_request_cancel() {
        let mut frames = FrameLoop::new();
        assert!(!frames.is_requested());
        frames.request();
        frames.request();
        assert!(frames.is_requested());
        frames.cancel();
        assert!(!frames.is_requested());
        frames.request();
        assert!(frames.is_requested());
    }
}
