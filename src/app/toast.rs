//! Toast queue: notifications shown one at a time, in arrival order.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Pending messages beyond this are dropped, oldest first.
const MAX_PENDING: usize = 8;

#[derive(Debug)]
pub struct ToastQueue {
    duration: Duration,
    current: Option<(String, Instant)>,
    pending: VecDeque<String>,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, message: String, now: Instant) {
        if self.current.is_none() {
            self.current = Some((message, now));
            return;
        }
        if self.pending.len() == MAX_PENDING {
            self.pending.pop_front();
        }
        self.pending.push_back(message);
    }

    /// Retire the visible toast once it has been up for the full duration
    /// and start the next one.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|(_, shown_at)| now.duration_since(*shown_at) >= self.duration);
        if expired {
            self.current = self.pending.pop_front().map(|m| (m, now));
        }
    }

    /// The message on screen right now.
    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(2000);

    #[test]
    fn shows_immediately_then_expires() {
        let t0 = Instant::now();
        let mut q = ToastQueue::new(SHORT);
        q.push("Item0 clicked".into(), t0);
        assert_eq!(q.current(), Some("Item0 clicked"));

        q.tick(t0 + Duration::from_millis(1999));
        assert_eq!(q.current(), Some("Item0 clicked"));

        q.tick(t0 + SHORT);
        assert_eq!(q.current(), None);
    }

    #[test]
    fn queued_toasts_follow_in_order() {
        let t0 = Instant::now();
        let mut q = ToastQueue::new(SHORT);
        q.push("a".into(), t0);
        q.push("b".into(), t0);
        q.push("c".into(), t0);
        assert_eq!(q.pending_len(), 2);

        q.tick(t0 + SHORT);
        assert_eq!(q.current(), Some("b"));
        // "b" gets its own full duration from when it appeared.
        q.tick(t0 + SHORT + Duration::from_millis(10));
        assert_eq!(q.current(), Some("b"));
        q.tick(t0 + SHORT * 2);
        assert_eq!(q.current(), Some("c"));
    }

    #[test]
    fn overflow_drops_oldest_pending() {
        let t0 = Instant::now();
        let mut q = ToastQueue::new(SHORT);
        q.push("shown".into(), t0);
        for i in 0..MAX_PENDING + 3 {
            q.push(format!("m{i}"), t0);
        }
        assert_eq!(q.pending_len(), MAX_PENDING);
        q.tick(t0 + SHORT);
        assert_eq!(q.current(), Some("m3"));
    }
}
