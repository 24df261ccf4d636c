// Deferred action queue driven by an explicit clock value.
// The app feeds it `Time::elapsed()`; tests feed it hand-picked durations.
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

struct Scheduled<A> {
    due: Duration,
    seq: u64,
    action: A,
}

impl<A> PartialEq for Scheduled<A> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<A> Eq for Scheduled<A> {}

impl<A> PartialOrd for Scheduled<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Scheduled<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap of actions keyed by (deadline, scheduling order).
/// Actions with equal deadlines come out in the order they were scheduled.
pub struct DeferredQueue<A> {
    heap: BinaryHeap<Reverse<Scheduled<A>>>,
    next_seq: u64,
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<A> DeferredQueue<A> {
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled {
            due: now + delay,
            seq,
            action,
        }));
    }

    /// Remove and return every action whose deadline is at or before `now`
    pub fn drain_due(&mut self, now: Duration) -> Vec<A> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|Reverse(next)| next.due <= now) {
            if let Some(Reverse(next)) = self.heap.pop() {
                due.push(next.action);
            }
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(next)| next.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_nothing_due_before_deadline() {
        let mut queue = DeferredQueue::default();
        queue.schedule(ms(0), ms(50), "arm");
        assert!(queue.drain_due(ms(49)).is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_due(ms(50)), vec!["arm"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drains_in_deadline_order() {
        let mut queue = DeferredQueue::default();
        queue.schedule(ms(0), ms(1000), "expire");
        queue.schedule(ms(0), ms(50), "arm");
        queue.schedule(ms(10), ms(50), "arm2");
        assert_eq!(queue.next_deadline(), Some(ms(50)));
        assert_eq!(queue.drain_due(ms(2000)), vec!["arm", "arm2", "expire"]);
    }

    #[test]
    fn test_equal_deadlines_keep_schedule_order() {
        let mut queue = DeferredQueue::default();
        queue.schedule(ms(0), ms(100), 1);
        queue.schedule(ms(50), ms(50), 2);
        queue.schedule(ms(100), ms(0), 3);
        assert_eq!(queue.drain_due(ms(100)), vec![1, 2, 3]);
    }

    #[test]
    fn test_each_action_runs_once() {
        let mut queue = DeferredQueue::default();
        queue.schedule(ms(0), ms(5), ());
        assert_eq!(queue.drain_due(ms(10)).len(), 1);
        assert!(queue.drain_due(ms(20)).is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
