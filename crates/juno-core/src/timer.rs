//! Deferred work owned by a single controller.
//!
//! A [`Timers`] queue holds two kinds of entries: deadline timers that fire
//! once the controller's clock reaches a timestamp, and frame deferrals that
//! fire after a number of [`Timers::poll`] calls. Each controller owns its
//! own queue, so clearing it on unmount drops every stale callback.

use std::time::Duration;

/// Handle to a scheduled entry, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
enum Wake {
    At(Duration),
    Frames(u32),
}

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    wake: Wake,
    event: E,
}

impl<E> Entry<E> {
    fn is_due(&self, now: Duration) -> bool {
        match self.wake {
            Wake::At(at) => at <= now,
            Wake::Frames(left) => left == 0,
        }
    }

    /// Frame deferrals run before deadlines; deadlines run in time order.
    fn rank(&self) -> (u8, Duration, u64) {
        match self.wake {
            Wake::Frames(_) => (0, Duration::ZERO, self.id.0),
            Wake::At(at) => (1, at, self.id.0),
        }
    }
}

/// A queue of pending events keyed by deadline or frame count.
#[derive(Debug, Clone)]
pub struct Timers<E> {
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timers<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, wake: Wake, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, wake, event });
        id
    }

    /// Fire `event` once the clock reaches `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TimerId {
        self.push(Wake::At(now + delay), event)
    }

    /// Fire `event` on the `frames`-th poll after this call (at least one).
    pub fn defer_frames(&mut self, frames: u32, event: E) -> TimerId {
        self.push(Wake::Frames(frames.max(1)), event)
    }

    /// Cancel a pending entry. Returns `false` if it already fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance one frame and take every entry that is due at `now`.
    ///
    /// Entries scheduled by the caller while handling the returned events
    /// are not counted against this frame.
    pub fn poll(&mut self, now: Duration) -> Vec<E> {
        for entry in &mut self.entries {
            if let Wake::Frames(left) = &mut entry.wake {
                *left = left.saturating_sub(1);
            }
        }

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.is_due(now));
        self.entries = pending;

        due.sort_by_key(Entry::rank);
        due.into_iter().map(|e| e.event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn deadline_fires_once_reached() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(100), "a");
        assert!(timers.poll(ms(99)).is_empty());
        assert_eq!(timers.poll(ms(100)), vec!["a"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn deadlines_fire_in_time_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(300), "late");
        timers.schedule(ms(0), ms(100), "early");
        timers.schedule(ms(0), ms(100), "early-second");
        assert_eq!(timers.poll(ms(500)), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn frame_deferral_counts_polls() {
        let mut timers = Timers::new();
        timers.defer_frames(2, "reveal");
        assert!(timers.poll(ms(0)).is_empty());
        assert_eq!(timers.poll(ms(0)), vec!["reveal"]);
    }

    #[test]
    fn zero_frames_still_waits_one_poll() {
        let mut timers = Timers::new();
        timers.defer_frames(0, "next");
        assert_eq!(timers.poll(ms(0)), vec!["next"]);
    }

    #[test]
    fn frame_deferrals_run_before_deadlines() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(10), "deadline");
        timers.defer_frames(1, "frame");
        assert_eq!(timers.poll(ms(10)), vec!["frame", "deadline"]);
    }

    #[test]
    fn cancel_removes_entry() {
        let mut timers = Timers::new();
        let id = timers.schedule(ms(0), ms(10), "gone");
        timers.schedule(ms(0), ms(10), "kept");
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.poll(ms(10)), vec!["kept"]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(10), 1);
        timers.defer_frames(1, 2);
        timers.clear();
        assert!(timers.poll(ms(1000)).is_empty());
    }
}
