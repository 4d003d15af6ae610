//! The timed sequence that runs once a refresh starts.
//!
//! Start shows the loader. After the hide delay the loader hides, the
//! reroll trigger is raised, the loader is reset a little later, and the
//! trigger is released once the reroll animation has settled.

use std::time::Duration;

use tracing::info;

use crate::config::MotionConfig;
use crate::timer::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleStep {
    Hide,
    ResetLoader,
    ReleaseReroll,
}

/// Something the owner of a cycle must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// The loader hid; a pinned pull should collapse.
    Finished,
    /// Displayed values should start rerolling.
    RerollRaised,
    /// The loader should pick a new variant and the indicator rest.
    LoaderReset,
    /// The reroll trigger dropped; the next refresh is a fresh edge.
    RerollLowered,
}

/// One refresh cycle at a time.
#[derive(Debug, Clone)]
pub struct RefreshCycle {
    hide_after: Duration,
    loader_reset: Duration,
    reroll_settle: Duration,
    loader_visible: bool,
    reroll_active: bool,
    timers: Timers<CycleStep>,
    /// Follow-up timers of the last hide, superseded by the next one.
    followups: Vec<TimerId>,
    completed: u64,
}

impl RefreshCycle {
    /// Create an idle cycle.
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            hide_after: config.hide_after(),
            loader_reset: config.loader_reset(),
            reroll_settle: config.reroll_settle(),
            loader_visible: false,
            reroll_active: false,
            timers: Timers::new(),
            followups: Vec::new(),
            completed: 0,
        }
    }

    /// Whether the loader is showing.
    pub fn loader_visible(&self) -> bool {
        self.loader_visible
    }

    /// Whether the reroll trigger is raised.
    pub fn reroll_active(&self) -> bool {
        self.reroll_active
    }

    /// Number of cycles whose loader has hidden.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Whether any step is still pending.
    pub fn is_busy(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Show the loader and start the hide countdown.
    ///
    /// Returns `false` if the loader is already showing.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.loader_visible {
            return false;
        }
        self.loader_visible = true;
        self.timers.schedule(now, self.hide_after, CycleStep::Hide);
        info!(hide_after = ?self.hide_after, "refresh started");
        true
    }

    /// Process one frame.
    pub fn update(&mut self, now: Duration) -> Vec<CycleEvent> {
        let mut events = Vec::new();
        for step in self.timers.poll(now) {
            match step {
                CycleStep::Hide => {
                    for id in self.followups.drain(..) {
                        self.timers.cancel(id);
                    }
                    self.loader_visible = false;
                    let was_active = self.reroll_active;
                    self.reroll_active = true;
                    self.completed += 1;
                    let reset = self
                        .timers
                        .schedule(now, self.loader_reset, CycleStep::ResetLoader);
                    let release =
                        self.timers
                            .schedule(now, self.reroll_settle, CycleStep::ReleaseReroll);
                    self.followups = vec![reset, release];
                    info!(cycle = self.completed, "refresh finished");
                    events.push(CycleEvent::Finished);
                    if was_active {
                        // drop first so the raise is a fresh edge
                        events.push(CycleEvent::RerollLowered);
                    }
                    events.push(CycleEvent::RerollRaised);
                }
                CycleStep::ResetLoader => events.push(CycleEvent::LoaderReset),
                CycleStep::ReleaseReroll => {
                    self.reroll_active = false;
                    events.push(CycleEvent::RerollLowered);
                }
            }
        }
        events
    }

    /// Drop every pending step.
    pub fn cancel(&mut self) {
        self.timers.clear();
        self.followups.clear();
        self.loader_visible = false;
        self.reroll_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn full_cycle_event_order() {
        let mut cycle = RefreshCycle::new(&MotionConfig::default());
        assert!(cycle.start(ms(0)));
        assert!(cycle.loader_visible());
        assert!(cycle.update(ms(3_999)).is_empty());

        assert_eq!(
            cycle.update(ms(4_000)),
            vec![CycleEvent::Finished, CycleEvent::RerollRaised]
        );
        assert!(!cycle.loader_visible());
        assert!(cycle.reroll_active());

        assert!(cycle.update(ms(4_299)).is_empty());
        assert_eq!(cycle.update(ms(4_300)), vec![CycleEvent::LoaderReset]);
        assert_eq!(cycle.update(ms(5_075)), vec![CycleEvent::RerollLowered]);
        assert!(!cycle.reroll_active());
        assert!(!cycle.is_busy());
        assert_eq!(cycle.completed(), 1);
    }

    #[test]
    fn start_ignored_while_visible() {
        let mut cycle = RefreshCycle::new(&MotionConfig::default());
        assert!(cycle.start(ms(0)));
        assert!(!cycle.start(ms(1_000)));
        cycle.update(ms(4_000));
        assert!(cycle.start(ms(4_100)));
    }

    #[test]
    fn late_frame_delivers_all_steps_in_order() {
        let mut cycle = RefreshCycle::new(&MotionConfig::default());
        cycle.start(ms(0));
        assert_eq!(cycle.update(ms(4_000)).len(), 2);
        assert_eq!(
            cycle.update(ms(9_000)),
            vec![CycleEvent::LoaderReset, CycleEvent::RerollLowered]
        );
    }

    #[test]
    fn next_hide_supersedes_followups() {
        let config = MotionConfig::default()
            .with_hide_after_ms(100)
            .with_cycle_delays(300, 1_000);
        let mut cycle = RefreshCycle::new(&config);
        cycle.start(ms(0));
        cycle.update(ms(100));
        cycle.start(ms(150));
        let events = cycle.update(ms(250));
        assert_eq!(
            events,
            vec![
                CycleEvent::Finished,
                CycleEvent::RerollLowered,
                CycleEvent::RerollRaised
            ]
        );
        // the first cycle's release at 1100 was cancelled
        assert!(cycle.update(ms(1_100)).iter().all(|e| *e != CycleEvent::RerollLowered));
        assert_eq!(cycle.update(ms(1_250)), vec![CycleEvent::RerollLowered]);
    }

    #[test]
    fn cancel_clears_pending() {
        let mut cycle = RefreshCycle::new(&MotionConfig::default());
        cycle.start(ms(0));
        cycle.cancel();
        assert!(!cycle.loader_visible());
        assert!(cycle.update(ms(10_000)).is_empty());
    }
}
