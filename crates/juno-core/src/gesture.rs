//! Pull-to-refresh gesture tracking.
//!
//! Converts raw vertical pointer positions into a bounded pull distance.
//! Motion past the threshold is damped by the resistance factor and the
//! result is clamped to the maximum pull.

use tracing::debug;

use crate::config::MotionConfig;

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pointer is held.
    Idle,
    /// A pointer is held and moving.
    Pulling,
    /// A refresh is running; pointer input is ignored.
    Refreshing,
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The pull passed the threshold and a refresh should start.
    Refresh,
    /// The pull fell short and was reset.
    Cancel,
    /// No pull was in progress.
    Ignored,
}

/// Apply resistance and clamping to a raw downward delta.
pub fn resist(raw: f64, config: &MotionConfig) -> f64 {
    let raw = raw.max(0.0);
    let distance = if raw > config.threshold {
        config.threshold + (raw - config.threshold) * config.resistance
    } else {
        raw
    };
    distance.min(config.max_pull)
}

/// Map a distance onto the 0-100 progress range of the pull indicator.
pub fn progress_for(distance: f64, threshold: f64) -> f64 {
    (distance / threshold).clamp(0.0, 1.0) * 100.0
}

/// Tracks one pull gesture at a time.
#[derive(Debug, Clone)]
pub struct PullTracker {
    config: MotionConfig,
    phase: Phase,
    pull_distance: f64,
    start_y: f64,
    progress: f64,
}

impl PullTracker {
    /// Create an idle tracker.
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            config: config.clone(),
            phase: Phase::Idle,
            pull_distance: 0.0,
            start_y: 0.0,
            progress: 0.0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current pull distance. Pinned to the refresh height while refreshing.
    pub fn pull_distance(&self) -> f64 {
        self.pull_distance
    }

    /// Pointer position recorded when the pull started.
    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    /// Indicator progress (0-100) of the latest pull.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether a pointer is being dragged.
    pub fn is_pulling(&self) -> bool {
        self.phase == Phase::Pulling
    }

    /// Whether a refresh is running.
    pub fn is_refreshing(&self) -> bool {
        self.phase == Phase::Refreshing
    }

    /// Height of the stretch area above the content.
    pub fn display_height(&self) -> f64 {
        match self.phase {
            Phase::Refreshing => self.config.refresh_height,
            Phase::Idle | Phase::Pulling => self.pull_distance.max(self.config.min_height),
        }
    }

    /// Pointer pressed at `y`. Returns `true` if a pull started.
    pub fn pointer_down(&mut self, y: f64) -> bool {
        if self.phase == Phase::Refreshing {
            return false;
        }
        self.phase = Phase::Pulling;
        self.start_y = y;
        self.pull_distance = 0.0;
        self.progress = 0.0;
        true
    }

    /// Pointer moved to `y`. Returns the new distance while pulling.
    pub fn pointer_move(&mut self, y: f64) -> Option<f64> {
        if self.phase != Phase::Pulling {
            return None;
        }
        self.pull_distance = resist(y - self.start_y, &self.config);
        self.progress = progress_for(self.pull_distance, self.config.threshold);
        Some(self.pull_distance)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> Release {
        if self.phase != Phase::Pulling {
            return Release::Ignored;
        }
        if self.pull_distance >= self.config.threshold {
            debug!(distance = self.pull_distance, "pull released past threshold");
            self.phase = Phase::Refreshing;
            self.pull_distance = self.config.refresh_height;
            Release::Refresh
        } else {
            debug!(distance = self.pull_distance, "pull released short of threshold");
            self.reset();
            Release::Cancel
        }
    }

    /// Pointer left the surface. Treated the same as a release.
    pub fn pointer_leave(&mut self) -> Release {
        self.pointer_up()
    }

    /// The refresh finished. Returns `false` if none was running.
    pub fn finish(&mut self) -> bool {
        if self.phase != Phase::Refreshing {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.pull_distance = 0.0;
        self.progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tracker() -> PullTracker {
        PullTracker::new(&MotionConfig::default())
    }

    #[test]
    fn pull_past_threshold_refreshes() {
        let mut t = tracker();
        assert!(t.pointer_down(100.0));
        assert_eq!(t.pointer_move(250.0), Some(125.0));
        assert!((t.progress() - 100.0).abs() < f64::EPSILON);
        assert_eq!(t.pointer_up(), Release::Refresh);
        assert_eq!(t.phase(), Phase::Refreshing);
        assert!((t.display_height() - 48.0).abs() < f64::EPSILON);
        assert!((t.pull_distance() - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn short_pull_cancels() {
        let mut t = tracker();
        t.pointer_down(100.0);
        assert_eq!(t.pointer_move(150.0), Some(50.0));
        assert!((t.progress() - 50.0).abs() < f64::EPSILON);
        assert_eq!(t.pointer_up(), Release::Cancel);
        assert_eq!(t.phase(), Phase::Idle);
        assert_eq!(t.pull_distance(), 0.0);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn upward_motion_clamps_to_zero() {
        let mut t = tracker();
        t.pointer_down(300.0);
        assert_eq!(t.pointer_move(120.0), Some(0.0));
    }

    #[test]
    fn distance_capped_at_max_pull() {
        let mut t = tracker();
        t.pointer_down(0.0);
        assert_eq!(t.pointer_move(10_000.0), Some(200.0));
    }

    #[test]
    fn exact_threshold_refreshes() {
        let mut t = tracker();
        t.pointer_down(0.0);
        t.pointer_move(100.0);
        assert_eq!(t.pointer_up(), Release::Refresh);
    }

    #[test]
    fn refreshing_ignores_pointer() {
        let mut t = tracker();
        t.pointer_down(0.0);
        t.pointer_move(180.0);
        t.pointer_up();
        assert!(!t.pointer_down(10.0));
        assert_eq!(t.pointer_move(400.0), None);
        assert_eq!(t.pointer_up(), Release::Ignored);
        assert!(t.is_refreshing());
        assert!(t.finish());
        assert_eq!(t.phase(), Phase::Idle);
        assert_eq!(t.display_height(), 0.0);
        assert!(!t.finish());
    }

    #[test]
    fn idle_ignores_move_and_release() {
        let mut t = tracker();
        assert_eq!(t.pointer_move(50.0), None);
        assert_eq!(t.pointer_up(), Release::Ignored);
        assert_eq!(t.pointer_leave(), Release::Ignored);
    }

    #[test]
    fn leave_below_threshold_cancels() {
        let mut t = tracker();
        t.pointer_down(10.0);
        t.pointer_move(70.0);
        assert_eq!(t.pointer_leave(), Release::Cancel);
        assert_eq!(t.pull_distance(), 0.0);
        assert_eq!(t.phase(), Phase::Idle);
    }

    #[test]
    fn leave_past_threshold_refreshes() {
        let mut t = tracker();
        t.pointer_down(0.0);
        assert_eq!(t.pointer_move(250.0), Some(175.0));
        assert_eq!(t.pointer_leave(), Release::Refresh);
        assert_eq!(t.phase(), Phase::Refreshing);
        assert!((t.display_height() - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn min_height_floors_display() {
        let config = MotionConfig {
            min_height: 12.0,
            ..MotionConfig::default()
        };
        let mut t = PullTracker::new(&config);
        assert!((t.display_height() - 12.0).abs() < f64::EPSILON);
        t.pointer_down(0.0);
        t.pointer_move(40.0);
        assert!((t.display_height() - 40.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn identity_below_threshold(d in 0.0f64..=100.0) {
            let config = MotionConfig::default();
            prop_assert_eq!(resist(d, &config), d);
        }

        #[test]
        fn resisted_past_threshold(d in 100.0001f64..10_000.0) {
            let config = MotionConfig::default();
            let expected = (100.0 + (d - 100.0) * 0.5).min(200.0);
            prop_assert!((resist(d, &config) - expected).abs() < 1e-9);
            prop_assert!(resist(d, &config) <= config.max_pull);
        }

        #[test]
        fn resistance_slows_growth(
            d in 100.0f64..300.0,
            step in 0.0f64..50.0,
            resistance in 0.0f64..1.0,
        ) {
            let config = MotionConfig::default()
                .with_max_pull(1_000.0)
                .with_resistance(resistance);
            let grown = resist(d + step, &config) - resist(d, &config);
            prop_assert!(grown <= step + 1e-9);
            prop_assert!(grown >= 0.0);
        }

        #[test]
        fn progress_monotonic_and_saturating(a in 0.0f64..400.0, b in 0.0f64..400.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(progress_for(lo, 100.0) <= progress_for(hi, 100.0));
            if hi >= 100.0 {
                prop_assert_eq!(progress_for(hi, 100.0), 100.0);
            }
        }

        #[test]
        fn release_decision_follows_threshold(start in 0.0f64..500.0, delta in -200.0f64..600.0) {
            let mut t = tracker();
            t.pointer_down(start);
            let distance = t.pointer_move(start + delta).unwrap();
            let release = t.pointer_up();
            if distance >= 100.0 {
                prop_assert_eq!(release, Release::Refresh);
                prop_assert_eq!(t.phase(), Phase::Refreshing);
            } else {
                prop_assert_eq!(release, Release::Cancel);
                prop_assert_eq!(t.phase(), Phase::Idle);
                prop_assert_eq!(t.pull_distance(), 0.0);
            }
        }
    }
}
