//! Fade-out, swap, staggered fade-in of a single display value.
//!
//! A [`RerollSequencer`] hides its value on a trigger, swaps in a freshly
//! generated value once the slowest character has faded out, then reveals
//! it two frames later so a renderer always draws the new value hidden
//! before the fade-in starts.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::MotionConfig;
use crate::timer::Timers;
use crate::value::{DisplayValue, ValueKind};

/// Frames between the value swap and the start of the fade-in.
const REVEAL_FRAMES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RerollStep {
    Swap,
    Reveal,
}

/// One character of a value with its animation state at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// The character.
    pub ch: char,
    /// Opacity from 0 (hidden) to 1 (fully shown).
    pub opacity: f32,
    /// Upward slide from 0 (resting) to 1 (fully lifted).
    pub lift: f32,
}

/// Animates rerolls of one value.
#[derive(Debug, Clone)]
pub struct RerollSequencer {
    kind: ValueKind,
    value: DisplayValue,
    visible: bool,
    /// When visibility last flipped; `None` while at rest since creation.
    changed_at: Option<Duration>,
    /// Per-glyph opacity when the current transition began.
    from: Vec<f32>,
    trigger: bool,
    fade: Duration,
    stagger: Duration,
    timers: Timers<RerollStep>,
    rng: StdRng,
    swaps: u64,
}

impl RerollSequencer {
    /// Create a sequencer showing the kind's initial value.
    pub fn new(kind: ValueKind, config: &MotionConfig, seed: u64) -> Self {
        Self {
            kind,
            value: kind.initial(),
            visible: true,
            changed_at: None,
            from: Vec::new(),
            trigger: false,
            fade: config.fade_duration(),
            stagger: config.char_stagger(),
            timers: Timers::new(),
            rng: StdRng::seed_from_u64(seed),
            swaps: 0,
        }
    }

    /// Replace the starting value.
    pub fn with_value(mut self, value: DisplayValue) -> Self {
        self.value = value;
        self.from.clear();
        self
    }

    /// The kind of value being animated.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The value currently displayed.
    pub fn value(&self) -> &DisplayValue {
        &self.value
    }

    /// Whether the value is shown (or fading in).
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// How many times the value has been replaced.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Whether a swap or reveal is still pending.
    pub fn is_busy(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Feed the external trigger level; a rising edge starts a cycle.
    pub fn set_trigger(&mut self, now: Duration, active: bool) {
        let rising = active && !self.trigger;
        self.trigger = active;
        if rising {
            self.trigger_now(now);
        }
    }

    /// Start a cycle immediately, superseding any cycle in flight.
    ///
    /// A fade-out already under way keeps its timeline. A fade-in is turned
    /// around from each glyph's current opacity.
    pub fn trigger_now(&mut self, now: Duration) {
        self.timers.clear();
        if self.visible {
            self.from = (0..self.value.len())
                .map(|i| self.opacity(i, now))
                .collect();
            self.visible = false;
            self.changed_at = Some(now);
        }
        let delay = self.swap_delay();
        self.timers.schedule(now, delay, RerollStep::Swap);
        debug!(kind = ?self.kind, value = %self.value, ?delay, "reroll started");
    }

    /// Process one frame.
    pub fn update(&mut self, now: Duration) {
        for step in self.timers.poll(now) {
            match step {
                RerollStep::Swap => {
                    self.value = self.kind.generate(&mut self.rng);
                    self.swaps += 1;
                    self.from = vec![0.0; self.value.len()];
                    self.timers.defer_frames(REVEAL_FRAMES, RerollStep::Reveal);
                    debug!(kind = ?self.kind, value = %self.value, "reroll swapped value");
                }
                RerollStep::Reveal => {
                    self.visible = true;
                    self.changed_at = Some(now);
                    self.from = vec![0.0; self.value.len()];
                }
            }
        }
    }

    /// Drop every pending step.
    pub fn unmount(&mut self) {
        self.timers.clear();
    }

    /// Time from the trigger until the swap: long enough for every
    /// character's fade-out, with one stagger of slack.
    pub fn swap_delay(&self) -> Duration {
        self.fade + self.stagger * char_count(&self.value)
    }

    /// Visual length of one fade across the whole value.
    pub fn cycle_duration(&self) -> Duration {
        self.fade + self.stagger * char_count(&self.value).saturating_sub(1)
    }

    /// Start offset of each character's transition.
    pub fn char_delays(&self) -> Vec<Duration> {
        (0..char_count(&self.value))
            .map(|i| self.stagger * i)
            .collect()
    }

    /// Per-character animation state at `now`.
    pub fn glyphs(&self, now: Duration) -> Vec<Glyph> {
        self.value
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let shown = self.opacity(i, now);
                Glyph {
                    ch,
                    opacity: shown,
                    lift: 1.0 - shown,
                }
            })
            .collect()
    }

    fn opacity(&self, index: usize, now: Duration) -> f32 {
        let target = if self.visible { 1.0 } else { 0.0 };
        let Some(at) = self.changed_at else {
            return target;
        };
        let from = self.from.get(index).copied().unwrap_or(1.0 - target);
        let start = at + self.stagger * u32::try_from(index).unwrap_or(u32::MAX);
        let t = ease_out(progress(now, start, self.fade));
        from + (target - from) * t
    }
}

fn char_count(value: &DisplayValue) -> u32 {
    u32::try_from(value.len()).unwrap_or(u32::MAX)
}

/// Linear progress of a transition that starts at `start` and lasts `length`.
fn progress(now: Duration, start: Duration, length: Duration) -> f32 {
    if now <= start {
        return 0.0;
    }
    if length.is_zero() {
        return 1.0;
    }
    ((now - start).as_secs_f32() / length.as_secs_f32()).min(1.0)
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
