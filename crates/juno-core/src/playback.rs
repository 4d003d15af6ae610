//! The seam to pre-authored animations.
//!
//! The engine only assigns numbers and fires triggers on a [`Playback`]. It
//! never reads animation state back. A playback that has not bound an
//! input yet turns the assignment into a no-op.

use rand::Rng;
use tracing::trace;

/// Named inputs a playback may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackInput {
    /// Integer choosing which pre-authored variation plays.
    Variant,
    /// Pull progress, 0-100.
    Progress,
    /// Trigger entering the looping segment.
    StartLoop,
    /// Trigger leaving the looping segment.
    EndLoop,
}

impl PlaybackInput {
    /// The input's name inside the animation asset.
    pub fn name(self) -> &'static str {
        match self {
            Self::Variant => "Number 1",
            Self::Progress => "Progress",
            Self::StartLoop => "StartLoop",
            Self::EndLoop => "EndLoop",
        }
    }
}

/// An animation that accepts named numeric and trigger inputs.
pub trait Playback {
    /// Whether `input` is bound and ready to receive values.
    fn has_input(&self, input: PlaybackInput) -> bool;

    /// Assign a numeric input.
    fn set_number(&mut self, input: PlaybackInput, value: f64);

    /// Fire a trigger input.
    fn fire(&mut self, input: PlaybackInput);
}

/// A playback with no bound inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Playback for Detached {
    fn has_input(&self, _input: PlaybackInput) -> bool {
        false
    }

    fn set_number(&mut self, _input: PlaybackInput, _value: f64) {}

    fn fire(&mut self, _input: PlaybackInput) {}
}

/// Assign a number if the playback is present and has the input bound.
pub fn assign<P: Playback + ?Sized>(target: Option<&mut P>, input: PlaybackInput, value: f64) {
    match target {
        Some(p) if p.has_input(input) => p.set_number(input, value),
        _ => trace!(input = input.name(), "playback input not bound, skipping"),
    }
}

/// Fire a trigger if the playback is present and has the input bound.
pub fn fire<P: Playback + ?Sized>(target: Option<&mut P>, input: PlaybackInput) {
    match target {
        Some(p) if p.has_input(input) => p.fire(input),
        _ => trace!(input = input.name(), "playback trigger not bound, skipping"),
    }
}

/// Picks loader variants in `1..=count`, never repeating the previous one.
#[derive(Debug, Clone)]
pub struct VariantPicker {
    count: u32,
    last: Option<u32>,
}

impl VariantPicker {
    /// Create a picker over `count` variants (at least one).
    pub fn new(count: u32) -> Self {
        Self {
            count: count.max(1),
            last: None,
        }
    }

    /// The most recent pick.
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Draw the next variant.
    pub fn pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let next = if self.count == 1 {
            1
        } else {
            loop {
                let candidate = rng.random_range(1..=self.count);
                if Some(candidate) != self.last {
                    break candidate;
                }
            }
        };
        self.last = Some(next);
        next
    }
}
