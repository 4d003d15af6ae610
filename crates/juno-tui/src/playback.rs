//! Terminal renditions of the loader and pull indicator animations.

use juno_core::{Playback, PlaybackInput};

/// Spinner frame sets, one per loader variant.
const LOADER_VARIANTS: [&[char]; 5] = [
    &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'],
    &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'],
    &['◜', '◠', '◝', '◞', '◡', '◟'],
    &['▖', '▘', '▝', '▗'],
    &['◐', '◓', '◑', '◒'],
];

/// Frames shown by the indicator while looping.
const INDICATOR_LOOP: &[char] = &['◴', '◷', '◶', '◵'];

/// Loader spinner whose frame set is chosen by the variant input.
#[derive(Debug, Clone)]
pub struct SpinnerLoader {
    variant: u32,
    frame: usize,
}

impl Default for SpinnerLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerLoader {
    /// Create a loader showing the first variant.
    pub fn new() -> Self {
        Self {
            variant: 1,
            frame: 0,
        }
    }

    /// Number of variants this loader can play.
    pub fn variant_count() -> u32 {
        LOADER_VARIANTS.len() as u32
    }

    /// The variant currently playing (1-based).
    pub fn variant(&self) -> u32 {
        self.variant
    }

    /// Step the spinner by one frame.
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// The character to draw for the current frame.
    pub fn glyph(&self) -> char {
        let frames = LOADER_VARIANTS[(self.variant as usize - 1) % LOADER_VARIANTS.len()];
        frames[self.frame % frames.len()]
    }
}

impl Playback for SpinnerLoader {
    fn has_input(&self, input: PlaybackInput) -> bool {
        input == PlaybackInput::Variant
    }

    fn set_number(&mut self, input: PlaybackInput, value: f64) {
        if input == PlaybackInput::Variant {
            self.variant = (value.round() as u32).clamp(1, Self::variant_count());
            self.frame = 0;
        }
    }

    fn fire(&mut self, _input: PlaybackInput) {}
}

/// Pull indicator: an arrow that fills with progress and spins while looping.
#[derive(Debug, Clone, Default)]
pub struct PullIndicator {
    progress: f64,
    looping: bool,
    frame: usize,
}

impl PullIndicator {
    /// Create an indicator at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last progress assigned (0-100).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the looping segment is playing.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Step the loop animation by one frame.
    pub fn advance(&mut self) {
        if self.looping {
            self.frame = self.frame.wrapping_add(1);
        }
    }

    /// The character to draw.
    pub fn glyph(&self) -> char {
        if self.looping {
            INDICATOR_LOOP[self.frame % INDICATOR_LOOP.len()]
        } else if self.progress >= 100.0 {
            '↻'
        } else {
            '↓'
        }
    }

    /// Progress as a bar of `width` cells.
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.progress / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "━".repeat(filled), "╌".repeat(width - filled))
    }
}

impl Playback for PullIndicator {
    fn has_input(&self, input: PlaybackInput) -> bool {
        matches!(
            input,
            PlaybackInput::Progress | PlaybackInput::StartLoop | PlaybackInput::EndLoop
        )
    }

    fn set_number(&mut self, input: PlaybackInput, value: f64) {
        if input == PlaybackInput::Progress {
            self.progress = value.clamp(0.0, 100.0);
        }
    }

    fn fire(&mut self, input: PlaybackInput) {
        match input {
            PlaybackInput::StartLoop => {
                self.looping = true;
                self.frame = 0;
            }
            PlaybackInput::EndLoop => self.looping = false,
            PlaybackInput::Variant | PlaybackInput::Progress => {}
        }
    }
}
