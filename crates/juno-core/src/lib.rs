//! Interaction engine for the Juno wallet home screen.
//!
//! Every controller here is a plain state machine driven by explicit
//! timestamps (time since the screen was mounted), so the same code runs
//! under a terminal event loop or a test harness. Nothing blocks and
//! nothing is shared between controllers.

/// Motion configuration: thresholds, durations, variant count.
pub mod config;
/// Error types for config loading and validation.
pub mod error;
/// Pull-to-refresh gesture tracking.
pub mod gesture;
/// A mounted home screen composing every controller.
pub mod home;
/// The seam to pre-authored loader and indicator animations.
pub mod playback;
/// The timed sequence after a refresh starts.
pub mod refresh;
/// Staggered fade-out, swap, fade-in of a display value.
pub mod reroll;
/// Per-controller deadline timers and frame deferrals.
pub mod timer;
/// Display values and their random generation.
pub mod value;

/// Re-export of [`config::MotionConfig`].
pub use config::MotionConfig;
/// Re-exports of [`error::CoreError`] and [`error::CoreResult`].
pub use error::{CoreError, CoreResult};
/// Re-exports of [`gesture::PullTracker`], [`gesture::Phase`], and [`gesture::Release`].
pub use gesture::{Phase, PullTracker, Release};
/// Re-exports of [`home::HomeScreen`] and [`home::RefreshMode`].
pub use home::{HomeScreen, RefreshMode};
/// Re-exports of [`playback::Playback`] and [`playback::PlaybackInput`].
pub use playback::{Playback, PlaybackInput};
/// Re-exports of [`refresh::RefreshCycle`] and [`refresh::CycleEvent`].
pub use refresh::{CycleEvent, RefreshCycle};
/// Re-exports of [`reroll::RerollSequencer`] and [`reroll::Glyph`].
pub use reroll::{Glyph, RerollSequencer};
/// Re-exports of [`value::DisplayValue`] and [`value::ValueKind`].
pub use value::{DisplayValue, ValueKind};
