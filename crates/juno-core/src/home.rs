//! One wallet home screen: refresh controls, rerolling values, playbacks.
//!
//! [`HomeScreen`] owns every controller of a mounted screen and routes the
//! refresh cycle's events to the pull tracker, the three rerolling values,
//! and the attached playbacks.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::MotionConfig;
use crate::gesture::{Phase, PullTracker, Release};
use crate::playback::{self, Detached, Playback, PlaybackInput, VariantPicker};
use crate::refresh::{CycleEvent, RefreshCycle};
use crate::reroll::RerollSequencer;
use crate::value::ValueKind;

/// How a refresh is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// A refresh button.
    Button,
    /// A pull-down gesture.
    Pull,
}

/// State of a mounted wallet home screen.
#[derive(Debug)]
pub struct HomeScreen<L: Playback = Detached, I: Playback = Detached> {
    mode: RefreshMode,
    config: MotionConfig,
    tracker: PullTracker,
    cycle: RefreshCycle,
    balance: RerollSequencer,
    dollar_change: RerollSequencer,
    percent_change: RerollSequencer,
    variants: VariantPicker,
    rng: StdRng,
    loader: Option<L>,
    indicator: Option<I>,
}

impl<L: Playback, I: Playback> HomeScreen<L, I> {
    /// Mount a screen. `seed` makes every generated value reproducible.
    pub fn new(mode: RefreshMode, config: MotionConfig, seed: u64) -> Self {
        Self {
            mode,
            tracker: PullTracker::new(&config),
            cycle: RefreshCycle::new(&config),
            balance: RerollSequencer::new(ValueKind::Balance, &config, seed),
            dollar_change: RerollSequencer::new(ValueKind::Dollar, &config, seed.wrapping_add(1)),
            percent_change: RerollSequencer::new(
                ValueKind::Percent,
                &config,
                seed.wrapping_add(2),
            ),
            variants: VariantPicker::new(config.loader_variants),
            rng: StdRng::seed_from_u64(seed.wrapping_add(3)),
            loader: None,
            indicator: None,
            config,
        }
    }

    /// Bind the loader animation and give it its first variant.
    pub fn attach_loader(&mut self, loader: L) {
        self.loader = Some(loader);
        self.shuffle_loader();
    }

    /// Bind the pull indicator animation at rest.
    pub fn attach_indicator(&mut self, indicator: I) {
        self.indicator = Some(indicator);
        playback::assign(self.indicator.as_mut(), PlaybackInput::Progress, 0.0);
    }

    /// The refresh mode this screen was mounted with.
    pub fn mode(&self) -> RefreshMode {
        self.mode
    }

    /// The motion config in effect.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// The pull gesture tracker.
    pub fn tracker(&self) -> &PullTracker {
        &self.tracker
    }

    /// The refresh cycle.
    pub fn cycle(&self) -> &RefreshCycle {
        &self.cycle
    }

    /// The account balance.
    pub fn balance(&self) -> &RerollSequencer {
        &self.balance
    }

    /// The dollar change shown under the balance.
    pub fn dollar_change(&self) -> &RerollSequencer {
        &self.dollar_change
    }

    /// The percent change shown under the balance.
    pub fn percent_change(&self) -> &RerollSequencer {
        &self.percent_change
    }

    /// The loader animation, if attached.
    pub fn loader(&self) -> Option<&L> {
        self.loader.as_ref()
    }

    /// The pull indicator animation, if attached.
    pub fn indicator(&self) -> Option<&I> {
        self.indicator.as_ref()
    }

    /// Mutable loader access, for playbacks that advance their own frames.
    pub fn loader_mut(&mut self) -> Option<&mut L> {
        self.loader.as_mut()
    }

    /// Mutable indicator access, for playbacks that advance their own frames.
    pub fn indicator_mut(&mut self) -> Option<&mut I> {
        self.indicator.as_mut()
    }

    /// Whether the loader is showing.
    pub fn is_refreshing(&self) -> bool {
        self.cycle.loader_visible()
    }

    /// Height of the stretch area above the balance card.
    pub fn stretch_height(&self) -> f64 {
        self.tracker.display_height()
    }

    /// Refresh button pressed. Returns `true` if a refresh started.
    pub fn press_refresh(&mut self, now: Duration) -> bool {
        if self.mode != RefreshMode::Button {
            return false;
        }
        self.cycle.start(now)
    }

    /// Pointer pressed at `y`. Returns `true` if a pull started.
    pub fn pointer_down(&mut self, y: f64) -> bool {
        self.mode == RefreshMode::Pull && self.tracker.pointer_down(y)
    }

    /// Pointer moved to `y`. Returns the pull distance while pulling.
    pub fn pointer_move(&mut self, y: f64) -> Option<f64> {
        if self.mode != RefreshMode::Pull {
            return None;
        }
        let distance = self.tracker.pointer_move(y)?;
        playback::assign(
            self.indicator.as_mut(),
            PlaybackInput::Progress,
            self.tracker.progress(),
        );
        Some(distance)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, now: Duration) -> Release {
        if self.mode != RefreshMode::Pull {
            return Release::Ignored;
        }
        let release = self.tracker.pointer_up();
        self.apply_release(now, release);
        release
    }

    /// Pointer left the screen.
    pub fn pointer_leave(&mut self, now: Duration) -> Release {
        if self.mode != RefreshMode::Pull {
            return Release::Ignored;
        }
        let release = self.tracker.pointer_leave();
        self.apply_release(now, release);
        release
    }

    fn apply_release(&mut self, now: Duration, release: Release) {
        match release {
            Release::Refresh => {
                playback::fire(self.indicator.as_mut(), PlaybackInput::StartLoop);
                self.cycle.start(now);
            }
            Release::Cancel => {
                playback::assign(self.indicator.as_mut(), PlaybackInput::Progress, 0.0);
            }
            Release::Ignored => {}
        }
    }

    /// Process one frame.
    pub fn update(&mut self, now: Duration) {
        for event in self.cycle.update(now) {
            debug!(?event, "refresh cycle event");
            match event {
                CycleEvent::Finished => {
                    if self.tracker.phase() == Phase::Refreshing {
                        self.tracker.finish();
                    }
                }
                CycleEvent::RerollRaised => self.set_reroll(now, true),
                CycleEvent::RerollLowered => self.set_reroll(now, false),
                CycleEvent::LoaderReset => {
                    self.shuffle_loader();
                    playback::fire(self.indicator.as_mut(), PlaybackInput::EndLoop);
                    playback::assign(self.indicator.as_mut(), PlaybackInput::Progress, 0.0);
                }
            }
        }

        self.balance.update(now);
        self.dollar_change.update(now);
        self.percent_change.update(now);
    }

    /// Drop every pending timer and return to rest.
    pub fn unmount(&mut self) {
        self.cycle.cancel();
        self.balance.unmount();
        self.dollar_change.unmount();
        self.percent_change.unmount();
        self.tracker = PullTracker::new(&self.config);
    }

    fn set_reroll(&mut self, now: Duration, active: bool) {
        self.balance.set_trigger(now, active);
        self.dollar_change.set_trigger(now, active);
        self.percent_change.set_trigger(now, active);
    }

    fn shuffle_loader(&mut self) {
        if self.loader.is_none() {
            return;
        }
        let variant = self.variants.pick(&mut self.rng);
        playback::assign(
            self.loader.as_mut(),
            PlaybackInput::Variant,
            f64::from(variant),
        );
    }
}
