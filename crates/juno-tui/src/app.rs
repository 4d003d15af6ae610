//! Top-level application state: the mounted screen and its clock.

use std::time::{Duration, Instant};

use juno_core::MotionConfig;
use tracing::info;

use crate::screens::ScreenId;
use crate::screens::wallet::WalletView;

/// Main application state.
pub struct JunoApp {
    /// Currently mounted screen.
    pub active: ScreenId,
    /// The mounted wallet view.
    pub view: WalletView,
    /// Motion tuning shared by every mount.
    pub config: MotionConfig,
    /// Seed for the value generators.
    pub seed: u64,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    mounted_at: Instant,
}

impl JunoApp {
    /// Create an app with `start` mounted.
    pub fn new(start: ScreenId, config: MotionConfig, seed: u64) -> Self {
        info!(screen = start.label(), seed, "mounting screen");
        Self {
            active: start,
            view: WalletView::new(start.mode(), config.clone(), seed),
            config,
            seed,
            show_help: false,
            should_quit: false,
            mounted_at: Instant::now(),
        }
    }

    /// Time since the current screen was mounted.
    pub fn now(&self) -> Duration {
        self.mounted_at.elapsed()
    }

    /// Unmount the current screen and mount `screen` fresh.
    pub fn switch_screen(&mut self, screen: ScreenId) {
        if screen == self.active {
            return;
        }
        self.view.unmount();
        info!(from = self.active.label(), to = screen.label(), "switching screen");
        self.active = screen;
        self.view = WalletView::new(screen.mode(), self.config.clone(), self.seed);
        self.mounted_at = Instant::now();
    }

    /// Advance the mounted screen one frame.
    pub fn update(&mut self) {
        let now = self.now();
        self.view.update(now);
    }
}
