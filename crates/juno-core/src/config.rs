//! Timing and distance constants shared by every controller on a screen.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Motion configuration for gestures, the refresh cycle, and value rerolls.
///
/// Distances are in pixels of the pointer's coordinate space. Durations are
/// in milliseconds. A config is read-only once handed to a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Pull distance at which a release starts a refresh.
    pub threshold: f64,
    /// Upper bound for the resisted pull distance.
    pub max_pull: f64,
    /// Fraction of pointer motion applied past the threshold (0-1).
    pub resistance: f64,
    /// Height the stretch area is pinned to while refreshing.
    pub refresh_height: f64,
    /// Smallest height the stretch area collapses to.
    pub min_height: f64,
    /// How long the loader stays visible once a refresh starts.
    pub hide_after_ms: u64,
    /// Length of a single character's fade.
    pub fade_duration_ms: u64,
    /// Delay between consecutive characters' fades.
    pub char_stagger_ms: u64,
    /// Delay after the loader hides before it is reset to a new variant.
    pub loader_reset_ms: u64,
    /// Delay after the loader hides before the reroll trigger is released.
    pub reroll_settle_ms: u64,
    /// Number of pre-authored loader variants.
    pub loader_variants: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            max_pull: 200.0,
            resistance: 0.5,
            refresh_height: 48.0,
            min_height: 0.0,
            hide_after_ms: 4000,
            fade_duration_ms: 300,
            char_stagger_ms: 25,
            loader_reset_ms: 300,
            reroll_settle_ms: 1075,
            loader_variants: 5,
        }
    }
}

impl MotionConfig {
    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML, suitable for [`MotionConfig::from_toml_str`].
    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if !(self.max_pull.is_finite() && self.max_pull >= self.threshold) {
            return Err(CoreError::InvalidConfig(format!(
                "max_pull ({}) must be at least threshold ({})",
                self.max_pull, self.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.resistance) {
            return Err(CoreError::InvalidConfig(format!(
                "resistance must be within 0-1, got {}",
                self.resistance
            )));
        }
        if self.refresh_height < 0.0 || self.min_height < 0.0 {
            return Err(CoreError::InvalidConfig(
                "heights must not be negative".into(),
            ));
        }
        if self.fade_duration_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "fade_duration_ms must be positive".into(),
            ));
        }
        if self.loader_variants == 0 {
            return Err(CoreError::InvalidConfig(
                "loader_variants must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Set the refresh threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the maximum pull distance.
    pub fn with_max_pull(mut self, max_pull: f64) -> Self {
        self.max_pull = max_pull;
        self
    }

    /// Set the overscroll resistance (clamped to 0-1).
    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.resistance = resistance.clamp(0.0, 1.0);
        self
    }

    /// Set how long the loader stays visible.
    pub fn with_hide_after_ms(mut self, ms: u64) -> Self {
        self.hide_after_ms = ms;
        self
    }

    /// Set the per-character fade duration and stagger.
    pub fn with_fade(mut self, fade_ms: u64, stagger_ms: u64) -> Self {
        self.fade_duration_ms = fade_ms;
        self.char_stagger_ms = stagger_ms;
        self
    }

    /// Set the loader reset and reroll settle delays.
    pub fn with_cycle_delays(mut self, loader_reset_ms: u64, reroll_settle_ms: u64) -> Self {
        self.loader_reset_ms = loader_reset_ms;
        self.reroll_settle_ms = reroll_settle_ms;
        self
    }

    /// Loader visibility window.
    pub fn hide_after(&self) -> Duration {
        Duration::from_millis(self.hide_after_ms)
    }

    /// Per-character fade duration.
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    /// Delay between consecutive characters.
    pub fn char_stagger(&self) -> Duration {
        Duration::from_millis(self.char_stagger_ms)
    }

    /// Delay before the loader is reset after hiding.
    pub fn loader_reset(&self) -> Duration {
        Duration::from_millis(self.loader_reset_ms)
    }

    /// Delay before the reroll trigger is released after hiding.
    pub fn reroll_settle(&self) -> Duration {
        Duration::from_millis(self.reroll_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = MotionConfig::default();
        assert!((config.threshold - 100.0).abs() < f64::EPSILON);
        assert!((config.max_pull - 200.0).abs() < f64::EPSILON);
        assert!((config.resistance - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.hide_after(), Duration::from_secs(4));
        assert_eq!(config.reroll_settle(), Duration::from_millis(1075));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = MotionConfig::default()
            .with_threshold(80.0)
            .with_max_pull(160.0)
            .with_resistance(2.0)
            .with_hide_after_ms(1000)
            .with_fade(200, 10);
        assert!((config.threshold - 80.0).abs() < f64::EPSILON);
        assert!((config.resistance - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.hide_after_ms, 1000);
        assert_eq!(config.char_stagger(), Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rendered_toml_parses_back() {
        let config = MotionConfig::default().with_threshold(120.0).with_max_pull(240.0);
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("threshold = 120.0"));
        assert_eq!(MotionConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn toml_overrides_keep_defaults() {
        let config =
            MotionConfig::from_toml_str("threshold = 60.0\nhide_after_ms = 1500\n").unwrap();
        assert!((config.threshold - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.hide_after_ms, 1500);
        assert_eq!(config.loader_variants, 5);
    }

    #[test]
    fn toml_unknown_key_rejected() {
        let err = MotionConfig::from_toml_str("thresold = 60.0\n").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn invalid_values_rejected() {
        let zero = MotionConfig::default().with_threshold(0.0);
        assert!(matches!(zero.validate(), Err(CoreError::InvalidConfig(_))));

        let short = MotionConfig::default().with_max_pull(50.0);
        assert!(short.validate().is_err());

        let resist = MotionConfig {
            resistance: 1.5,
            ..MotionConfig::default()
        };
        assert!(resist.validate().is_err());

        let no_variants = MotionConfig {
            loader_variants: 0,
            ..MotionConfig::default()
        };
        assert!(no_variants.validate().is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("motion.toml");
        std::fs::write(&path, "resistance = 0.25\n").unwrap();
        let config = MotionConfig::load(&path).unwrap();
        assert!((config.resistance - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = MotionConfig::load(Path::new("/nonexistent/juno/motion.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }
}
