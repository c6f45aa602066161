use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::InterpolateFn;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
/// Embedded default preferences.
pub const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Animation and playback timing.
///
/// All durations are in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of one move when the backlog is small.
    pub twist_duration: f32,
    /// Duration of one move when the backlog exceeds
    /// `fast_forward_threshold`.
    pub fast_twist_duration: f32,
    /// Backlog size above which moves play at `fast_twist_duration`.
    pub fast_forward_threshold: usize,
    /// Whether to speed up exponentially with backlog size instead.
    pub dynamic_twist_speed: bool,
    /// Easing curve applied to animation progress.
    pub twist_interpolation: InterpolateFn,

    /// Delay between tokens during scramble playback.
    pub scramble_interval: f32,
    /// Delay between the two halves of a double token during scramble
    /// playback.
    pub double_turn_pause: f32,
    /// Delay between tokens during algorithm and solution playback.
    pub algorithm_interval: f32,
}

impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.25,
            fast_twist_duration: 0.08,
            fast_forward_threshold: 2,
            dynamic_twist_speed: false,
            twist_interpolation: InterpolateFn::CubicOut,

            scramble_interval: 0.05,
            double_turn_pause: 0.1,
            algorithm_interval: 0.25,
        }
    }
}

impl AnimationPreferences {
    /// Loads the embedded defaults, overridden by `user_file` if it exists.
    ///
    /// Errors are logged and the defaults are returned instead.
    pub fn load(user_file: Option<&Path>) -> Self {
        let default_config_source = config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT);
        let mut config = config::Config::builder().add_source(default_config_source);

        if let Some(path) = user_file {
            log::debug!("loading preferences from {}", path.display());
            config = config.add_source(
                config::File::from(path)
                    .format(PREFS_FILE_FORMAT)
                    .required(false),
            );
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                Self::default()
            })
    }

    /// Writes the preferences to a YAML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_norway::to_string(self).context("error serializing preferences")?;
        std::fs::write(path, contents)
            .with_context(|| format!("error writing preferences to {}", path.display()))
    }

    /// Returns the duration of one move, given the number of moves that have
    /// not yet been committed (including the one currently animating).
    pub fn twist_duration_for_backlog(&self, backlog: usize) -> f32 {
        if self.dynamic_twist_speed {
            let speed_mod = (backlog.saturating_sub(1) as f32 * EXP_TWIST_FACTOR).exp();
            self.twist_duration / speed_mod
        } else if backlog > self.fast_forward_threshold {
            self.fast_twist_duration
        } else {
            self.twist_duration
        }
    }
}
