//! Easing curves for move animations.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Function that maps a float from the range 0.0 to 1.0 to another float
/// from 0.0 to 1.0.
#[derive(
    Serialize, Deserialize, EnumIter, EnumString, Debug, Default, Copy, Clone, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterpolateFn {
    /// Constant speed.
    Lerp,
    /// Smooth start and end.
    Cosine,
    /// Smoothstep.
    Cubic,
    /// Fast start, slowing into place.
    #[default]
    CubicOut,
    /// Overshoots slightly, then settles.
    Overshoot,
}

impl InterpolateFn {
    /// Returns the interpolation value for `t`, which is clamped to the range
    /// [0, 1].
    pub fn interpolate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Lerp => t,

            Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

            Self::Cubic => (3.0 - 2.0 * t) * t * t,

            Self::CubicOut => 1.0 - (1.0 - t).powi(3),

            Self::Overshoot => {
                // https://easings.net/#easeOutBack
                let c1 = 1.70158;
                let c3 = c1 + 1.0;

                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
        }
    }
}
