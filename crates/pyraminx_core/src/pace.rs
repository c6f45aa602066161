use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Solving speed used to estimate how long a move sequence takes to execute
/// by hand.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SolvePace {
    /// Following written notation.
    Reading,
    /// Typical casual solver.
    #[default]
    Average,
    /// Competitive solver.
    Pro,
    /// Solving machine.
    Robot,
}

impl SolvePace {
    /// Returns the pace in turns per second.
    pub fn turns_per_second(self) -> f32 {
        match self {
            Self::Reading => 0.8,
            Self::Average => 3.0,
            Self::Pro => 10.0,
            Self::Robot => 20.0,
        }
    }

    /// Parses a pace name, falling back to [`SolvePace::Average`] for
    /// unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Estimates the number of seconds needed to perform `move_count` turns.
    pub fn estimate_seconds(self, move_count: usize) -> f32 {
        move_count as f32 / self.turns_per_second()
    }
}
