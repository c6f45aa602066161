use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Sticker color.
///
/// [`Color::Unset`] is a placeholder produced while a face is being scanned.
/// It never appears in a committed [`crate::FaceState`].
#[derive(
    Serialize, Deserialize, Display, EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[allow(missing_docs)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    #[serde(alias = "ROUGE", alias = "red")]
    Red,
    #[serde(alias = "VERT", alias = "green")]
    Green,
    #[serde(alias = "BLEU", alias = "blue")]
    Blue,
    #[serde(alias = "JAUNE", alias = "yellow")]
    Yellow,
    #[default]
    #[serde(alias = "NOIR", alias = "unset")]
    Unset,
}

impl Color {
    /// Returns whether the color is one of the four committed sticker colors.
    pub fn is_committed(self) -> bool {
        self != Self::Unset
    }

    /// Returns a single-letter abbreviation, used for compact text output.
    pub fn letter(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
            Self::Unset => '.',
        }
    }
}
