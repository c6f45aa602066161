//! Move notation.
//!
//! A token is a move symbol (`u`, `l`, `r`, `b` for tips; `U`, `L`, `R`, `B`
//! for layers) followed by an optional modifier: nothing, `'` for an inverse
//! turn, or `2` for a double turn. Sequences are separated by whitespace
//! and/or commas. A lone `|` token is a visual separator and is skipped.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::{Move, MoveKey};

/// Suffix on a notation token.
///
/// `Double` is kept distinct from `Prime` even though both leave a tip in the
/// same position, so that tokens round-trip exactly.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Modifier {
    /// Single clockwise turn.
    #[default]
    None,
    /// Single counterclockwise turn.
    Prime,
    /// Two clockwise turns.
    Double,
}

impl Modifier {
    /// Returns the suffix string.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Prime => "'",
            Self::Double => "2",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "" => Some(Self::None),
            "'" | "\u{2019}" => Some(Self::Prime),
            "2" => Some(Self::Double),
            _ => None,
        }
    }
}

/// One notation token, such as `U'` or `b2`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Token {
    /// Move symbol.
    pub key: MoveKey,
    /// Suffix.
    pub modifier: Modifier,
}

impl Token {
    /// Constructs a token.
    pub const fn new(key: MoveKey, modifier: Modifier) -> Self {
        Self { key, modifier }
    }

    /// Returns the moves that this token expands to, in order.
    pub fn moves(self) -> SmallVec<[Move; 2]> {
        match self.modifier {
            Modifier::None => smallvec![Move::forward(self.key)],
            Modifier::Prime => smallvec![Move::new(self.key, true)],
            Modifier::Double => smallvec![Move::forward(self.key), Move::forward(self.key)],
        }
    }
}

impl From<Move> for Token {
    fn from(mv: Move) -> Self {
        let modifier = match mv.inverse {
            true => Modifier::Prime,
            false => Modifier::None,
        };
        Self::new(mv.key, modifier)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key, self.modifier.suffix())
    }
}

impl FromStr for Token {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let symbol = chars.next().ok_or(NotationError::Empty)?;
        let key = MoveKey::from_symbol(symbol).ok_or(NotationError::UnknownMove(symbol))?;
        let suffix = chars.as_str();
        let modifier =
            Modifier::from_suffix(suffix).ok_or_else(|| NotationError::UnknownModifier {
                token: s.to_owned(),
            })?;
        Ok(Self { key, modifier })
    }
}

/// Error produced when a notation token cannot be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NotationError {
    #[error("empty token")]
    Empty,
    #[error("unknown move symbol {0:?}")]
    UnknownMove(char),
    #[error("unknown modifier in token {token:?}")]
    UnknownModifier { token: String },
}

/// Splits a sequence on whitespace and commas and parses each token.
///
/// Each token is parsed independently so that callers can skip bad tokens
/// and keep the rest.
pub fn parse_sequence(s: &str) -> impl Iterator<Item = Result<Token, NotationError>> + '_ {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty() && *token != "|")
        .map(Token::from_str)
}

/// Parses a sequence, failing on the first bad token.
pub fn parse_sequence_strict(s: &str) -> Result<Vec<Token>, NotationError> {
    parse_sequence(s).collect()
}

/// Formats tokens separated by single spaces.
pub fn format_sequence<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    tokens.into_iter().join(" ")
}

/// Expands tokens into the moves they stand for.
pub fn expand<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Vec<Move> {
    tokens.into_iter().flat_map(|t| t.moves()).collect()
}
