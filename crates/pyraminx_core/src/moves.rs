use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Vertex;

/// One of the 8 move symbols: a tip move (lowercase) or a layer move
/// (uppercase) at one of the four vertices.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum MoveKey {
    /// Rotation of a single tip piece.
    Tip(Vertex),
    /// Rotation of a tip together with its adjacent edges and center.
    Layer(Vertex),
}

impl MoveKey {
    /// All 8 move keys, tips first.
    pub const ALL: [MoveKey; 8] = {
        use Vertex::*;
        [
            MoveKey::Tip(U),
            MoveKey::Tip(L),
            MoveKey::Tip(R),
            MoveKey::Tip(B),
            MoveKey::Layer(U),
            MoveKey::Layer(L),
            MoveKey::Layer(R),
            MoveKey::Layer(B),
        ]
    };

    /// Parses a move key from its symbol. Lowercase letters are tip moves and
    /// uppercase letters are layer moves.
    pub fn from_symbol(c: char) -> Option<Self> {
        let vertex = Vertex::from_symbol(c)?;
        Some(match c.is_ascii_lowercase() {
            true => Self::Tip(vertex),
            false => Self::Layer(vertex),
        })
    }

    /// Returns the symbol for the move key.
    pub fn symbol(self) -> char {
        match self {
            Self::Tip(v) => v.symbol_lower(),
            Self::Layer(v) => v.symbol_upper(),
        }
    }

    /// Returns the vertex that the move pivots around.
    pub fn vertex(self) -> Vertex {
        match self {
            Self::Tip(v) | Self::Layer(v) => v,
        }
    }

    /// Returns whether this is a layer move.
    pub fn is_layer(self) -> bool {
        matches!(self, Self::Layer(_))
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Request to turn one move key by 120 degrees, clockwise when viewed from the
/// tip unless `inverse` is set.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Move {
    /// Which piece group to turn.
    pub key: MoveKey,
    /// Whether to turn counterclockwise.
    pub inverse: bool,
}

impl Move {
    /// Constructs a move.
    pub const fn new(key: MoveKey, inverse: bool) -> Self {
        Self { key, inverse }
    }
    /// Constructs a clockwise move.
    pub const fn forward(key: MoveKey) -> Self {
        Self::new(key, false)
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            inverse: !self.inverse,
            ..self
        }
    }

    /// Returns the signed rotation angle in degrees: -120 for a clockwise
    /// turn and +120 for an inverse turn, following the right-hand rule
    /// around the outward axis.
    pub fn angle_degrees(self) -> f32 {
        match self.inverse {
            false => -120.0,
            true => 120.0,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if self.inverse {
            write!(f, "'")?;
        }
        Ok(())
    }
}
