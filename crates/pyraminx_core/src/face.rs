use std::fmt;
use std::ops::{Index, IndexMut};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::Color;

/// Number of stickers on each face.
pub const STICKERS_PER_FACE: usize = 9;

/// Face of the tetrahedron, named by its position in the canonical
/// orientation.
///
/// Enumeration order is significant: it breaks ties in orientation detection.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[allow(missing_docs)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Face {
    Front,
    Right,
    Left,
    Bottom,
}

impl Face {
    /// Returns the three vertices bounding the face, in the order of the tip
    /// stickers at indices 0, 4, and 8.
    pub const fn vertices(self) -> [Vertex; 3] {
        use Vertex::*;
        match self {
            Face::Front => [U, L, R],
            Face::Right => [U, R, B],
            Face::Left => [U, B, L],
            Face::Bottom => [B, R, L],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Vertex of the tetrahedron. Each vertex has a tip piece and a rotation axis.
#[derive(
    Serialize, Deserialize, Display, EnumIter, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Vertex {
    /// Up.
    U,
    /// Left.
    L,
    /// Right.
    R,
    /// Back.
    B,
}

impl Vertex {
    /// Returns the lowercase symbol used for the tip move at this vertex.
    pub fn symbol_lower(self) -> char {
        self.symbol_upper().to_ascii_lowercase()
    }
    /// Returns the uppercase symbol used for the layer move at this vertex.
    pub fn symbol_upper(self) -> char {
        match self {
            Self::U => 'U',
            Self::L => 'L',
            Self::R => 'R',
            Self::B => 'B',
        }
    }
    /// Parses a vertex from a move symbol, ignoring case.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Self::U),
            'L' => Some(Self::L),
            'R' => Some(Self::R),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    /// Returns the faces that touch this vertex, in enumeration order.
    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::iter().filter(move |f| f.vertices().contains(&self))
    }
}

/// Position of one sticker: a face and an index from 0 to 8.
///
/// Index 0 is the tip at the face's first vertex, indices 1..=3 form the
/// second row, and indices 4..=8 form the bottom row.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StickerPos {
    /// Face containing the sticker.
    pub face: Face,
    /// Index of the sticker within the face.
    pub index: u8,
}

impl StickerPos {
    /// Constructs a sticker position.
    pub const fn new(face: Face, index: u8) -> Self {
        Self { face, index }
    }
}

impl fmt::Display for StickerPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.face, self.index)
    }
}

/// Colors of all 36 stickers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FaceState([[Color; STICKERS_PER_FACE]; 4]);

impl Default for FaceState {
    fn default() -> Self {
        Self::solved()
    }
}

impl FaceState {
    /// Returns the default solved coloring: front red, right yellow, left
    /// green, bottom blue.
    pub const fn solved() -> Self {
        Self([
            [Color::Red; STICKERS_PER_FACE],
            [Color::Yellow; STICKERS_PER_FACE],
            [Color::Green; STICKERS_PER_FACE],
            [Color::Blue; STICKERS_PER_FACE],
        ])
    }

    /// Constructs a state from raw per-face arrays, in [`Face`] enumeration
    /// order.
    ///
    /// This does not check for [`Color::Unset`]; use [`crate::Snapshot`] to
    /// import untrusted data.
    pub const fn from_faces(faces: [[Color; STICKERS_PER_FACE]; 4]) -> Self {
        Self(faces)
    }

    /// Returns whether every face is a single color.
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|stickers| stickers.iter().all_equal())
    }

    /// Iterates over faces and their stickers.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &[Color; STICKERS_PER_FACE])> {
        Face::iter().map(|face| (face, &self[face]))
    }

    /// Formats the state as one line per face, using one letter per sticker.
    pub fn to_compact_string(&self) -> String {
        self.iter()
            .map(|(face, stickers)| {
                let letters: String = stickers.iter().map(|c| c.letter()).collect();
                format!("{:<6} {letters}", face.to_string())
            })
            .join("\n")
    }
}

impl Index<Face> for FaceState {
    type Output = [Color; STICKERS_PER_FACE];

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face.index()]
    }
}
impl IndexMut<Face> for FaceState {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face.index()]
    }
}
impl Index<StickerPos> for FaceState {
    type Output = Color;

    fn index(&self, pos: StickerPos) -> &Self::Output {
        &self[pos.face][pos.index as usize]
    }
}
impl IndexMut<StickerPos> for FaceState {
    fn index_mut(&mut self, pos: StickerPos) -> &mut Self::Output {
        &mut self[pos.face][pos.index as usize]
    }
}
