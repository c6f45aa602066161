use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{Move, MoveKey, Vertex, table};

/// Number of physical pieces, which is also the number of slots.
pub const PIECE_COUNT: usize = 14;

/// Fixed logical position in the puzzle's piece layout.
///
/// Edge slots are named by the two faces they border. Center slots sit
/// directly beneath the tip at the same vertex.
#[derive(
    Serialize, Deserialize, EnumIter, EnumCount, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[allow(missing_docs)]
pub enum Slot {
    TipU,
    TipL,
    TipR,
    TipB,
    EdgeFL,
    EdgeFR,
    EdgeLR,
    EdgeFB,
    EdgeLB,
    EdgeRB,
    CenterU,
    CenterL,
    CenterR,
    CenterB,
}

impl Slot {
    /// Returns the tip slot at a vertex.
    pub fn tip(v: Vertex) -> Self {
        match v {
            Vertex::U => Self::TipU,
            Vertex::L => Self::TipL,
            Vertex::R => Self::TipR,
            Vertex::B => Self::TipB,
        }
    }
    /// Returns the center slot beneath the tip at a vertex.
    pub fn center(v: Vertex) -> Self {
        match v {
            Vertex::U => Self::CenterU,
            Vertex::L => Self::CenterL,
            Vertex::R => Self::CenterR,
            Vertex::B => Self::CenterB,
        }
    }

    /// Returns the slots turned by a move: the tip slot for a tip move, or
    /// the tip, three edges, and center for a layer move.
    pub fn gripped_by(key: MoveKey) -> SmallVec<[Slot; 5]> {
        let v = key.vertex();
        let mut slots = SmallVec::new();
        slots.push(Self::tip(v));
        if let Some(edges) = table::lookup(key).slot_cycle() {
            slots.extend(edges);
            slots.push(Self::center(v));
        }
        slots
    }
}

const _: () = assert!(Slot::COUNT == PIECE_COUNT);

/// Opaque identifier of one physical piece.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Piece(pub u8);

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece#{}", self.0)
    }
}

/// Bijection from slots to the physical pieces currently occupying them.
///
/// Only layer moves change the mapping. Tip and center pieces rotate in place,
/// so the only bindings that ever move are the six edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PhysicalRegistry {
    pieces: [Piece; PIECE_COUNT],
}

impl Default for PhysicalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicalRegistry {
    /// Constructs the initial registry, in which each slot holds the piece
    /// with the same index.
    pub fn new() -> Self {
        Self {
            pieces: std::array::from_fn(|i| Piece(i as u8)),
        }
    }

    /// Returns the piece occupying `slot`.
    pub fn piece_at(&self, slot: Slot) -> Piece {
        self.pieces[slot as usize]
    }

    /// Returns the slot currently holding `piece`, or `None` if the piece
    /// does not exist.
    pub fn slot_of(&self, piece: Piece) -> Option<Slot> {
        Slot::iter().find(|&slot| self.piece_at(slot) == piece)
    }

    /// Returns the pieces to group for an animation of `key`.
    pub fn gripped_pieces(&self, key: MoveKey) -> SmallVec<[Piece; 5]> {
        Slot::gripped_by(key)
            .into_iter()
            .map(|slot| self.piece_at(slot))
            .collect()
    }

    /// Updates the registry for a completed move. Tip moves have no effect.
    pub fn update(&mut self, mv: Move) {
        let Some([a, b, c]) = table::lookup(mv.key).slot_cycle() else {
            return;
        };
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let old = self.pieces;
        if mv.inverse {
            self.pieces[a] = old[b];
            self.pieces[b] = old[c];
            self.pieces[c] = old[a];
        } else {
            self.pieces[b] = old[a];
            self.pieces[c] = old[b];
            self.pieces[a] = old[c];
        }
    }

    /// Returns whether every piece appears in exactly one slot.
    pub fn is_bijection(&self) -> bool {
        let mut seen = [false; PIECE_COUNT];
        self.pieces.iter().all(|&Piece(i)| {
            seen.get_mut(i as usize)
                .is_some_and(|seen| !std::mem::replace(seen, true))
        })
    }

    /// Iterates over every slot and its piece.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Piece)> + '_ {
        Slot::iter().map(|slot| (slot, self.piece_at(slot)))
    }
}
