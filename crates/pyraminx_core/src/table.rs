//! Static move table.
//!
//! Each move is a set of 3-cycles over sticker positions. A cycle `[a, b, c]`
//! turned forward sends the sticker at `a` to `b`, `b` to `c`, and `c` to `a`.
//! Forward is clockwise when viewed from the tip looking toward the center of
//! the puzzle.
//!
//! Sticker layout on each face (see [`Face::vertices()`]):
//!
//! ```text
//!         0
//!       1 2 3
//!     4 5 6 7 8
//! ```

use crate::{Face, MoveKey, Slot, StickerPos, Vertex};

/// Three positions rotated among themselves.
pub type Cycle = [StickerPos; 3];

/// Cycles specific to a layer move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayerCycles {
    /// Near and far stickers of the three edges bordering the layer.
    pub edges: [Cycle; 2],
    /// Center stickers of the three faces bordering the layer.
    pub center: Cycle,
    /// Edge slots whose physical pieces move, in the same direction as the
    /// sticker cycles.
    pub slots: [Slot; 3],
}

/// Full definition of a move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveDef {
    /// The three stickers of the tip piece.
    pub tip: Cycle,
    /// Additional cycles if this is a layer move.
    pub layer: Option<LayerCycles>,
}

impl MoveDef {
    /// Iterates over every sticker cycle of the move.
    pub fn sticker_cycles(&self) -> impl Iterator<Item = &Cycle> {
        let layer_cycles = self
            .layer
            .iter()
            .flat_map(|layer| layer.edges.iter().chain([&layer.center]));
        std::iter::once(&self.tip).chain(layer_cycles)
    }

    /// Returns the physical slot cycle, which is `None` for tip moves.
    pub fn slot_cycle(&self) -> Option<[Slot; 3]> {
        Some(self.layer?.slots)
    }
}

/// Returns the definition of a move.
pub fn lookup(key: MoveKey) -> MoveDef {
    match key {
        MoveKey::Tip(v) => MoveDef {
            tip: TIP_CYCLES[v as usize],
            layer: None,
        },
        MoveKey::Layer(v) => MoveDef {
            tip: TIP_CYCLES[v as usize],
            layer: Some(LAYER_CYCLES[v as usize]),
        },
    }
}

/// Returns the definition of the move with the given symbol, or `None` if the
/// symbol is not one of `ulrbULRB`.
pub fn lookup_symbol(symbol: char) -> Option<MoveDef> {
    MoveKey::from_symbol(symbol).map(lookup)
}

const fn s(face: Face, index: u8) -> StickerPos {
    StickerPos::new(face, index)
}

use Face::{Bottom as D, Front as F, Left as L, Right as R};

/// Tip cycles, indexed by [`Vertex`].
const TIP_CYCLES: [Cycle; 4] = [
    [s(F, 0), s(L, 0), s(R, 0)], // U
    [s(F, 4), s(D, 8), s(L, 8)], // L
    [s(F, 8), s(R, 4), s(D, 4)], // R
    [s(R, 8), s(L, 4), s(D, 0)], // B
];

/// Layer cycles, indexed by [`Vertex`].
const LAYER_CYCLES: [LayerCycles; 4] = [
    // U
    LayerCycles {
        edges: [
            [s(F, 1), s(L, 1), s(R, 1)],
            [s(F, 3), s(L, 3), s(R, 3)],
        ],
        center: [s(F, 2), s(L, 2), s(R, 2)],
        slots: [Slot::EdgeFL, Slot::EdgeLR, Slot::EdgeFR],
    },
    // L
    LayerCycles {
        edges: [
            [s(F, 1), s(D, 6), s(L, 6)],
            [s(F, 6), s(D, 3), s(L, 3)],
        ],
        center: [s(F, 5), s(D, 7), s(L, 7)],
        slots: [Slot::EdgeFL, Slot::EdgeFB, Slot::EdgeLB],
    },
    // R
    LayerCycles {
        edges: [
            [s(F, 3), s(R, 6), s(D, 6)],
            [s(F, 6), s(R, 1), s(D, 1)],
        ],
        center: [s(F, 7), s(R, 5), s(D, 5)],
        slots: [Slot::EdgeFR, Slot::EdgeRB, Slot::EdgeFB],
    },
    // B
    LayerCycles {
        edges: [
            [s(R, 3), s(L, 6), s(D, 1)],
            [s(R, 6), s(L, 1), s(D, 3)],
        ],
        center: [s(R, 7), s(L, 5), s(D, 2)],
        slots: [Slot::EdgeLR, Slot::EdgeLB, Slot::EdgeRB],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_no_sticker_repeats_within_move() {
        for key in MoveKey::ALL {
            let def = lookup(key);
            let mut seen = HashSet::new();
            for pos in def.sticker_cycles().flatten() {
                assert!(pos.index < 9, "{pos} out of range");
                assert!(seen.insert(*pos), "{pos} appears twice in {key}");
            }
            let expected = if key.is_layer() { 12 } else { 3 };
            assert_eq!(expected, seen.len());
        }
    }

    #[test]
    fn test_tip_cycles_stay_on_their_vertex() {
        for v in Vertex::iter() {
            let tip = lookup(MoveKey::Tip(v)).tip;
            for pos in tip {
                let corner = match pos.index {
                    0 => 0,
                    4 => 1,
                    8 => 2,
                    i => panic!("{pos} is not a tip sticker (index {i})"),
                };
                assert_eq!(v, pos.face.vertices()[corner]);
            }
            let faces: Vec<Face> = v.faces().collect();
            assert!(tip.iter().all(|pos| faces.contains(&pos.face)));
        }
    }

    #[test]
    fn test_center_cycle_faces_match_tip_faces() {
        for v in Vertex::iter() {
            let def = lookup(MoveKey::Layer(v));
            let Some(layer) = def.layer else {
                panic!("missing layer cycles for {v}");
            };
            for (tip, center) in def.tip.iter().zip(&layer.center) {
                assert_eq!(tip.face, center.face);
            }
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert!(lookup_symbol('x').is_none());
        assert!(lookup_symbol('F').is_none());
        assert!(lookup_symbol('u').is_some());
    }
}
