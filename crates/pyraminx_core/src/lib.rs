//! Pyraminx puzzle engine: sticker state, move algebra, physical piece
//! tracking, notation, and scramble generation.
//!
//! The engine has no timing or rendering concerns. See
//! `pyraminx_view` for the animated move scheduler.

mod color;
mod face;
mod moves;
pub mod notation;
mod pace;
mod permute;
mod registry;
mod scramble;
mod snapshot;
mod state;
pub mod table;

#[cfg(test)]
mod tests;

pub use color::Color;
pub use face::{Face, FaceState, STICKERS_PER_FACE, StickerPos, Vertex};
pub use moves::{Move, MoveKey};
pub use notation::{Modifier, NotationError, Token};
pub use pace::SolvePace;
pub use registry::{PIECE_COUNT, PhysicalRegistry, Piece, Slot};
pub use scramble::{MAIN_SCRAMBLE_LENGTH, Scramble};
pub use snapshot::{Snapshot, SnapshotError};
pub use state::PuzzleState;
