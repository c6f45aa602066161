use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Color, Face, FaceState, STICKERS_PER_FACE};

/// Serializable copy of all sticker colors, keyed by face name.
///
/// Unlike [`FaceState`], a snapshot may be incomplete or contain
/// [`Color::Unset`]; [`Snapshot::to_face_state()`] validates it.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Snapshot(pub BTreeMap<Face, Vec<Color>>);

impl From<&FaceState> for Snapshot {
    fn from(state: &FaceState) -> Self {
        Self(
            state
                .iter()
                .map(|(face, stickers)| (face, stickers.to_vec()))
                .collect(),
        )
    }
}

impl Snapshot {
    /// Validates the snapshot and converts it to a committed state.
    pub fn to_face_state(&self) -> Result<FaceState, SnapshotError> {
        let mut state = FaceState::solved();
        for face in Face::iter() {
            let stickers = self.0.get(&face).ok_or(SnapshotError::MissingFace(face))?;
            if stickers.len() != STICKERS_PER_FACE {
                return Err(SnapshotError::WrongLength {
                    face,
                    len: stickers.len(),
                });
            }
            if let Some(index) = stickers.iter().position(|c| !c.is_committed()) {
                return Err(SnapshotError::UnsetColor { face, index });
            }
            state[face].copy_from_slice(stickers);
        }
        Ok(state)
    }
}

/// Error produced when a snapshot cannot be imported.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SnapshotError {
    #[error("face {0} is missing")]
    MissingFace(Face),
    #[error("face {face} has {len} stickers; expected {STICKERS_PER_FACE}")]
    WrongLength { face: Face, len: usize },
    #[error("sticker {index} on face {face} has no color")]
    UnsetColor { face: Face, index: usize },
}
