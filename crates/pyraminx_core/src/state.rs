use crate::{FaceState, Move, PhysicalRegistry, Snapshot, SnapshotError};

/// Sticker colors and physical piece bindings, which always change together.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    faces: FaceState,
    registry: PhysicalRegistry,
}

impl PuzzleState {
    /// Constructs a solved puzzle with the default coloring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sticker colors.
    pub fn faces(&self) -> &FaceState {
        &self.faces
    }
    /// Returns the slot-to-piece bindings.
    pub fn registry(&self) -> &PhysicalRegistry {
        &self.registry
    }

    /// Commits a completed move: sticker colors first, then piece bindings.
    pub fn do_move(&mut self, mv: Move) {
        log::trace!("committing move {mv}");
        self.faces.apply(mv);
        self.registry.update(mv);
    }

    /// Returns whether every face is a single color.
    pub fn is_solved(&self) -> bool {
        self.faces.is_solved()
    }

    /// Replaces the sticker colors with an imported snapshot.
    ///
    /// Piece bindings are left alone because a snapshot carries no piece
    /// identity. On error the state is unchanged.
    pub fn import(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let faces = snapshot.to_face_state().inspect_err(|e| {
            log::warn!("rejected snapshot: {e}");
        })?;
        log::info!("imported snapshot (solved: {})", faces.is_solved());
        self.faces = faces;
        Ok(())
    }

    /// Returns an owned copy of the sticker colors.
    pub fn export(&self) -> Snapshot {
        Snapshot::from(&self.faces)
    }
}
