//! Translation of raw keyboard and pointer input into moves.

use cgmath::{EuclideanSpace, InnerSpace, Point2, Point3, Vector2};
use pyraminx_core::{Face, Move, MoveKey, Vertex};
use smallvec::SmallVec;

use crate::Axes;

/// Number of pixels that the pointer must be dragged to twist the puzzle.
pub const DRAG_THRESHOLD: f32 = 15.0;

/// Minimum alignment between the drag direction and a rotation tangent for
/// the drag to count as a move.
pub const SWIPE_ACCURACY: f32 = 0.75;

/// Returns the move for a key press, or `None` if the key is not bound.
///
/// Lowercase `u l r b` turn tips and uppercase `U L R B` turn layers. The
/// inverse modifier (Ctrl or Cmd) turns counterclockwise.
pub fn keyboard_move(key: char, inverse_modifier: bool) -> Option<Move> {
    let key = MoveKey::from_symbol(key)?;
    Some(Move::new(key, inverse_modifier))
}

/// What the pointer pressed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GrabTarget {
    /// A sticker on a face. Dragging turns a layer.
    Sticker(Face),
    /// A tip piece. Dragging turns only that tip.
    Tip(Vertex),
}

impl GrabTarget {
    /// Returns the vertices whose axes the drag may turn around.
    pub fn allowed_vertices(self) -> SmallVec<[Vertex; 3]> {
        match self {
            Self::Sticker(face) => face.vertices().into_iter().collect(),
            Self::Tip(v) => smallvec::smallvec![v],
        }
    }

    fn move_key(self, v: Vertex) -> MoveKey {
        match self {
            Self::Sticker(_) => MoveKey::Layer(v),
            Self::Tip(_) => MoveKey::Tip(v),
        }
    }
}

/// Pointer drag in progress. Produces at most one move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    target: GrabTarget,
    /// Screen position where the drag started.
    start: Point2<f32>,
    /// Point on the puzzle that was pressed, relative to the puzzle center.
    hit_point: Point3<f32>,
    triggered: bool,
}

impl DragGesture {
    /// Starts a drag.
    pub fn new(target: GrabTarget, start: Point2<f32>, hit_point: Point3<f32>) -> Self {
        Self {
            target,
            start,
            hit_point,
            triggered: false,
        }
    }

    /// Returns whether this drag has already produced a move.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Updates the drag with a new pointer position and returns a move if the
    /// drag has become decisive.
    ///
    /// `project` maps a point on the puzzle to the same screen space as the
    /// pointer positions.
    pub fn update(
        &mut self,
        pointer: Point2<f32>,
        axes: &Axes,
        project: impl Fn(Point3<f32>) -> Point2<f32>,
    ) -> Option<Move> {
        if self.triggered {
            return None;
        }
        let drag = pointer - self.start;
        if drag.magnitude() < DRAG_THRESHOLD {
            return None;
        }
        let drag = drag.normalize();

        let screen_origin = project(self.hit_point);
        let mut best: Option<(Vertex, f32)> = None;
        for v in self.target.allowed_vertices() {
            let tangent = axes[v].cross(self.hit_point.to_vec());
            let screen_tangent: Vector2<f32> = project(self.hit_point + tangent) - screen_origin;
            if screen_tangent.magnitude2() == 0.0 {
                continue;
            }
            let dot = drag.dot(screen_tangent.normalize());
            if best.is_none_or(|(_, best_dot)| dot.abs() > best_dot.abs()) {
                best = Some((v, dot));
            }
        }

        let (v, dot) = best?;
        if dot.abs() <= SWIPE_ACCURACY {
            return None;
        }
        self.triggered = true;
        // Dragging along the tangent turns counterclockwise around the axis.
        Some(Move::new(self.target.move_key(v), dot > 0.0))
    }
}
