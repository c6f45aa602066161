use cgmath::{InnerSpace, Vector3};
use pyraminx_core::Face;
use strum::IntoEnumIterator;

use crate::Axes;

/// Returns the face pointing most directly at the viewer.
///
/// `view_direction` is the direction the camera is looking. Ties go to the
/// face that comes first in [`Face`] enumeration order.
pub fn current_face(axes: &Axes, view_direction: Vector3<f32>) -> Face {
    let toward_viewer = -view_direction;
    let mut best = Face::Front;
    let mut best_score = f32::NEG_INFINITY;
    for face in Face::iter() {
        let score = axes.face_normal(face).dot(toward_viewer);
        if score > best_score {
            best = face;
            best_score = score;
        }
    }
    best
}
