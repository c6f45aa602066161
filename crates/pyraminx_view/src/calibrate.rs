//! Rotation axes derived from the four tip markers of a loaded model.

use std::ops::Index;

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};
use float_ord::FloatOrd;
use pyraminx_core::{Face, Vertex};
use smallvec::SmallVec;

/// Minimum squared distance between a tip marker and the centroid.
const MIN_AXIS_LENGTH_SQUARED: f32 = 1e-10;

/// Marker positions of a regular tetrahedron in the canonical orientation:
/// one tip straight up, the back tip away from the viewer (negative Z), and
/// the left and right tips toward the viewer. Listed in [`Vertex`] order.
pub const CANONICAL_MARKERS: [[f32; 3]; 4] = [
    [0.0, 1.0, 0.0],
    [-0.816_496_6, -0.333_333_34, 0.471_404_52],
    [0.816_496_6, -0.333_333_34, 0.471_404_52],
    [0.0, -0.333_333_34, -0.942_809_04],
];

/// Unit rotation axis for each vertex, pointing outward from the center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Axes([Vector3<f32>; 4]);

impl Index<Vertex> for Axes {
    type Output = Vector3<f32>;

    fn index(&self, v: Vertex) -> &Self::Output {
        &self.0[v as usize]
    }
}

impl Axes {
    /// Returns the approximate outward normal of a face: the normalized sum
    /// of the axes of its three vertices.
    pub fn face_normal(&self, face: Face) -> Vector3<f32> {
        face.vertices()
            .into_iter()
            .map(|v| self[v])
            .fold(Vector3::new(0.0, 0.0, 0.0), |a, b| a + b)
            .normalize()
    }
}

/// Result of calibrating against a set of markers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibration {
    /// Rotation axes.
    pub axes: Axes,
    /// Centroid of the markers, in the model's original coordinates.
    pub center: Point3<f32>,
    /// Translation that moves the centroid to the origin.
    pub recenter_offset: Vector3<f32>,
}

impl Calibration {
    /// Calibrates against [`CANONICAL_MARKERS`], for use when no model is
    /// loaded.
    pub fn canonical() -> Self {
        let markers = CANONICAL_MARKERS.map(Point3::from);
        match calibrate(&markers) {
            Ok(calibration) => calibration,
            Err(e) => {
                log::error!("error calibrating against canonical markers: {e}");
                Self {
                    axes: Axes(markers.map(|p| p.to_vec().normalize())),
                    center: Point3::origin(),
                    recenter_offset: Vector3::new(0.0, 0.0, 0.0),
                }
            }
        }
    }
}

/// Identifies which marker belongs to which tip and computes the axes.
///
/// The up tip has the greatest Y coordinate. Of the rest, the back tip has the
/// least Z coordinate. The remaining two are left and right by X coordinate.
/// This assumes the puzzle is presented roughly in the canonical orientation.
///
/// Only the first four markers are used.
pub fn calibrate(markers: &[Point3<f32>]) -> Result<Calibration, CalibrationError> {
    let markers = match markers {
        [a, b, c, d, rest @ ..] => {
            if !rest.is_empty() {
                log::warn!("ignoring {} extra calibration markers", rest.len());
            }
            [*a, *b, *c, *d]
        }
        _ => {
            return Err(CalibrationError::TooFewMarkers {
                found: markers.len(),
            });
        }
    };

    let center = Point3::centroid(&markers);

    let mut remaining: SmallVec<[Point3<f32>; 4]> = markers.into_iter().collect();
    let up = take_extreme(&mut remaining, |p| FloatOrd(p.y));
    let back = take_extreme(&mut remaining, |p| FloatOrd(-p.z));
    let right = take_extreme(&mut remaining, |p| FloatOrd(p.x));
    let left = take_extreme(&mut remaining, |p| FloatOrd(p.x));

    let mut axes = [Vector3::new(0.0, 0.0, 0.0); 4];
    for (v, tip) in [(Vertex::U, up), (Vertex::L, left), (Vertex::R, right), (Vertex::B, back)] {
        let Some(tip) = tip else {
            return Err(CalibrationError::Degenerate(v));
        };
        let offset = tip - center;
        if !(offset.magnitude2() >= MIN_AXIS_LENGTH_SQUARED) {
            return Err(CalibrationError::Degenerate(v));
        }
        axes[v as usize] = offset.normalize();
    }

    log::info!("calibrated axes around center {center:?}");
    Ok(Calibration {
        axes: Axes(axes),
        center,
        recenter_offset: -center.to_vec(),
    })
}

/// Removes and returns the point with the greatest key. Ties go to the
/// earliest point.
fn take_extreme<K: Ord>(
    points: &mut SmallVec<[Point3<f32>; 4]>,
    key: impl Fn(&Point3<f32>) -> K,
) -> Option<Point3<f32>> {
    let (index, _) = points
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, p)| key(p))?;
    Some(points.remove(index))
}

/// Error produced when calibration fails. The puzzle cannot animate moves
/// until this is resolved.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    /// Fewer than four markers were supplied.
    #[error("need 4 calibration markers; found {found}")]
    TooFewMarkers {
        /// Number of markers supplied.
        found: usize,
    },
    /// A tip marker coincides with the centroid or is not finite.
    #[error("calibration marker for tip {0} is degenerate")]
    Degenerate(Vertex),
}
