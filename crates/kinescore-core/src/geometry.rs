//! Geometry kernel: vector and angle primitives over 3D points.
//!
//! Every analyzer in the engine is a composition of these primitives over
//! different joint triples. Centralizing them guarantees identical
//! numerical behavior (including the clamp-before-acos guard) at every
//! call site instead of ad hoc per-call math.

use crate::error::{PoseError, PoseResult};

/// Rays shorter than this are treated as zero-length when forming angles.
pub const MIN_RAY_NORM: f32 = 1e-6;

/// A point in the normalized camera frame.
///
/// `x` and `y` are typically in `0..1` with `y` growing downward (image
/// convention); `z` is a relative depth estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (larger is lower on screen).
    pub y: f32,
    /// Relative depth.
    pub z: f32,
}

impl Point3 {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Self) -> Vector3 {
        Vector3 {
            x: other.x - self.x,
            y: other.y - self.y,
            z: other.z - self.z,
        }
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
    /// Depth component.
    pub z: f32,
}

impl Vector3 {
    /// Dot product with another vector.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.z
            .mul_add(other.z, self.x.mul_add(other.x, self.y * other.y))
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }
}

/// Euclidean distance between two points in 3D.
///
/// Symmetric: `distance(a, b) == distance(b, a)`; zero iff `a == b`.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f32 {
    a.vector_to(b).norm()
}

/// The angle at `vertex`, in degrees, formed by the rays toward `a` and `c`.
///
/// Computed as `acos(dot / (|va| * |vc|))` with the cosine clamped to
/// `[-1, 1]` to guard against floating-point overshoot. Symmetric under
/// swapping `a` and `c`.
///
/// # Errors
///
/// Returns [`PoseError::DegenerateGeometry`] when either ray is shorter
/// than [`MIN_RAY_NORM`], since the angle is undefined there.
pub fn angle_deg(a: &Point3, vertex: &Point3, c: &Point3) -> PoseResult<f32> {
    let va = vertex.vector_to(a);
    let vc = vertex.vector_to(c);

    let norms = va.norm() * vc.norm();
    if norms < MIN_RAY_NORM {
        return Err(PoseError::degenerate("angle"));
    }

    let cosine = (va.dot(&vc) / norms).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

/// Componentwise midpoint of two points.
///
/// Used to synthesize bilateral reference points such as mid-shoulder
/// and mid-hip.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    Point3 {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
        z: (a.z + b.z) / 2.0,
    }
}

/// Signed horizontal offset `a.x - b.x`.
#[must_use]
pub fn horizontal_offset(a: &Point3, b: &Point3) -> f32 {
    a.x - b.x
}

/// Signed vertical offset `a.y - b.y`; positive when `a` is lower on screen.
#[must_use]
pub fn vertical_offset(a: &Point3, b: &Point3) -> f32 {
    a.y - b.y
}
