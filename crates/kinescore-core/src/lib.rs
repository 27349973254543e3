//! # kinescore-core
//!
//! Core landmark model, skeleton taxonomy, and geometry kernel for the
//! kinescore movement quality assessment engine.
//!
//! This crate provides the foundational building blocks consumed by the
//! assessment crate:
//!
//! - **Data model**: [`Landmark`], [`Skeleton`], [`JointId`], and [`Side`]
//!   for representing one frame of pose-estimation output.
//!
//! - **Geometry kernel**: [`geometry::distance`], [`geometry::angle_deg`],
//!   and [`geometry::midpoint`], the three primitives every analyzer is
//!   composed of, with a single clamp-before-acos guard shared by all
//!   call sites.
//!
//! - **Error types**: [`PoseError`] / [`PoseResult`] for the engine's
//!   frame-local, recoverable failure modes.
//!
//! Everything here is pure and stateless: landmarks are immutable input,
//! every value is created fresh per call, and no type retains skeleton
//! history. Calls for different skeletons are trivially parallelizable.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use kinescore_core::{geometry, JointId, Landmark, Skeleton};
//!
//! let skeleton = Skeleton::from_landmarks([
//!     (JointId::LeftHip, Landmark::new(0.30, 0.62, 0.0)),
//!     (JointId::LeftKnee, Landmark::new(0.45, 0.62, 0.0)),
//!     (JointId::LeftAnkle, Landmark::new(0.45, 0.80, 0.0)),
//! ]);
//!
//! let knee = geometry::angle_deg(
//!     &skeleton.point(JointId::LeftHip)?,
//!     &skeleton.point(JointId::LeftKnee)?,
//!     &skeleton.point(JointId::LeftAnkle)?,
//! )?;
//! assert!((knee - 90.0).abs() < 0.1);
//! # Ok::<(), kinescore_core::PoseError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod geometry;
pub mod skeleton;

pub use error::{PoseError, PoseResult};
pub use geometry::{Point3, Vector3};
pub use skeleton::{JointId, Landmark, Side, Skeleton, LANDMARK_COUNT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use kinescore_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{PoseError, PoseResult};
    pub use crate::geometry::{self, Point3, Vector3};
    pub use crate::skeleton::{JointId, Landmark, Side, Skeleton};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn landmark_count_matches_pose_model() {
        assert_eq!(LANDMARK_COUNT, 33);
        assert!(JointId::all().len() <= LANDMARK_COUNT);
    }
}
