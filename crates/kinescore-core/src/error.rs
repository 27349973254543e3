//! Error types for the kinescore engine.
//!
//! All failure modes of the engine are local, recoverable conditions: the
//! caller is expected to skip the offending frame and continue with the
//! next one. Nothing in this crate panics across the public boundary for
//! bad-but-well-typed input.

use thiserror::Error;

use crate::skeleton::JointId;

/// A specialized `Result` type for engine operations.
pub type PoseResult<T> = Result<T, PoseError>;

/// Errors produced while analyzing a skeleton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PoseError {
    /// The skeleton lacks one or more joints the analyzer requires.
    ///
    /// A missing joint is invalid input, never a default-zero landmark.
    #[error("skeleton is missing required joints: {}", format_joints(.joints))]
    MissingJoints {
        /// The required joints that were absent, in declaration order.
        joints: Vec<JointId>,
    },

    /// A zero-length ray would make an angle undefined.
    ///
    /// Raised when two of the three points of an angle coincide. Slight
    /// floating-point overshoot of the `acos` argument is clamped instead,
    /// per the numerical-robustness contract.
    #[error("degenerate geometry while computing {operation}: coincident points")]
    DegenerateGeometry {
        /// The operation that encountered the degenerate input.
        operation: &'static str,
    },

    /// A raw landmark index does not name a joint the engine consumes.
    #[error("landmark index {index} is not a supported joint id")]
    InvalidJointIndex {
        /// The unsupported raw index.
        index: u8,
    },
}

impl PoseError {
    /// Creates a missing-joints error from the absent joint ids.
    #[must_use]
    pub fn missing(joints: Vec<JointId>) -> Self {
        Self::MissingJoints { joints }
    }

    /// Creates a degenerate-geometry error for the named operation.
    #[must_use]
    pub fn degenerate(operation: &'static str) -> Self {
        Self::DegenerateGeometry { operation }
    }

    /// Returns `true` if the caller can recover by skipping the frame.
    ///
    /// Every engine error is frame-local; this exists so callers can treat
    /// the engine uniformly with error sources that are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::MissingJoints { .. }
            | Self::DegenerateGeometry { .. }
            | Self::InvalidJointIndex { .. } => true,
        }
    }
}

fn format_joints(joints: &[JointId]) -> String {
    let names: Vec<&str> = joints.iter().map(|j| j.name()).collect();
    names.join(", ")
}
