//! # kinescore-assess
//!
//! Movement quality assessment over per-frame pose landmarks: continuous
//! exercise-form scoring with corrective feedback for free exercises
//! (squat, push-up, lunge) and discrete ordinal scoring (0-3) for the
//! seven screens of the Functional Movement Screen protocol.
//!
//! Every entry point is a pure function from a [`Skeleton`] to a result
//! value. The engine keeps no state between calls: the same skeleton
//! always produces the same output, and calls for different skeletons can
//! run concurrently with no coordination.
//!
//! ## Architecture
//!
//! ```text
//! landmarks in ──► geometry kernel ──► thresholds ──► structured result out
//!                 (kinescore-core)    (this crate)
//! ```
//!
//! - [`exercise`]: per-frame form analyzers producing an
//!   [`ExerciseAnalysis`] (score 0-100, phase, feedback, metrics).
//! - [`fms`]: one scorer per screen producing an [`FmsScoreResult`]
//!   (score 1-3 from geometry; 0 is reserved for caller-reported pain).
//! - [`registry`]: name/enum dispatch to the right analyzer.
//!
//! ## Example
//!
//! ```rust
//! use kinescore_assess::registry::{resolve_exercise, score_fms, FmsTest};
//! use kinescore_core::{JointId, Landmark, Skeleton};
//!
//! let analyzer = resolve_exercise("σκουάτ").expect("squat is supported");
//!
//! let mut skeleton = Skeleton::new();
//! for &joint in JointId::all() {
//!     skeleton.set(joint, Landmark::new(0.5, 0.1 + joint as u8 as f32 / 40.0, 0.0));
//! }
//!
//! let analysis = analyzer(&skeleton)?;
//! assert!(analysis.score <= 100);
//!
//! let screen = score_fms(FmsTest::DeepSquat, &skeleton, false)?;
//! assert!((1..=3).contains(&screen.score));
//! # Ok::<(), kinescore_core::PoseError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod exercise;
pub mod fms;
pub mod registry;
pub mod result;

pub use registry::{
    match_exercise, resolve_exercise, resolve_fms_test, score_fms, ExerciseAnalyzerFn,
    ExerciseKind, FmsScorerFn, FmsTest,
};
pub use result::{
    CriterionValue, ExerciseAnalysis, FmsScoreResult, Metrics, Phase, PASS_SCORE,
};

// Re-export the core types callers need to build input.
pub use kinescore_core::{JointId, Landmark, PoseError, PoseResult, Side, Skeleton};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use kinescore_assess::prelude::*;
/// ```
pub mod prelude {
    pub use crate::registry::{
        match_exercise, resolve_exercise, resolve_fms_test, score_fms, ExerciseKind, FmsTest,
    };
    pub use crate::result::{
        CriterionValue, ExerciseAnalysis, FmsScoreResult, Metrics, Phase,
    };
    pub use kinescore_core::prelude::*;
}
