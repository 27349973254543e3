//! Lunge form analysis.

use kinescore_core::geometry::{angle_deg, horizontal_offset};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{classify_phase, ScoreSheet};
use crate::result::{ExerciseAnalysis, Metrics, Phase};

/// Joints the lunge analyzer requires.
pub const REQUIRED_JOINTS: &[JointId] = &[
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftHip,
    JointId::RightHip,
    JointId::LeftKnee,
    JointId::RightKnee,
    JointId::LeftAnkle,
    JointId::RightAnkle,
];

/// Target corridor for the front-knee angle, centered on 90 degrees.
const FRONT_KNEE_MIN_DEG: f32 = 80.0;
const FRONT_KNEE_MAX_DEG: f32 = 110.0;

/// Back knee straighter than this means the back leg is not bending.
const BACK_KNEE_MAX_DEG: f32 = 120.0;

/// Torso may drift at most this far off the hips, in normalized units.
const TORSO_LEAN_LIMIT: f32 = 0.1;

/// Analyzes one frame of a lunge.
///
/// The forward leg is the one with the lower knee position (larger `y` in
/// image coordinates); that selection happens once and the rest of the
/// analysis is phrased in terms of front and back sides.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn analyze(skeleton: &Skeleton) -> PoseResult<ExerciseAnalysis> {
    skeleton.require(REQUIRED_JOINTS)?;

    let front = front_side(skeleton)?;
    let back = front.opposite();

    let front_knee = knee_angle(skeleton, front)?;
    let back_knee = knee_angle(skeleton, back)?;
    let torso_offset = horizontal_offset(&skeleton.mid_shoulder()?, &skeleton.mid_hip()?).abs();

    let phase = classify_phase(front_knee);

    let mut sheet = ScoreSheet::new();

    if front_knee < FRONT_KNEE_MIN_DEG {
        sheet.penalize(15, "Front knee is collapsing; ease back toward a right angle");
    }
    if front_knee > FRONT_KNEE_MAX_DEG {
        sheet.penalize(15, "Sink deeper until the front knee nears a right angle");
    }
    if back_knee > BACK_KNEE_MAX_DEG {
        sheet.penalize(15, "Bend the back knee further toward the floor");
    }
    if torso_offset > TORSO_LEAN_LIMIT {
        sheet.penalize(15, "Keep the torso stacked over the hips");
    }

    let mut metrics = Metrics::new();
    metrics.insert("front_knee_angle".to_string(), front_knee);
    metrics.insert("back_knee_angle".to_string(), back_knee);
    metrics.insert("torso_offset".to_string(), torso_offset);
    metrics.insert(
        "front_side_right".to_string(),
        if front == Side::Right { 1.0 } else { 0.0 },
    );

    let analysis = sheet.finish(phase, Phase::Down, "Solid lunge depth and alignment", metrics);
    debug!(score = analysis.score, front = %front, "lunge frame analyzed");
    Ok(analysis)
}

/// The leg whose knee sits lower on screen leads the lunge.
fn front_side(skeleton: &Skeleton) -> PoseResult<Side> {
    let left = skeleton.point(JointId::LeftKnee)?;
    let right = skeleton.point(JointId::RightKnee)?;
    Ok(if left.y > right.y { Side::Left } else { Side::Right })
}

fn knee_angle(skeleton: &Skeleton, side: Side) -> PoseResult<f32> {
    angle_deg(
        &skeleton.point(side.hip())?,
        &skeleton.point(side.knee())?,
        &skeleton.point(side.ankle())?,
    )
}
