//! Deep Squat screen.
//!
//! Primary gate: the hips descend below knee level. Secondary criteria:
//! heels stay grounded, the torso stays upright, and the knees track
//! over the toes.

use std::collections::BTreeMap;

use kinescore_core::geometry::{horizontal_offset, vertical_offset};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{tier, Secondary, TORSO_UPRIGHT_LIMIT};
use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Deep Squat scorer requires.
pub const REQUIRED_JOINTS: &[JointId] = &[
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftHip,
    JointId::RightHip,
    JointId::LeftKnee,
    JointId::RightKnee,
    JointId::LeftAnkle,
    JointId::RightAnkle,
    JointId::LeftHeel,
    JointId::RightHeel,
];

/// A heel rising more than this above its ankle counts as lifted.
const HEEL_LIFT_TOLERANCE: f32 = 0.03;

/// Knee may drift at most this far past the ankle, in normalized units.
const KNEE_TRACK_LIMIT: f32 = 0.1;

/// Scores one frame of the Deep Squat screen.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let mid_hip = skeleton.mid_hip()?;
    let mid_knee = skeleton.mid_knee()?;
    let mid_shoulder = skeleton.mid_shoulder()?;

    // Positive once the hips sink below the knee line.
    let hip_depth = vertical_offset(&mid_hip, &mid_knee);
    let depth_reached = hip_depth > 0.0;

    let heels_grounded = [Side::Left, Side::Right].iter().all(|side| {
        heel_lift(skeleton, *side).map_or(false, |lift| lift <= HEEL_LIFT_TOLERANCE)
    });

    let torso_offset = horizontal_offset(&mid_shoulder, &mid_hip).abs();
    let torso_upright = torso_offset <= TORSO_UPRIGHT_LIMIT;

    let knee_offset_left = knee_offset(skeleton, Side::Left)?;
    let knee_offset_right = knee_offset(skeleton, Side::Right)?;
    let knees_track =
        knee_offset_left <= KNEE_TRACK_LIMIT && knee_offset_right <= KNEE_TRACK_LIMIT;

    let mut details = BTreeMap::new();
    details.insert("hip_depth".to_string(), CriterionValue::Measure(hip_depth));
    details.insert(
        "torso_offset".to_string(),
        CriterionValue::Measure(torso_offset),
    );
    details.insert(
        "knee_offset_left".to_string(),
        CriterionValue::Measure(knee_offset_left),
    );
    details.insert(
        "knee_offset_right".to_string(),
        CriterionValue::Measure(knee_offset_right),
    );

    let (score, feedback) = tier(
        "depth_below_knees",
        depth_reached,
        "Full squat depth with hips below the knees",
        "Hips did not descend below knee level; squat deeper or retest with the heel board",
        &[
            Secondary::new(
                "heels_grounded",
                heels_grounded,
                "Heels stayed on the ground",
                "Heels lifted off the ground",
            ),
            Secondary::new(
                "torso_upright",
                torso_upright,
                "Torso stayed upright",
                "Torso drifted forward of the hips",
            ),
            Secondary::new(
                "knees_track",
                knees_track,
                "Knees tracked over the toes",
                "Knees drifted off the line of the toes",
            ),
        ],
        &mut details,
    );

    debug!(score, "deep squat screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

/// How far the heel has risen above its ankle; positive means lifted.
fn heel_lift(skeleton: &Skeleton, side: Side) -> Option<f32> {
    let heel = skeleton.get(side.heel())?;
    let ankle = skeleton.get(side.ankle())?;
    Some(ankle.y - heel.y)
}

fn knee_offset(skeleton: &Skeleton, side: Side) -> PoseResult<f32> {
    Ok(horizontal_offset(
        &skeleton.point(side.knee())?,
        &skeleton.point(side.ankle())?,
    )
    .abs())
}
