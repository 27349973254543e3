//! Hurdle Step screen.
//!
//! The stepping side is the one whose knee sits higher in space (smaller
//! `y`), chosen once and threaded through the evaluation. Primary gate:
//! the stepping knee rises to hip level. Secondary criteria: torso stays
//! upright, the stance leg stays extended, and the stepping foot stays
//! inside the hip line.

use std::collections::BTreeMap;

use kinescore_core::geometry::{angle_deg, horizontal_offset};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{tier, Secondary, LEG_EXTENDED_DEG, TORSO_UPRIGHT_LIMIT};
use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Hurdle Step scorer requires.
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

/// The stepping knee may finish at most this far below its hip.
const STEP_HEIGHT_TOLERANCE: f32 = 0.05;

/// The stepping ankle may drift at most this far outside the hip line.
const FOOT_ALIGN_LIMIT: f32 = 0.15;

/// Scores one frame of the Hurdle Step screen.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let active = stepping_side(skeleton)?;
    let stance = active.opposite();

    let active_hip = skeleton.point(active.hip())?;
    let active_knee = skeleton.point(active.knee())?;
    let active_ankle = skeleton.point(active.ankle())?;

    // Positive once the stepping knee rises above its hip.
    let knee_raise = active_hip.y - active_knee.y;
    let knee_at_hip_level = knee_raise >= -STEP_HEIGHT_TOLERANCE;

    let torso_offset =
        horizontal_offset(&skeleton.mid_shoulder()?, &skeleton.mid_hip()?).abs();
    let torso_upright = torso_offset <= TORSO_UPRIGHT_LIMIT;

    let stance_knee_angle = angle_deg(
        &skeleton.point(stance.hip())?,
        &skeleton.point(stance.knee())?,
        &skeleton.point(stance.ankle())?,
    )?;
    let stance_extended = stance_knee_angle >= LEG_EXTENDED_DEG;

    let foot_offset = horizontal_offset(&active_ankle, &active_hip).abs();
    let foot_aligned = foot_offset <= FOOT_ALIGN_LIMIT;

    let mut details = BTreeMap::new();
    details.insert(
        "active_side_right".to_string(),
        CriterionValue::Flag(active == Side::Right),
    );
    details.insert("knee_raise".to_string(), CriterionValue::Measure(knee_raise));
    details.insert(
        "stance_knee_angle".to_string(),
        CriterionValue::Measure(stance_knee_angle),
    );
    details.insert(
        "torso_offset".to_string(),
        CriterionValue::Measure(torso_offset),
    );

    let (score, feedback) = tier(
        "knee_at_hip_level",
        knee_at_hip_level,
        "Stepping knee rose to hip height",
        "Stepping knee stayed below hip level; drive it higher over the hurdle",
        &[
            Secondary::new(
                "torso_upright",
                torso_upright,
                "Torso stayed tall over the hips",
                "Torso leaned away from the hips during the step",
            ),
            Secondary::new(
                "stance_extended",
                stance_extended,
                "Stance leg stayed long and stable",
                "Stance knee buckled during the step",
            ),
            Secondary::new(
                "foot_aligned",
                foot_aligned,
                "Stepping foot stayed in line with the hip",
                "Stepping foot swung outside the hip line",
            ),
        ],
        &mut details,
    );

    debug!(score, side = %active, "hurdle step screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

/// The side whose knee sits higher in space is the stepping side.
fn stepping_side(skeleton: &Skeleton) -> PoseResult<Side> {
    let left = skeleton.point(JointId::LeftKnee)?;
    let right = skeleton.point(JointId::RightKnee)?;
    Ok(if left.y < right.y { Side::Left } else { Side::Right })
}
