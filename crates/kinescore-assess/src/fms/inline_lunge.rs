//! Inline Lunge screen.
//!
//! The front side is the one whose knee sits higher in space (smaller
//! `y`), since the back knee is descending toward the board. Primary gate:
//! the back knee reaches ground level. Secondary criteria: torso stays
//! upright, the front knee tracks over its ankle, and the two feet stay
//! depth-aligned on the board.

use std::collections::BTreeMap;

use kinescore_core::geometry::horizontal_offset;
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{tier, Secondary, TORSO_UPRIGHT_LIMIT};
use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Inline Lunge scorer requires.
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

/// The back knee must finish within this of the ground line.
const KNEE_GROUND_TOLERANCE: f32 = 0.1;

/// Front knee may drift at most this far off its ankle.
const KNEE_TRACK_LIMIT: f32 = 0.1;

/// The two ankles may differ at most this much in depth.
const FOOT_DEPTH_LIMIT: f32 = 0.1;

/// Scores one frame of the Inline Lunge screen.
///
/// The ground line is approximated by the lower of the two ankles, which
/// keeps the scorer free of floor calibration.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let front = front_side(skeleton)?;
    let back = front.opposite();

    let front_knee = skeleton.point(front.knee())?;
    let front_ankle = skeleton.point(front.ankle())?;
    let back_knee = skeleton.point(back.knee())?;
    let back_ankle = skeleton.point(back.ankle())?;

    let ground = front_ankle.y.max(back_ankle.y);
    // How far the back knee stopped short of the ground line.
    let knee_clearance = ground - back_knee.y;
    let back_knee_down = knee_clearance <= KNEE_GROUND_TOLERANCE;

    let torso_offset =
        horizontal_offset(&skeleton.mid_shoulder()?, &skeleton.mid_hip()?).abs();
    let torso_upright = torso_offset <= TORSO_UPRIGHT_LIMIT;

    let knee_track_offset = horizontal_offset(&front_knee, &front_ankle).abs();
    let front_knee_tracks = knee_track_offset <= KNEE_TRACK_LIMIT;

    let foot_depth_offset = (front_ankle.z - back_ankle.z).abs();
    let feet_aligned = foot_depth_offset <= FOOT_DEPTH_LIMIT;

    let mut details = BTreeMap::new();
    details.insert(
        "front_side_right".to_string(),
        CriterionValue::Flag(front == Side::Right),
    );
    details.insert(
        "knee_clearance".to_string(),
        CriterionValue::Measure(knee_clearance),
    );
    details.insert(
        "torso_offset".to_string(),
        CriterionValue::Measure(torso_offset),
    );
    details.insert(
        "foot_depth_offset".to_string(),
        CriterionValue::Measure(foot_depth_offset),
    );

    let (score, feedback) = tier(
        "back_knee_down",
        back_knee_down,
        "Back knee lowered all the way to the board",
        "Back knee stopped short of the board; lower it under control",
        &[
            Secondary::new(
                "torso_upright",
                torso_upright,
                "Torso stayed vertical through the descent",
                "Torso tipped away from vertical during the descent",
            ),
            Secondary::new(
                "front_knee_tracks",
                front_knee_tracks,
                "Front knee stayed over the front foot",
                "Front knee wandered off the front foot",
            ),
            Secondary::new(
                "feet_aligned",
                feet_aligned,
                "Both feet stayed on the board line",
                "Feet slipped off a single line",
            ),
        ],
        &mut details,
    );

    debug!(score, front = %front, "inline lunge screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

/// The side whose knee sits higher in space leads the lunge.
fn front_side(skeleton: &Skeleton) -> PoseResult<Side> {
    let left = skeleton.point(JointId::LeftKnee)?;
    let right = skeleton.point(JointId::RightKnee)?;
    Ok(if left.y < right.y { Side::Left } else { Side::Right })
}
