//! Active Straight-Leg Raise screen.
//!
//! The subject lies supine, so "how far the leg travelled" is measured as
//! a projection along the body axis toward the head, which works for
//! either lying orientation in the frame. The raised side is the one
//! whose ankle sits higher in space (smaller `y`). Primary gate: the
//! raised ankle passes the down-leg knee line. Secondary criteria: it
//! also passes mid-thigh, the down leg stays extended, and the raised
//! knee stays straight.

use std::collections::BTreeMap;

use kinescore_core::geometry::angle_deg;
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{tier, Secondary, LEG_EXTENDED_DEG};
use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Active Straight-Leg Raise scorer requires.
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

/// Scores one frame of the Active Straight-Leg Raise screen.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let active = raised_side(skeleton)?;
    let down = active.opposite();

    let active_ankle = skeleton.point(active.ankle())?;
    let down_hip = skeleton.point(down.hip())?;
    let down_knee = skeleton.point(down.knee())?;

    // Signed head direction along x, from the hips toward the shoulders.
    let head_dir = skeleton.mid_shoulder()?.x - skeleton.mid_hip()?.x;

    let passes_knee = (active_ankle.x - down_knee.x) * head_dir > 0.0;

    let mid_thigh_x = (down_hip.x + down_knee.x) / 2.0;
    let passes_mid_thigh = (active_ankle.x - mid_thigh_x) * head_dir > 0.0;

    let down_knee_angle = knee_angle(skeleton, down)?;
    let down_leg_flat = down_knee_angle >= LEG_EXTENDED_DEG;

    let raised_knee_angle = knee_angle(skeleton, active)?;
    let raised_knee_straight = raised_knee_angle >= LEG_EXTENDED_DEG;

    let mut details = BTreeMap::new();
    details.insert(
        "active_side_right".to_string(),
        CriterionValue::Flag(active == Side::Right),
    );
    details.insert(
        "down_knee_angle".to_string(),
        CriterionValue::Measure(down_knee_angle),
    );
    details.insert(
        "raised_knee_angle".to_string(),
        CriterionValue::Measure(raised_knee_angle),
    );

    let (score, feedback) = tier(
        "passes_knee",
        passes_knee,
        "Raised ankle travelled past the down-leg knee",
        "Raised leg did not clear the down-leg knee line",
        &[
            Secondary::new(
                "passes_mid_thigh",
                passes_mid_thigh,
                "Raised ankle cleared mid-thigh",
                "Raised ankle stopped between knee and mid-thigh",
            ),
            Secondary::new(
                "down_leg_flat",
                down_leg_flat,
                "Down leg stayed flat on the table",
                "Down knee bent as the raise progressed",
            ),
            Secondary::new(
                "raised_knee_straight",
                raised_knee_straight,
                "Raised knee stayed straight",
                "Raised knee bent during the raise",
            ),
        ],
        &mut details,
    );

    debug!(score, side = %active, "leg raise screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

/// The side whose ankle sits higher in space is the raised side.
fn raised_side(skeleton: &Skeleton) -> PoseResult<Side> {
    let left = skeleton.point(JointId::LeftAnkle)?;
    let right = skeleton.point(JointId::RightAnkle)?;
    Ok(if left.y < right.y { Side::Left } else { Side::Right })
}

fn knee_angle(skeleton: &Skeleton, side: Side) -> PoseResult<f32> {
    angle_deg(
        &skeleton.point(side.hip())?,
        &skeleton.point(side.knee())?,
        &skeleton.point(side.ankle())?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinescore_core::Landmark;

    /// Supine with the head at small x; right leg raised vertically.
    fn vertical_raise() -> Skeleton {
        let mut skeleton = Skeleton::new();
        for (side, z) in [(Side::Left, -0.04f32), (Side::Right, 0.04f32)] {
            skeleton.set(side.shoulder(), Landmark::new(0.20, 0.70, z));
            skeleton.set(side.hip(), Landmark::new(0.50, 0.70, z));
        }
        // Down (left) leg flat along the table.
        skeleton.set(JointId::LeftKnee, Landmark::new(0.68, 0.70, -0.04));
        skeleton.set(JointId::LeftAnkle, Landmark::new(0.85, 0.70, -0.04));
        // Raised (right) leg straight up.
        skeleton.set(JointId::RightKnee, Landmark::new(0.50, 0.52, 0.04));
        skeleton.set(JointId::RightAnkle, Landmark::new(0.50, 0.35, 0.04));
        skeleton
    }

    #[test]
    fn vertical_raise_scores_three() {
        let result = score(&vertical_raise()).unwrap();

        assert_eq!(result.score, 3);
        assert_eq!(result.flag("active_side_right"), Some(true));
        assert_eq!(result.flag("passes_mid_thigh"), Some(true));
    }

    #[test]
    fn partial_raise_scores_two() {
        let mut skeleton = vertical_raise();
        // Leg raised about halfway: ankle between knee and mid-thigh.
        skeleton.set(JointId::RightKnee, Landmark::new(0.58, 0.60, 0.04));
        skeleton.set(JointId::RightAnkle, Landmark::new(0.65, 0.51, 0.04));

        let result = score(&skeleton).unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.flag("passes_knee"), Some(true));
        assert_eq!(result.flag("passes_mid_thigh"), Some(false));
    }

    #[test]
    fn minimal_raise_scores_exactly_one() {
        let mut skeleton = vertical_raise();
        // Ankle never clears the down-leg knee line.
        skeleton.set(JointId::RightKnee, Landmark::new(0.66, 0.64, 0.04));
        skeleton.set(JointId::RightAnkle, Landmark::new(0.80, 0.60, 0.04));

        let result = score(&skeleton).unwrap();
        assert_eq!(result.score, 1);
        assert!(result.feedback[0].contains("did not clear"));
    }

    #[test]
    fn bent_down_leg_drops_to_two() {
        let mut skeleton = vertical_raise();
        // The down knee hitches up off the table.
        skeleton.set(JointId::LeftKnee, Landmark::new(0.64, 0.60, -0.04));

        let result = score(&skeleton).unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.flag("down_leg_flat"), Some(false));
    }

    #[test]
    fn works_mirrored_with_head_at_large_x() {
        // Mirror the whole pose about x = 0.5.
        let mut skeleton = Skeleton::new();
        for (side, z) in [(Side::Left, -0.04f32), (Side::Right, 0.04f32)] {
            skeleton.set(side.shoulder(), Landmark::new(0.80, 0.70, z));
            skeleton.set(side.hip(), Landmark::new(0.50, 0.70, z));
        }
        skeleton.set(JointId::LeftKnee, Landmark::new(0.32, 0.70, -0.04));
        skeleton.set(JointId::LeftAnkle, Landmark::new(0.15, 0.70, -0.04));
        skeleton.set(JointId::RightKnee, Landmark::new(0.50, 0.52, 0.04));
        skeleton.set(JointId::RightAnkle, Landmark::new(0.50, 0.35, 0.04));

        let result = score(&skeleton).unwrap();
        assert_eq!(result.score, 3);
    }
}
