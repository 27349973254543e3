//! Shoulder Mobility screen.
//!
//! The only screen scored by a relative distance instead of angles: the
//! gap between the two fists, divided by shoulder width. The positional
//! precondition (one wrist above its shoulder, the other below) must
//! hold or the score is capped at 1 regardless of the distance.

use std::collections::BTreeMap;

use kinescore_core::geometry::distance;
use kinescore_core::{JointId, PoseError, PoseResult, Side, Skeleton};
use tracing::debug;

use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Shoulder Mobility scorer requires.
pub const REQUIRED_JOINTS: &[JointId] = &[
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftWrist,
    JointId::RightWrist,
];

/// Relative wrist distance at or below this scores 3.
const SCORE_THREE_MAX: f32 = 1.0;

/// Relative wrist distance at or below this scores 2.
const SCORE_TWO_MAX: f32 = 1.5;

/// Tolerance on the ratio comparisons; a ratio that is exactly on a
/// boundary up to float rounding lands in the tier the protocol intends.
const RATIO_TOLERANCE: f32 = 1e-3;

/// Scores one frame of the Shoulder Mobility screen.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` when the shoulders coincide
/// and no width can be measured.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let left_shoulder = skeleton.point(Side::Left.shoulder())?;
    let right_shoulder = skeleton.point(Side::Right.shoulder())?;
    let left_wrist = skeleton.point(Side::Left.wrist())?;
    let right_wrist = skeleton.point(Side::Right.wrist())?;

    let shoulder_width = distance(&left_shoulder, &right_shoulder);
    if shoulder_width < kinescore_core::geometry::MIN_RAY_NORM {
        return Err(PoseError::degenerate("shoulder width"));
    }

    let wrist_distance = distance(&left_wrist, &right_wrist);
    let relative_distance = wrist_distance / shoulder_width;

    // One fist reaches over the shoulder, the other comes up the back.
    let left_above = left_wrist.y < left_shoulder.y;
    let right_above = right_wrist.y < right_shoulder.y;
    let hands_opposed = left_above != right_above;

    let mut details = BTreeMap::new();
    details.insert(
        "hands_opposed".to_string(),
        CriterionValue::Flag(hands_opposed),
    );
    details.insert(
        "relative_wrist_distance".to_string(),
        CriterionValue::Measure(relative_distance),
    );
    details.insert(
        "shoulder_width".to_string(),
        CriterionValue::Measure(shoulder_width),
    );

    let (score, feedback) = if !hands_opposed {
        (
            1,
            vec![
                "Hands were not opposed over and behind the shoulder; the reach cannot be measured"
                    .to_string(),
            ],
        )
    } else if relative_distance <= SCORE_THREE_MAX + RATIO_TOLERANCE {
        (
            3,
            vec!["Fists within one shoulder width of each other".to_string()],
        )
    } else if relative_distance <= SCORE_TWO_MAX + RATIO_TOLERANCE {
        (
            2,
            vec!["Fists within one and a half shoulder widths; keep working the reach".to_string()],
        )
    } else {
        (
            1,
            vec!["Fists remained further apart than one and a half shoulder widths".to_string()],
        )
    };

    debug!(score, relative_distance, "shoulder mobility screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinescore_core::Landmark;

    /// Shoulders 0.2 apart; wrists stacked vertically behind the back,
    /// `gap` apart, one above and one below its shoulder.
    fn reach_frame(gap: f32) -> Skeleton {
        let mut skeleton = Skeleton::new();
        skeleton.set(JointId::LeftShoulder, Landmark::new(0.40, 0.30, 0.0));
        skeleton.set(JointId::RightShoulder, Landmark::new(0.60, 0.30, 0.0));
        skeleton.set(JointId::LeftWrist, Landmark::new(0.50, 0.30 - gap / 2.0, 0.0));
        skeleton.set(JointId::RightWrist, Landmark::new(0.50, 0.30 + gap / 2.0, 0.0));
        skeleton
    }

    #[test]
    fn one_shoulder_width_scores_three() {
        let result = score(&reach_frame(0.2)).unwrap();

        assert_eq!(result.score, 3);
        let rel = result.measure("relative_wrist_distance").unwrap();
        assert!((rel - 1.0).abs() < 1e-2, "relative distance was {rel}");
    }

    #[test]
    fn one_point_four_widths_scores_two() {
        let result = score(&reach_frame(0.28)).unwrap();
        assert_eq!(result.score, 2);
    }

    #[test]
    fn one_point_six_widths_scores_one() {
        let result = score(&reach_frame(0.32)).unwrap();
        assert_eq!(result.score, 1);
        assert!(result.feedback[0].contains("further apart"));
    }

    #[test]
    fn unopposed_hands_cap_the_score_at_one() {
        let mut skeleton = reach_frame(0.1);
        // Both wrists below their shoulders: a close grip, but no reach.
        skeleton.set(JointId::LeftWrist, Landmark::new(0.50, 0.35, 0.0));
        skeleton.set(JointId::RightWrist, Landmark::new(0.50, 0.45, 0.0));

        let result = score(&skeleton).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.flag("hands_opposed"), Some(false));
        assert!(result.feedback[0].contains("not opposed"));
    }

    #[test]
    fn coincident_shoulders_are_degenerate() {
        let mut skeleton = reach_frame(0.2);
        skeleton.set(JointId::RightShoulder, Landmark::new(0.40, 0.30, 0.0));

        assert!(score(&skeleton).is_err());
    }
}
