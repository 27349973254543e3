//! Rotary Stability screen.
//!
//! Arm extension and leg extension are tested independently per side and
//! then combined: a same-side pair is the ipsilateral pattern and is
//! eligible for a 3, an opposite-side pair is contralateral and is capped
//! at 2, and no pair at all fails the primary gate. A single frame cannot
//! show both full extension and the elbow-to-knee touch of the return
//! movement, so the scorer grades the extension position and reports the
//! active elbow-knee distance for the caller's cross-frame touch check.

use std::collections::BTreeMap;

use kinescore_core::geometry::{angle_deg, distance};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Rotary Stability scorer requires.
pub const REQUIRED_JOINTS: &[JointId] = &[
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftElbow,
    JointId::RightElbow,
    JointId::LeftWrist,
    JointId::RightWrist,
    JointId::LeftHip,
    JointId::RightHip,
    JointId::LeftKnee,
    JointId::RightKnee,
    JointId::LeftAnkle,
    JointId::RightAnkle,
];

/// A limb counts as extended above this joint angle.
const LIMB_EXTENDED_DEG: f32 = 140.0;

/// A reaching wrist or ankle may sit at most this far below its root joint.
const LIMB_RAISE_TOLERANCE: f32 = 0.1;

/// Shoulders and hips may differ at most this much in height for a
/// neutral spine in the quadruped position.
const SPINE_NEUTRAL_LIMIT: f32 = 0.1;

/// Extended elbow and knee may deviate at most this far from the torso line.
const LIMB_LEVEL_LIMIT: f32 = 0.1;

/// How the extended arm and leg combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimbPattern {
    /// Arm and leg extended on the same side; eligible for a 3.
    Ipsilateral(Side),
    /// Arm and leg extended on opposite sides; capped at 2.
    Contralateral {
        /// Side of the extended arm.
        arm: Side,
        /// Side of the extended leg.
        leg: Side,
    },
}

/// Scores one frame of the Rotary Stability screen.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let arm_left = arm_extended(skeleton, Side::Left)?;
    let arm_right = arm_extended(skeleton, Side::Right)?;
    let leg_left = leg_extended(skeleton, Side::Left)?;
    let leg_right = leg_extended(skeleton, Side::Right)?;

    let mut details = BTreeMap::new();
    details.insert("arm_extended_left".to_string(), CriterionValue::Flag(arm_left));
    details.insert(
        "arm_extended_right".to_string(),
        CriterionValue::Flag(arm_right),
    );
    details.insert("leg_extended_left".to_string(), CriterionValue::Flag(leg_left));
    details.insert(
        "leg_extended_right".to_string(),
        CriterionValue::Flag(leg_right),
    );

    let arm_side = pick_side(skeleton, arm_left, arm_right, Side::wrist)?;
    let leg_side = pick_side(skeleton, leg_left, leg_right, Side::ankle)?;

    let pattern = match (arm_side, leg_side) {
        (Some(arm), Some(leg)) if arm == leg => Some(LimbPattern::Ipsilateral(arm)),
        (Some(arm), Some(leg)) => Some(LimbPattern::Contralateral { arm, leg }),
        _ => None,
    };

    let Some(pattern) = pattern else {
        details.insert("pattern_formed".to_string(), CriterionValue::Flag(false));
        debug!(score = 1, "rotary stability screen scored");
        return Ok(FmsScoreResult {
            score: 1,
            feedback: vec![
                "No extended arm-leg pair was formed; reach one arm and the opposite or same-side leg long"
                    .to_string(),
            ],
            details,
        });
    };
    details.insert("pattern_formed".to_string(), CriterionValue::Flag(true));

    let mid_shoulder = skeleton.mid_shoulder()?;
    let mid_hip = skeleton.mid_hip()?;

    let spine_tilt = (mid_shoulder.y - mid_hip.y).abs();
    let spine_neutral = spine_tilt <= SPINE_NEUTRAL_LIMIT;

    let (arm, leg, ipsilateral) = match pattern {
        LimbPattern::Ipsilateral(side) => (side, side, true),
        LimbPattern::Contralateral { arm, leg } => (arm, leg, false),
    };
    details.insert("ipsilateral".to_string(), CriterionValue::Flag(ipsilateral));

    let elbow = skeleton.point(arm.elbow())?;
    let knee = skeleton.point(leg.knee())?;

    // Torso line height at each end; extended limbs should stay on it.
    let limbs_level = (elbow.y - mid_shoulder.y).abs() <= LIMB_LEVEL_LIMIT
        && (knee.y - mid_hip.y).abs() <= LIMB_LEVEL_LIMIT;

    let elbow_knee_distance = distance(&elbow, &knee);

    details.insert("spine_neutral".to_string(), CriterionValue::Flag(spine_neutral));
    details.insert("limbs_level".to_string(), CriterionValue::Flag(limbs_level));
    details.insert(
        "elbow_knee_distance".to_string(),
        CriterionValue::Measure(elbow_knee_distance),
    );

    let (score, feedback) = if ipsilateral {
        if spine_neutral && limbs_level {
            (
                3,
                vec![
                    "Same-side arm and leg extended together".to_string(),
                    "Spine stayed neutral over the base".to_string(),
                    "Extended limbs held the torso line".to_string(),
                ],
            )
        } else {
            let mut feedback = Vec::new();
            if !spine_neutral {
                feedback.push("Spine tilted while the limbs were extended".to_string());
            }
            if !limbs_level {
                feedback.push("Extended limbs drifted off the torso line".to_string());
            }
            (2, feedback)
        }
    } else {
        let mut feedback =
            vec!["Diagonal arm-leg pattern; the same-side pattern is required for a 3".to_string()];
        if !spine_neutral {
            feedback.push("Spine tilted while the limbs were extended".to_string());
        }
        if !limbs_level {
            feedback.push("Extended limbs drifted off the torso line".to_string());
        }
        (2, feedback)
    };

    debug!(score, ipsilateral, "rotary stability screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

/// Arm reaches long: elbow near extension with the wrist up at shoulder
/// height, which excludes the planted support arm.
fn arm_extended(skeleton: &Skeleton, side: Side) -> PoseResult<bool> {
    let shoulder = skeleton.point(side.shoulder())?;
    let elbow = skeleton.point(side.elbow())?;
    let wrist = skeleton.point(side.wrist())?;

    let angle = angle_deg(&shoulder, &elbow, &wrist)?;
    Ok(angle >= LIMB_EXTENDED_DEG && wrist.y <= shoulder.y + LIMB_RAISE_TOLERANCE)
}

/// Leg reaches long: knee near extension with the ankle up at hip height,
/// which excludes the kneeling support leg.
fn leg_extended(skeleton: &Skeleton, side: Side) -> PoseResult<bool> {
    let hip = skeleton.point(side.hip())?;
    let knee = skeleton.point(side.knee())?;
    let ankle = skeleton.point(side.ankle())?;

    let angle = angle_deg(&hip, &knee, &ankle)?;
    Ok(angle >= LIMB_EXTENDED_DEG && ankle.y <= hip.y + LIMB_RAISE_TOLERANCE)
}

/// Resolves which side's limb is the reaching one. When both sides pass
/// the extension test, the higher end joint wins, deterministically.
fn pick_side(
    skeleton: &Skeleton,
    left: bool,
    right: bool,
    end_joint: fn(Side) -> JointId,
) -> PoseResult<Option<Side>> {
    match (left, right) {
        (false, false) => Ok(None),
        (true, false) => Ok(Some(Side::Left)),
        (false, true) => Ok(Some(Side::Right)),
        (true, true) => {
            let left_end = skeleton.point(end_joint(Side::Left))?;
            let right_end = skeleton.point(end_joint(Side::Right))?;
            Ok(Some(if left_end.y <= right_end.y {
                Side::Left
            } else {
                Side::Right
            }))
        }
    }
}
