//! Trunk Stability Push-Up screen.
//!
//! Primary gate: the press is completed with the elbows extended.
//! Secondary criteria: the body rises as one unit (straight
//! shoulder-hip-ankle line, no hip lag) with the hands under the
//! shoulders.

use std::collections::BTreeMap;

use kinescore_core::geometry::{angle_deg, horizontal_offset, midpoint, vertical_offset};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{tier, Secondary};
use crate::result::{CriterionValue, FmsScoreResult};

/// Joints the Trunk Stability Push-Up scorer requires.
pub const REQUIRED_JOINTS: &[JointId] = &[
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftElbow,
    JointId::RightElbow,
    JointId::LeftWrist,
    JointId::RightWrist,
    JointId::LeftHip,
    JointId::RightHip,
    JointId::LeftAnkle,
    JointId::RightAnkle,
];

/// Elbow angle at or above this counts as a completed press.
const PRESS_COMPLETE_DEG: f32 = 150.0;

/// Shoulder-hip-ankle line at or above this is one straight unit.
const BODY_LINE_MIN_DEG: f32 = 160.0;

/// The hips may lag at most this far below the shoulder-ankle midpoint.
const HIP_LAG_LIMIT: f32 = 0.05;

/// Hands may sit at most this far outside the shoulder line.
const HAND_PLACEMENT_LIMIT: f32 = 0.15;

/// Scores one frame of the Trunk Stability Push-Up screen.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn score(skeleton: &Skeleton) -> PoseResult<FmsScoreResult> {
    skeleton.require(REQUIRED_JOINTS)?;

    let elbow_left = elbow_angle(skeleton, Side::Left)?;
    let elbow_right = elbow_angle(skeleton, Side::Right)?;
    let elbow_avg = (elbow_left + elbow_right) / 2.0;
    let press_complete = elbow_avg >= PRESS_COMPLETE_DEG;

    let mid_shoulder = skeleton.mid_shoulder()?;
    let mid_hip = skeleton.mid_hip()?;
    let mid_ankle = skeleton.mid_ankle()?;

    let body_line_angle = angle_deg(&mid_shoulder, &mid_hip, &mid_ankle)?;
    let body_straight = body_line_angle >= BODY_LINE_MIN_DEG;

    let hip_lag = vertical_offset(&mid_hip, &midpoint(&mid_shoulder, &mid_ankle));
    let no_hip_lag = hip_lag <= HIP_LAG_LIMIT;

    let hands_under_shoulders = [Side::Left, Side::Right].iter().all(|&side| {
        hand_offset(skeleton, side).map_or(false, |offset| offset <= HAND_PLACEMENT_LIMIT)
    });

    let mut details = BTreeMap::new();
    details.insert(
        "elbow_angle".to_string(),
        CriterionValue::Measure(elbow_avg),
    );
    details.insert(
        "body_line_angle".to_string(),
        CriterionValue::Measure(body_line_angle),
    );
    details.insert("hip_lag".to_string(), CriterionValue::Measure(hip_lag));

    let (score, feedback) = tier(
        "press_complete",
        press_complete,
        "Press completed with the elbows locked out",
        "Press was not completed; the elbows never reached extension",
        &[
            Secondary::new(
                "body_straight",
                body_straight,
                "Body rose as one straight unit",
                "Body line broke between shoulders, hips, and ankles",
            ),
            Secondary::new(
                "no_hip_lag",
                no_hip_lag,
                "Hips kept pace with the shoulders",
                "Hips lagged behind the press",
            ),
            Secondary::new(
                "hands_under_shoulders",
                hands_under_shoulders,
                "Hands stayed under the shoulders",
                "Hands drifted outside the shoulder line",
            ),
        ],
        &mut details,
    );

    debug!(score, "trunk stability push-up screen scored");
    Ok(FmsScoreResult {
        score,
        feedback,
        details,
    })
}

fn elbow_angle(skeleton: &Skeleton, side: Side) -> PoseResult<f32> {
    angle_deg(
        &skeleton.point(side.shoulder())?,
        &skeleton.point(side.elbow())?,
        &skeleton.point(side.wrist())?,
    )
}

fn hand_offset(skeleton: &Skeleton, side: Side) -> Option<f32> {
    let wrist = skeleton.get(side.wrist())?;
    let shoulder = skeleton.get(side.shoulder())?;
    Some(horizontal_offset(&wrist.point(), &shoulder.point()).abs())
}
