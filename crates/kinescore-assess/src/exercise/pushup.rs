//! Push-up form analysis.

use kinescore_core::geometry::{angle_deg, midpoint, vertical_offset};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{classify_phase, ScoreSheet};
use crate::result::{ExerciseAnalysis, Metrics, Phase};

/// Joints the push-up analyzer requires.
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

/// Shoulder–hip–ankle angle below this breaks the straight body line.
const BODY_LINE_MIN_DEG: f32 = 160.0;

/// Analyzes one frame of a push-up.
///
/// A broken body line is flagged as either sagging or piking depending on
/// whether the mid-hip sits below or above the shoulder–ankle midpoint.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn analyze(skeleton: &Skeleton) -> PoseResult<ExerciseAnalysis> {
    skeleton.require(REQUIRED_JOINTS)?;

    let elbow_left = elbow_angle(skeleton, Side::Left)?;
    let elbow_right = elbow_angle(skeleton, Side::Right)?;
    let elbow_avg = (elbow_left + elbow_right) / 2.0;

    let mid_shoulder = skeleton.mid_shoulder()?;
    let mid_hip = skeleton.mid_hip()?;
    let mid_ankle = skeleton.mid_ankle()?;

    let body_line = angle_deg(&mid_shoulder, &mid_hip, &mid_ankle)?;
    // Positive when the hips hang below the shoulder-ankle midpoint.
    let hip_drop = vertical_offset(&mid_hip, &midpoint(&mid_shoulder, &mid_ankle));

    let phase = classify_phase(elbow_avg);

    let mut sheet = ScoreSheet::new();

    if body_line < BODY_LINE_MIN_DEG {
        if hip_drop > 0.0 {
            sheet.penalize(20, "Hips are sagging; squeeze your glutes and brace");
        } else {
            sheet.penalize(20, "Hips are piking up; lower them into one straight line");
        }
    }

    let mut metrics = Metrics::new();
    metrics.insert("elbow_angle_left".to_string(), elbow_left);
    metrics.insert("elbow_angle_right".to_string(), elbow_right);
    metrics.insert("elbow_angle".to_string(), elbow_avg);
    metrics.insert("body_line_angle".to_string(), body_line);
    metrics.insert("hip_drop".to_string(), hip_drop);

    let analysis = sheet.finish(
        phase,
        Phase::Down,
        "Strong straight body line, keep pressing",
        metrics,
    );
    debug!(score = analysis.score, phase = %analysis.phase, "push-up frame analyzed");
    Ok(analysis)
}

fn elbow_angle(skeleton: &Skeleton, side: Side) -> PoseResult<f32> {
    angle_deg(
        &skeleton.point(side.shoulder())?,
        &skeleton.point(side.elbow())?,
        &skeleton.point(side.wrist())?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinescore_core::Landmark;

    /// Bottom of a push-up with a straight shoulder-hip-ankle line.
    fn good_bottom_frame() -> Skeleton {
        let mut skeleton = Skeleton::new();
        for (side, z) in [(Side::Left, -0.05f32), (Side::Right, 0.05f32)] {
            skeleton.set(side.shoulder(), Landmark::new(0.30, 0.50, z));
            skeleton.set(side.elbow(), Landmark::new(0.42, 0.58, z));
            skeleton.set(side.wrist(), Landmark::new(0.30, 0.66, z));
            skeleton.set(side.hip(), Landmark::new(0.52, 0.56, z));
            skeleton.set(side.ankle(), Landmark::new(0.75, 0.62, z));
        }
        skeleton
    }

    #[test]
    fn straight_body_line_at_bottom_scores_clean() {
        let analysis = analyze(&good_bottom_frame()).unwrap();

        assert_eq!(analysis.phase, Phase::Down);
        assert_eq!(analysis.score, 100);
        assert!(analysis.is_correct);
        assert_eq!(
            analysis.feedback,
            vec!["Strong straight body line, keep pressing".to_string()]
        );
        assert!(analysis.metrics["body_line_angle"] >= BODY_LINE_MIN_DEG);
    }

    #[test]
    fn sagging_hips_are_flagged() {
        let mut skeleton = good_bottom_frame();
        for side in [Side::Left, Side::Right] {
            let hip = *skeleton.get(side.hip()).unwrap();
            skeleton.set(side.hip(), Landmark::new(hip.x, 0.66, hip.z));
        }

        let analysis = analyze(&skeleton).unwrap();
        assert_eq!(analysis.score, 80);
        assert!(analysis.feedback[0].contains("sagging"));
        assert!(analysis.metrics["hip_drop"] > 0.0);
    }

    #[test]
    fn piked_hips_are_flagged_distinctly() {
        let mut skeleton = good_bottom_frame();
        for side in [Side::Left, Side::Right] {
            let hip = *skeleton.get(side.hip()).unwrap();
            skeleton.set(side.hip(), Landmark::new(hip.x, 0.44, hip.z));
        }

        let analysis = analyze(&skeleton).unwrap();
        assert_eq!(analysis.score, 80);
        assert!(analysis.feedback[0].contains("piking"));
        assert!(analysis.metrics["hip_drop"] < 0.0);
    }

    #[test]
    fn lockout_frame_is_up() {
        let mut skeleton = good_bottom_frame();
        for (side, z) in [(Side::Left, -0.05f32), (Side::Right, 0.05f32)] {
            skeleton.set(side.shoulder(), Landmark::new(0.30, 0.35, z));
            skeleton.set(side.elbow(), Landmark::new(0.30, 0.50, z));
            skeleton.set(side.wrist(), Landmark::new(0.30, 0.65, z));
            skeleton.set(side.hip(), Landmark::new(0.52, 0.47, z));
            skeleton.set(side.ankle(), Landmark::new(0.75, 0.60, z));
        }

        let analysis = analyze(&skeleton).unwrap();
        assert_eq!(analysis.phase, Phase::Up);
        assert!(analysis.feedback.is_empty());
    }

    #[test]
    fn missing_wrists_are_rejected() {
        let mut skeleton = Skeleton::new();
        for &joint in REQUIRED_JOINTS {
            if joint != JointId::LeftWrist && joint != JointId::RightWrist {
                skeleton.set(joint, Landmark::new(0.5, 0.5, 0.0));
            }
        }

        let err = analyze(&skeleton).unwrap_err();
        assert_eq!(
            err,
            kinescore_core::PoseError::missing(vec![JointId::LeftWrist, JointId::RightWrist])
        );
    }
}
