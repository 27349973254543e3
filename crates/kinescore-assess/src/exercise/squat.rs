//! Squat form analysis.

use kinescore_core::geometry::{angle_deg, horizontal_offset};
use kinescore_core::{JointId, PoseResult, Side, Skeleton};
use tracing::debug;

use super::{classify_phase, ScoreSheet};
use crate::result::{ExerciseAnalysis, Metrics, Phase};

/// Joints the squat analyzer requires.
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

/// Knee may drift at most this far past the ankle, in normalized units.
const KNEE_OVER_TOE_LIMIT: f32 = 0.1;

/// Hip angle below this while in the `Down` phase reads as a forward lean.
const FORWARD_LEAN_HIP_DEG: f32 = 70.0;

/// Left/right knee angles may differ by at most this many degrees.
const SYMMETRY_LIMIT_DEG: f32 = 15.0;

/// Analyzes one frame of a squat.
///
/// # Errors
///
/// Returns [`kinescore_core::PoseError::MissingJoints`] when a required
/// joint is absent, or `DegenerateGeometry` for coincident landmarks.
pub fn analyze(skeleton: &Skeleton) -> PoseResult<ExerciseAnalysis> {
    skeleton.require(REQUIRED_JOINTS)?;

    let knee_left = knee_angle(skeleton, Side::Left)?;
    let knee_right = knee_angle(skeleton, Side::Right)?;
    let knee_avg = (knee_left + knee_right) / 2.0;

    let hip_angle = angle_deg(
        &skeleton.mid_shoulder()?,
        &skeleton.mid_hip()?,
        &skeleton.mid_knee()?,
    )?;

    let offset_left = horizontal_offset(
        &skeleton.point(JointId::LeftKnee)?,
        &skeleton.point(JointId::LeftAnkle)?,
    )
    .abs();
    let offset_right = horizontal_offset(
        &skeleton.point(JointId::RightKnee)?,
        &skeleton.point(JointId::RightAnkle)?,
    )
    .abs();

    let knee_delta = (knee_left - knee_right).abs();
    let phase = classify_phase(knee_avg);

    let mut sheet = ScoreSheet::new();

    if offset_left > KNEE_OVER_TOE_LIMIT || offset_right > KNEE_OVER_TOE_LIMIT {
        sheet.penalize(15, "Keep your knees stacked over your ankles");
    }
    if phase == Phase::Down && hip_angle < FORWARD_LEAN_HIP_DEG {
        sheet.penalize(20, "You are leaning too far forward; lift your chest");
    }
    if knee_delta > SYMMETRY_LIMIT_DEG {
        sheet.penalize(10, "Keep your weight even between both legs");
    }

    let mut metrics = Metrics::new();
    metrics.insert("knee_angle_left".to_string(), knee_left);
    metrics.insert("knee_angle_right".to_string(), knee_right);
    metrics.insert("knee_angle".to_string(), knee_avg);
    metrics.insert("hip_angle".to_string(), hip_angle);
    metrics.insert("knee_offset_left".to_string(), offset_left);
    metrics.insert("knee_offset_right".to_string(), offset_right);
    metrics.insert("knee_angle_delta".to_string(), knee_delta);

    let analysis = sheet.finish(phase, Phase::Down, "Great squat depth, keep it up", metrics);
    debug!(score = analysis.score, phase = %analysis.phase, "squat frame analyzed");
    Ok(analysis)
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

    /// A deep squat with vertical torso, knees over ankles, and symmetric
    /// knee angles of about 88 degrees.
    fn good_deep_squat() -> Skeleton {
        let mut skeleton = Skeleton::new();
        for (side, z) in [(Side::Left, -0.06f32), (Side::Right, 0.06f32)] {
            skeleton.set(side.shoulder(), Landmark::new(0.27, 0.35, z));
            skeleton.set(side.hip(), Landmark::new(0.2701, 0.6263, z));
            skeleton.set(side.knee(), Landmark::new(0.45, 0.62, z));
            skeleton.set(side.ankle(), Landmark::new(0.45, 0.80, z));
        }
        skeleton
    }

    fn standing() -> Skeleton {
        let mut skeleton = Skeleton::new();
        for (side, z) in [(Side::Left, -0.06f32), (Side::Right, 0.06f32)] {
            skeleton.set(side.shoulder(), Landmark::new(0.45, 0.25, z));
            skeleton.set(side.hip(), Landmark::new(0.45, 0.50, z));
            skeleton.set(side.knee(), Landmark::new(0.45, 0.67, z));
            skeleton.set(side.ankle(), Landmark::new(0.45, 0.84, z));
        }
        skeleton
    }

    #[test]
    fn good_deep_squat_scores_high() {
        let analysis = analyze(&good_deep_squat()).unwrap();

        assert_eq!(analysis.phase, Phase::Down);
        assert!(analysis.is_correct);
        assert!(analysis.score >= 90);
        assert_eq!(
            analysis.feedback,
            vec!["Great squat depth, keep it up".to_string()]
        );

        let knee = analysis.metrics["knee_angle"];
        assert!((85.0..=90.0).contains(&knee), "knee angle was {knee}");
    }

    #[test]
    fn standing_frame_is_up_with_no_feedback() {
        let analysis = analyze(&standing()).unwrap();

        assert_eq!(analysis.phase, Phase::Up);
        assert_eq!(analysis.score, 100);
        assert!(analysis.feedback.is_empty());
    }

    #[test]
    fn knees_past_toes_are_penalized() {
        let mut skeleton = good_deep_squat();
        for side in [Side::Left, Side::Right] {
            let knee = *skeleton.get(side.knee()).unwrap();
            skeleton.set(side.knee(), Landmark::new(knee.x + 0.15, knee.y, knee.z));
        }

        let analysis = analyze(&skeleton).unwrap();
        assert_eq!(analysis.score, 85);
        assert!(analysis.feedback[0].contains("knees stacked"));
    }

    #[test]
    fn forward_lean_in_down_phase_is_penalized() {
        let mut skeleton = good_deep_squat();
        // Collapse the chest toward the knees: shoulders travel forward
        // past the hips, closing the hip angle well under 70 degrees.
        for side in [Side::Left, Side::Right] {
            let z = skeleton.get(side.shoulder()).unwrap().z;
            skeleton.set(side.shoulder(), Landmark::new(0.52, 0.55, z));
        }

        let analysis = analyze(&skeleton).unwrap();
        assert!(analysis.metrics["hip_angle"] < FORWARD_LEAN_HIP_DEG);
        assert!(analysis
            .feedback
            .iter()
            .any(|f| f.contains("leaning too far forward")));
    }

    #[test]
    fn asymmetric_knees_are_penalized() {
        let mut skeleton = good_deep_squat();
        // Straighten only the right leg.
        skeleton.set(Side::Right.hip(), Landmark::new(0.45, 0.44, 0.06));

        let analysis = analyze(&skeleton).unwrap();
        assert!(analysis.metrics["knee_angle_delta"] > SYMMETRY_LIMIT_DEG);
        assert!(analysis
            .feedback
            .iter()
            .any(|f| f.contains("weight even")));
    }

    #[test]
    fn missing_joint_is_rejected() {
        let mut skeleton = good_deep_squat();
        skeleton = {
            let mut rebuilt = Skeleton::new();
            for &joint in REQUIRED_JOINTS {
                if joint != JointId::LeftAnkle {
                    rebuilt.set(joint, *skeleton.get(joint).unwrap());
                }
            }
            rebuilt
        };

        let err = analyze(&skeleton).unwrap_err();
        assert_eq!(
            err,
            kinescore_core::PoseError::missing(vec![JointId::LeftAnkle])
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        let skeleton = good_deep_squat();
        assert_eq!(analyze(&skeleton).unwrap(), analyze(&skeleton).unwrap());
    }
}
