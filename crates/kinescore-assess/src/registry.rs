//! Analyzer registry: resolves exercise names and FMS test identifiers
//! to their analyzer functions.
//!
//! The free-exercise side matches normalized, case-insensitive substrings
//! against a keyword table covering both the Greek and English vocabulary
//! of the coaching app. Keywords are data, not code: adding an exercise
//! means adding a table row, and matching is first-match-wins in table
//! order. No keyword match is a `None`, not an error, so callers can
//! distinguish "unsupported exercise" from a bad skeleton.
//!
//! The FMS side is a closed seven-variant enum with a total match, with
//! no strings involved.

use kinescore_core::{PoseResult, Skeleton};
use tracing::debug;

use crate::exercise::{lunge, pushup, squat};
use crate::fms::{
    deep_squat, hurdle_step, inline_lunge, leg_raise, rotary_stability, shoulder_mobility,
    trunk_pushup,
};
use crate::result::{ExerciseAnalysis, FmsScoreResult};

/// Analyzer entry point for a free exercise.
pub type ExerciseAnalyzerFn = fn(&Skeleton) -> PoseResult<ExerciseAnalysis>;

/// Scorer entry point for an FMS screen.
pub type FmsScorerFn = fn(&Skeleton) -> PoseResult<FmsScoreResult>;

/// The free exercises the engine can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseKind {
    /// Bodyweight or loaded squat.
    Squat,
    /// Push-up.
    PushUp,
    /// Forward lunge.
    Lunge,
}

impl ExerciseKind {
    /// The analyzer implementing this exercise.
    #[must_use]
    pub fn analyzer(self) -> ExerciseAnalyzerFn {
        match self {
            Self::Squat => squat::analyze,
            Self::PushUp => pushup::analyze,
            Self::Lunge => lunge::analyze,
        }
    }

    /// Returns the exercise name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::PushUp => "push-up",
            Self::Lunge => "lunge",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword table for free-exercise dispatch, in match priority order.
///
/// Keywords are stored lowercase; Greek entries appear both accented and
/// unaccented because `str::to_lowercase` keeps accents while user input
/// often drops them.
const EXERCISE_KEYWORDS: &[(ExerciseKind, &[&str])] = &[
    (
        ExerciseKind::Squat,
        &["squat", "σκουάτ", "σκουατ", "κάθισμα", "καθισμα"],
    ),
    (
        ExerciseKind::PushUp,
        &["push-up", "pushup", "push up", "κάμψεις", "καμψεις", "κάμψη", "καμψη"],
    ),
    (
        ExerciseKind::Lunge,
        &["lunge", "προβολή", "προβολη", "προβολές", "προβολες"],
    ),
];

/// Resolves a free-text exercise name to its kind.
///
/// Returns `None` when no keyword matches; unsupported is not an error.
#[must_use]
pub fn match_exercise(name: &str) -> Option<ExerciseKind> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    for (kind, keywords) in EXERCISE_KEYWORDS {
        if keywords.iter().any(|k| normalized.contains(k)) {
            debug!(exercise = %kind, "resolved exercise name");
            return Some(*kind);
        }
    }

    debug!(name, "no analyzer for exercise name");
    None
}

/// Resolves a free-text exercise name to its analyzer function.
///
/// Returns `None` (never a default analyzer) when no keyword matches.
#[must_use]
pub fn resolve_exercise(name: &str) -> Option<ExerciseAnalyzerFn> {
    match_exercise(name).map(ExerciseKind::analyzer)
}

/// The seven screens of the Functional Movement Screen protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FmsTest {
    /// Deep Squat
    DeepSquat,
    /// Hurdle Step
    HurdleStep,
    /// Inline Lunge
    InlineLunge,
    /// Shoulder Mobility
    ShoulderMobility,
    /// Active Straight-Leg Raise
    ActiveStraightLegRaise,
    /// Trunk Stability Push-Up
    TrunkStabilityPushUp,
    /// Rotary Stability
    RotaryStability,
}

impl FmsTest {
    /// Returns all seven screens in protocol order.
    #[must_use]
    pub fn all() -> &'static [Self; 7] {
        &[
            Self::DeepSquat,
            Self::HurdleStep,
            Self::InlineLunge,
            Self::ShoulderMobility,
            Self::ActiveStraightLegRaise,
            Self::TrunkStabilityPushUp,
            Self::RotaryStability,
        ]
    }

    /// Returns the screen name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeepSquat => "deep_squat",
            Self::HurdleStep => "hurdle_step",
            Self::InlineLunge => "inline_lunge",
            Self::ShoulderMobility => "shoulder_mobility",
            Self::ActiveStraightLegRaise => "active_straight_leg_raise",
            Self::TrunkStabilityPushUp => "trunk_stability_push_up",
            Self::RotaryStability => "rotary_stability",
        }
    }

    /// The scorer implementing this screen. Total over the enum.
    #[must_use]
    pub fn scorer(self) -> FmsScorerFn {
        match self {
            Self::DeepSquat => deep_squat::score,
            Self::HurdleStep => hurdle_step::score,
            Self::InlineLunge => inline_lunge::score,
            Self::ShoulderMobility => shoulder_mobility::score,
            Self::ActiveStraightLegRaise => leg_raise::score,
            Self::TrunkStabilityPushUp => trunk_pushup::score,
            Self::RotaryStability => rotary_stability::score,
        }
    }
}

impl std::fmt::Display for FmsTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves an FMS test to its scorer function.
#[must_use]
pub fn resolve_fms_test(test: FmsTest) -> FmsScorerFn {
    test.scorer()
}

/// Scores one FMS screen, applying the caller-reported pain downgrade.
///
/// Geometry alone never yields a 0; `pain_reported` is the protocol's
/// escape hatch for it.
///
/// # Errors
///
/// Propagates the scorer's [`kinescore_core::PoseError`].
pub fn score_fms(
    test: FmsTest,
    skeleton: &Skeleton,
    pain_reported: bool,
) -> PoseResult<FmsScoreResult> {
    let result = test.scorer()(skeleton)?;
    Ok(if pain_reported {
        result.with_pain_reported()
    } else {
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_and_greek_names_resolve_to_squat() {
        assert_eq!(match_exercise("squat"), Some(ExerciseKind::Squat));
        assert_eq!(match_exercise("Back Squat 3x5"), Some(ExerciseKind::Squat));
        assert_eq!(match_exercise("ΣκουΑτ"), Some(ExerciseKind::Squat));
        assert_eq!(match_exercise("  σκουάτ με μπάρα "), Some(ExerciseKind::Squat));
    }

    #[test]
    fn pushup_and_lunge_vocabulary() {
        assert_eq!(match_exercise("Push-Up"), Some(ExerciseKind::PushUp));
        assert_eq!(match_exercise("pushups"), Some(ExerciseKind::PushUp));
        assert_eq!(match_exercise("Κάμψεις"), Some(ExerciseKind::PushUp));
        assert_eq!(match_exercise("lunges"), Some(ExerciseKind::Lunge));
        assert_eq!(match_exercise("Προβολές"), Some(ExerciseKind::Lunge));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert_eq!(match_exercise("xyz"), None);
        assert_eq!(match_exercise(""), None);
        assert_eq!(match_exercise("   "), None);
        assert!(resolve_exercise("deadlift").is_none());
    }

    #[test]
    fn resolved_analyzer_is_the_squat_analyzer() {
        use kinescore_core::{JointId, Landmark, Skeleton};

        // Every joint present, standing tall.
        let mut skeleton = Skeleton::new();
        for &joint in JointId::all() {
            skeleton.set(joint, Landmark::new(0.5, 0.1 + joint as u8 as f32 / 40.0, 0.0));
        }

        let resolved = resolve_exercise("ΣκουΑτ").unwrap();
        let analysis = resolved(&skeleton).unwrap();

        // Squat-specific metrics prove which analyzer ran.
        assert!(analysis.metrics.contains_key("hip_angle"));
        assert!(analysis.metrics.contains_key("knee_angle_delta"));
        assert_eq!(analysis, ExerciseKind::Squat.analyzer()(&skeleton).unwrap());
    }

    #[test]
    fn every_fms_test_has_a_scorer() {
        // A total match: this is a compile-time guarantee, the loop just
        // exercises each arm once.
        for &test in FmsTest::all() {
            let _scorer = test.scorer();
            assert!(!test.name().is_empty());
        }
        assert_eq!(FmsTest::all().len(), 7);
    }
}
