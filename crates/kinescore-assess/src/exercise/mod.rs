//! Free-exercise form analyzers.
//!
//! Each analyzer is a refinement of one template: compute a small set of
//! named angles and offsets through the geometry kernel, classify a coarse
//! phase from a primary angle against two fixed thresholds, then apply an
//! ordered list of independent penalty rules against a starting score of
//! 100. Rules are order-insensitive in total (subtraction commutes) but
//! feedback follows declaration order for determinism.

pub mod lunge;
pub mod pushup;
pub mod squat;

use crate::result::{ExerciseAnalysis, Metrics, Phase, PASS_SCORE};

/// Primary angle above this is the extended (`Up`) phase.
pub const PHASE_UP_DEG: f32 = 160.0;

/// Primary angle below this is the contracted (`Down`) phase.
pub const PHASE_DOWN_DEG: f32 = 100.0;

/// Classifies the coarse phase from the primary angle.
///
/// Hard cutoffs, no hysteresis: a boundary-sitting angle can flicker
/// between phases frame to frame. Callers smooth across frames.
#[must_use]
pub fn classify_phase(primary_angle_deg: f32) -> Phase {
    if primary_angle_deg > PHASE_UP_DEG {
        Phase::Up
    } else if primary_angle_deg < PHASE_DOWN_DEG {
        Phase::Down
    } else {
        Phase::Hold
    }
}

/// Accumulates penalty rules into a score and feedback list.
pub(crate) struct ScoreSheet {
    score: i16,
    feedback: Vec<String>,
}

impl ScoreSheet {
    pub(crate) fn new() -> Self {
        Self {
            score: 100,
            feedback: Vec::new(),
        }
    }

    /// Applies one penalty rule: subtract its weight, append its message.
    pub(crate) fn penalize(&mut self, weight: u8, message: &str) {
        self.score -= i16::from(weight);
        self.feedback.push(message.to_string());
    }

    /// Finalizes the sheet into an [`ExerciseAnalysis`].
    ///
    /// When no rule fired and the frame sits in the exercise's active
    /// phase, a single positive-reinforcement message replaces the empty
    /// feedback list.
    pub(crate) fn finish(
        mut self,
        phase: Phase,
        active_phase: Phase,
        praise: &str,
        metrics: Metrics,
    ) -> ExerciseAnalysis {
        if self.feedback.is_empty() && phase == active_phase {
            self.feedback.push(praise.to_string());
        }

        let score = self.score.clamp(0, 100) as u8;
        ExerciseAnalysis {
            is_correct: score >= PASS_SCORE,
            score,
            feedback: self.feedback,
            metrics,
            phase,
        }
    }
}
