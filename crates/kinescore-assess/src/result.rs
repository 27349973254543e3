//! Result value objects returned by analyzers and scorers.
//!
//! Every value here is created fresh on each invocation and discarded
//! after the caller consumes it; nothing is retained between calls.

use std::collections::BTreeMap;

/// Form score at or above this threshold counts as correct execution.
pub const PASS_SCORE: u8 = 70;

/// Named intermediate measurements produced while scoring, keyed by
/// metric name. Returned for observability; keys are unique per call.
pub type Metrics = BTreeMap<String, f32>;

/// Coarse motion state of a repeated exercise.
///
/// Classified from a primary angle against two fixed thresholds with no
/// hysteresis: an angle sitting exactly on a boundary can flicker between
/// phases across consecutive frames. Smoothing belongs to the caller,
/// which sees the frame sequence; the engine stays stateless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Extended / standing portion of the movement.
    Up,
    /// Bottom / contracted portion of the movement.
    Down,
    /// Transition between the two thresholds.
    Hold,
    /// Phase could not be determined.
    Unknown,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Hold => f.write_str("hold"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Continuous form assessment of one frame of a free exercise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExerciseAnalysis {
    /// `true` when `score >= PASS_SCORE`.
    pub is_correct: bool,
    /// Form score in `[0, 100]`.
    pub score: u8,
    /// Corrective (or reinforcing) feedback, in rule declaration order.
    pub feedback: Vec<String>,
    /// Intermediate measurements, for observability and debugging.
    pub metrics: Metrics,
    /// Coarse motion phase.
    pub phase: Phase,
}

/// A named diagnostic criterion recorded by an FMS scorer.
///
/// Boolean gates and the numeric measurements behind them are kept side
/// by side so the decision hierarchy stays auditable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CriterionValue {
    /// A boolean gating criterion.
    Flag(bool),
    /// A raw numeric measurement.
    Measure(f32),
}

impl CriterionValue {
    /// Returns the boolean value if this criterion is a flag.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Measure(_) => None,
        }
    }

    /// Returns the numeric value if this criterion is a measurement.
    #[must_use]
    pub fn as_measure(&self) -> Option<f32> {
        match self {
            Self::Flag(_) => None,
            Self::Measure(value) => Some(*value),
        }
    }
}

impl std::fmt::Display for CriterionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(value) => write!(f, "{value}"),
            Self::Measure(value) => write!(f, "{value:.3}"),
        }
    }
}

/// Discrete ordinal result of one FMS screen.
///
/// Geometry alone never yields 0: a zero is reserved for reported pain,
/// which is outside the engine's input contract and applied by the caller
/// through [`FmsScoreResult::with_pain_reported`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FmsScoreResult {
    /// Ordinal score in `{0, 1, 2, 3}`.
    pub score: u8,
    /// Itemized feedback, in criterion declaration order.
    pub feedback: Vec<String>,
    /// Named diagnostic criteria behind the decision.
    pub details: BTreeMap<String, CriterionValue>,
}

impl FmsScoreResult {
    /// Downgrades the score to 0 for caller-reported pain.
    ///
    /// Pain reporting overrides any geometric result per the screening
    /// protocol; the original feedback is kept below the explanation.
    #[must_use]
    pub fn with_pain_reported(mut self) -> Self {
        self.score = 0;
        self.feedback.insert(
            0,
            "Pain reported during the movement; score set to 0. Refer out before retesting."
                .to_string(),
        );
        self
    }

    /// Returns the boolean criterion stored under `name`, if any.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.details.get(name).and_then(CriterionValue::as_flag)
    }

    /// Returns the numeric criterion stored under `name`, if any.
    #[must_use]
    pub fn measure(&self, name: &str) -> Option<f32> {
        self.details.get(name).and_then(CriterionValue::as_measure)
    }
}
