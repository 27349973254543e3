//! Functional Movement Screen scorers.
//!
//! One module per screen, each exposing `score(&Skeleton) ->
//! PoseResult<FmsScoreResult>`. Every scorer follows the same decision
//! hierarchy, encoded once in [`tier`] so the clinical tie-break order
//! cannot drift between screens:
//!
//! 1. Named gating criteria are computed from geometry and recorded in
//!    the result's `details` map.
//! 2. The primary gate false ⇒ score 1 with a single explanation.
//! 3. Primary true and every secondary true ⇒ score 3 with itemized
//!    praise; any secondary false ⇒ score 2 with itemized warnings.
//!
//! Geometry never produces a 0: that score is reserved for reported pain,
//! which the caller applies via
//! [`FmsScoreResult::with_pain_reported`](crate::FmsScoreResult::with_pain_reported).

pub mod deep_squat;
pub mod hurdle_step;
pub mod inline_lunge;
pub mod leg_raise;
pub mod rotary_stability;
pub mod shoulder_mobility;
pub mod trunk_pushup;

use std::collections::BTreeMap;

use crate::result::CriterionValue;

/// Torso may drift at most this far off the hips, in normalized units.
pub(crate) const TORSO_UPRIGHT_LIMIT: f32 = 0.1;

/// A leg counts as extended above this knee angle.
pub(crate) const LEG_EXTENDED_DEG: f32 = 160.0;

/// A secondary criterion with its feedback in both directions.
pub(crate) struct Secondary {
    pub name: &'static str,
    pub satisfied: bool,
    pub praise: &'static str,
    pub warning: &'static str,
}

impl Secondary {
    pub(crate) fn new(
        name: &'static str,
        satisfied: bool,
        praise: &'static str,
        warning: &'static str,
    ) -> Self {
        Self {
            name,
            satisfied,
            praise,
            warning,
        }
    }
}

/// Applies the shared three-tier decision hierarchy.
///
/// Records the primary and secondary flags under their names in
/// `details` and returns `(score, feedback)`.
pub(crate) fn tier(
    primary_name: &'static str,
    primary_satisfied: bool,
    primary_praise: &'static str,
    primary_explanation: &'static str,
    secondaries: &[Secondary],
    details: &mut BTreeMap<String, CriterionValue>,
) -> (u8, Vec<String>) {
    details.insert(
        primary_name.to_string(),
        CriterionValue::Flag(primary_satisfied),
    );
    for secondary in secondaries {
        details.insert(
            secondary.name.to_string(),
            CriterionValue::Flag(secondary.satisfied),
        );
    }

    if !primary_satisfied {
        return (1, vec![primary_explanation.to_string()]);
    }

    if secondaries.iter().all(|s| s.satisfied) {
        let mut feedback = vec![primary_praise.to_string()];
        feedback.extend(secondaries.iter().map(|s| s.praise.to_string()));
        (3, feedback)
    } else {
        let feedback = secondaries
            .iter()
            .filter(|s| !s.satisfied)
            .map(|s| s.warning.to_string())
            .collect();
        (2, feedback)
    }
}
