//! Gesture classification.
//!
//! Two independent rules look at the gated signals:
//! - **Translation** (push/pull): linear acceleration dominated by Z and above
//!   the threshold, with no significant rotation on any axis.
//! - **Rotation** (left/right): corrected rotation dominated by Y, with X and
//!   Z below the threshold.
//!
//! Each rule yields an `Option<ActionLabel>`. The two are merged by an explicit
//! [`ActionPrecedence`] instead of letting one silently overwrite the other.
//!
//! With a shared threshold the rules cannot both fire: the translation rule
//! needs every corrected rotation axis below the threshold, which the gate
//! turns into exact zeros, while the rotation rule needs `|cg[Y]|` strictly
//! greater than `|cg[X]|`, i.e. a non-zero Y that survived the gate.

use serde::{Deserialize, Serialize};

use crate::types::{ActionLabel, AXIS_X, AXIS_Y, AXIS_Z};

/// Which rule wins when both produce a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPrecedence {
    /// Left/right beats push/pull.
    #[default]
    RotationFirst,
    /// Push/pull beats left/right.
    TranslationFirst,
}

/// Push/pull rule over linear acceleration and corrected rotation.
pub fn push_pull(
    linear_accel: [f32; 3],
    corrected_gyro: [f32; 3],
    threshold: f32,
) -> Option<ActionLabel> {
    let x = linear_accel[AXIS_X].abs();
    let y = linear_accel[AXIS_Y].abs();
    let z = linear_accel[AXIS_Z].abs();

    let steady = corrected_gyro.iter().all(|g| g.abs() < threshold);
    if z > y && z > x && z > threshold && steady {
        if linear_accel[AXIS_Z] > 0.0 {
            Some(ActionLabel::MovingAwayFromBody)
        } else {
            Some(ActionLabel::MovingTowardBody)
        }
    } else {
        None
    }
}

/// Left/right rule over corrected rotation.
pub fn left_right(corrected_gyro: [f32; 3], threshold: f32) -> Option<ActionLabel> {
    let x = corrected_gyro[AXIS_X].abs();
    let y = corrected_gyro[AXIS_Y].abs();
    let z = corrected_gyro[AXIS_Z].abs();

    if y > z && y > x && x < threshold && z < threshold {
        if corrected_gyro[AXIS_Y] > 0.0 {
            Some(ActionLabel::MovingLeft)
        } else {
            Some(ActionLabel::MovingRight)
        }
    } else {
        None
    }
}

/// Result of both rules before precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionCandidates {
    pub translation: Option<ActionLabel>,
    pub rotation: Option<ActionLabel>,
}

impl ActionCandidates {
    /// Run both rules.
    pub fn evaluate(linear_accel: [f32; 3], corrected_gyro: [f32; 3], threshold: f32) -> Self {
        Self {
            translation: push_pull(linear_accel, corrected_gyro, threshold),
            rotation: left_right(corrected_gyro, threshold),
        }
    }

    /// Merge the two results.
    pub fn resolve(self, precedence: ActionPrecedence) -> ActionLabel {
        let label = match precedence {
            ActionPrecedence::RotationFirst => self.rotation.or(self.translation),
            ActionPrecedence::TranslationFirst => self.translation.or(self.rotation),
        };
        label.unwrap_or_default()
    }

    /// True when both rules produced a label.
    pub fn is_conflict(&self) -> bool {
        self.translation.is_some() && self.rotation.is_some()
    }
}

/// Classify the current gesture.
pub fn classify_action(
    linear_accel: [f32; 3],
    corrected_gyro: [f32; 3],
    threshold: f32,
    precedence: ActionPrecedence,
) -> ActionLabel {
    let candidates = ActionCandidates::evaluate(linear_accel, corrected_gyro, threshold);
    if candidates.is_conflict() {
        log::debug!("Both gesture rules fired, resolving with {precedence:?}");
    }
    candidates.resolve(precedence)
}
