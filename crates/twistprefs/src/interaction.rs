use serde::{Deserialize, Serialize};
use twistcube_core::DEFAULT_AMBIGUITY_TOLERANCE;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Maximum angle, in radians, between a drag and the nearest axis.
    pub ambiguity_tolerance: f64,
    /// Whether to round sub-cube transforms to exact quarter turns after each
    /// twist.
    pub snap_after_twist: bool,
    /// Maximum number of twists kept for undo. Older twists are forgotten.
    pub max_undo: usize,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            ambiguity_tolerance: DEFAULT_AMBIGUITY_TOLERANCE,
            snap_after_twist: true,
            max_undo: 1000,
        }
    }
}
