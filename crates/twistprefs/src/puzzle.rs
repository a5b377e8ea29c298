use serde::{Deserialize, Serialize};
use twistcube_core::LayoutParams;
use twistcube_core::twistmath::Point3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PuzzlePreferences {
    pub order: usize,
    pub edge_length: f64,
    pub center: [f64; 3],
}
impl Default for PuzzlePreferences {
    fn default() -> Self {
        let LayoutParams {
            order,
            edge_length,
            center,
        } = LayoutParams::default();
        Self {
            order,
            edge_length,
            center: center.into(),
        }
    }
}
impl PuzzlePreferences {
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            order: self.order,
            edge_length: self.edge_length,
            center: Point3::from(self.center),
        }
    }
}
