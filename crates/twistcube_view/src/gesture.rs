//! Drag input.

use float_ord::FloatOrd;
use parking_lot::Mutex;
use twistcube_core::{LogicalIndex, SubCubeId, Twist};
use twistmath::prelude::*;

use crate::{PuzzleSimulation, TwistRequest};

/// Object hit by a pick ray.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// Transparent bounding box around the whole puzzle.
    Hull,
    /// One of the sub-cubes.
    SubCube(SubCubeId),
}

/// Intersection of a pick ray with an object, as reported by the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Object that was hit.
    pub target: PickTarget,
    /// Distance along the ray.
    pub distance: Float,
    /// Intersection point in world space.
    pub point: Point3<Float>,
    /// Normal of the face that was hit, in the object's local frame.
    pub normal: Vector3<Float>,
}

/// Result of picking the puzzle under the cursor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickResult {
    /// Sub-cube under the cursor.
    pub touched: SubCubeId,
    /// Point on the sub-cube under the cursor, in world space.
    pub world_point: Point3<Float>,
    /// Outward normal of the puzzle face under the cursor, in the puzzle's
    /// local frame.
    pub face_normal: Vector3<Float>,
}
impl PickResult {
    /// Combines the two innermost hits of a pick ray, which must be the hull
    /// and a sub-cube in either order. The hull supplies the face normal and
    /// the sub-cube supplies the touched cube and point.
    pub fn from_hits(hits: &[PickHit]) -> Option<Self> {
        let mut hits = hits.to_vec();
        hits.sort_by_key(|hit| FloatOrd(hit.distance));
        let [a, b, ..] = hits.as_slice() else {
            return None;
        };
        let (hull, cube, touched) = match (a.target, b.target) {
            (PickTarget::Hull, PickTarget::SubCube(id)) => (a, b, id),
            (PickTarget::SubCube(id), PickTarget::Hull) => (b, a, id),
            _ => return None,
        };
        Some(Self {
            touched,
            world_point: cube.point,
            face_normal: hull.normal,
        })
    }
}

/// State of a drag across the puzzle.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum DragState {
    /// Not dragging.
    #[default]
    Idle,
    /// Clicked on a sub-cube. Once the user has dragged far enough to
    /// determine a direction, the drag state will change to
    /// [`DragState::Twist`] or [`DragState::Canceled`].
    PreTwist {
        /// Point where the drag started, in world space.
        start: Point3<Float>,
        /// Logical index of the touched slot.
        touched: LogicalIndex,
        /// Outward normal of the touched face, in the puzzle's local frame.
        normal: Vector3<Float>,
    },
    /// Requested a twist; ignore drag inputs until the drag ends.
    Twist(Twist),
    /// Drag canceled; ignore drag inputs until the drag ends.
    Canceled,
}

/// Converts drags across the puzzle into twists.
#[derive(Debug, Default, Clone)]
pub struct DragController {
    state: DragState,
    /// Minimum drag distance in world space before resolving a twist.
    drag_threshold: Float,
}
impl DragController {
    /// Constructs a controller that resolves a twist once the drag is longer
    /// than `drag_threshold`.
    pub fn new(drag_threshold: Float) -> Self {
        Self {
            state: DragState::Idle,
            drag_threshold,
        }
    }

    /// Returns the current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Starts a drag at the picked point. Drags that start off the puzzle or
    /// while a twist is in progress are canceled.
    pub fn on_drag_start(&mut self, pick: Option<PickResult>, sim: &Mutex<PuzzleSimulation>) {
        let sim = sim.lock();
        // IIFE to mimic try_block
        let pre_twist = (|| {
            let pick = pick?;
            if sim.is_rotating() {
                return None;
            }
            let touched = sim.puzzle().cubes().get(pick.touched).ok()?.index;
            Some(DragState::PreTwist {
                start: pick.world_point,
                touched,
                normal: pick.face_normal,
            })
        })();
        self.state = pre_twist.unwrap_or(DragState::Canceled);
        log::trace!("drag start: {:?}", self.state);
    }

    /// Updates the drag with the picked point under the cursor. Returns the
    /// outcome if a twist was requested.
    ///
    /// If the cursor is off the puzzle, then nothing happens.
    pub fn on_drag_move(
        &mut self,
        pick: Option<PickResult>,
        sim: &Mutex<PuzzleSimulation>,
    ) -> Option<TwistRequest> {
        let DragState::PreTwist {
            start,
            touched,
            normal,
        } = self.state
        else {
            return None;
        };
        let drag = pick?.world_point - start;
        if drag.magnitude() <= self.drag_threshold.max(EPSILON) {
            return None;
        }

        let mut sim = sim.lock();
        let Some(twist) = sim.resolve_drag(drag, normal) else {
            log::trace!("canceling drag {drag:?}: no twist");
            self.state = DragState::Canceled;
            return None;
        };
        let request = sim.request_twist(touched, Some(twist));
        self.state = match request {
            TwistRequest::Started => DragState::Twist(twist),
            TwistRequest::Ignored => DragState::Canceled,
        };
        Some(request)
    }

    /// Ends the drag.
    pub fn on_drag_end(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use twistcube_core::{Face, TwistDirection};
    use twistmath::cgmath::{Quaternion, vec3};
    use twistprefs::Preferences;

    use super::*;

    fn sim() -> Mutex<PuzzleSimulation> {
        let mut sim = PuzzleSimulation::new(&Preferences::default()).unwrap();
        sim.set_orientation(Quaternion::new(1.0, 0.0, 0.0, 0.0));
        Mutex::new(sim)
    }

    fn hit(target: PickTarget, distance: Float, point: [Float; 3], normal: [Float; 3]) -> PickHit {
        PickHit {
            target,
            distance,
            point: point.into(),
            normal: normal.into(),
        }
    }

    fn pick_on_top(id: u16, x: Float) -> Option<PickResult> {
        PickResult::from_hits(&[
            hit(PickTarget::SubCube(SubCubeId(id)), 5.1, [x, 15.0, 10.0], [0.0, 1.0, 0.0]),
            hit(PickTarget::Hull, 5.0, [x, 15.0, 10.0], [0.0, 1.0, 0.0]),
            hit(PickTarget::SubCube(SubCubeId(99)), 30.0, [x, 0.0, 10.0], [0.0, 0.0, 1.0]),
        ])
    }

    #[test]
    fn test_pick_result_from_hits() {
        let result = pick_on_top(3, 1.0).unwrap();
        assert_eq!(result.touched, SubCubeId(3));
        assert_eq!(result.face_normal, vec3(0.0, 1.0, 0.0));

        let hull = hit(PickTarget::Hull, 1.0, [0.0; 3], [1.0, 0.0, 0.0]);
        assert_eq!(PickResult::from_hits(&[hull]), None);
        assert_eq!(PickResult::from_hits(&[hull, hull]), None);
    }

    #[test]
    fn test_drag_twists_once() {
        let sim = sim();
        let mut drag = DragController::new(1.0);
        drag.on_drag_start(pick_on_top(0, 10.0), &sim);
        assert!(matches!(drag.state(), DragState::PreTwist { touched: 0, .. }));

        // Too short to resolve.
        assert_eq!(drag.on_drag_move(pick_on_top(0, 10.5), &sim), None);
        assert!(matches!(drag.state(), DragState::PreTwist { .. }));

        // Drag toward +X across the top face.
        assert_eq!(drag.on_drag_move(pick_on_top(1, 13.0), &sim), Some(TwistRequest::Started));
        let f = Twist::new(Face::F, TwistDirection::CW);
        assert_eq!(drag.state(), DragState::Twist(f));
        assert_eq!(sim.lock().current_twist().map(|job| job.twist), Some(f));

        // Further movement does nothing.
        assert_eq!(drag.on_drag_move(pick_on_top(1, 20.0), &sim), None);
        drag.on_drag_end();
        assert_eq!(drag.state(), DragState::Idle);

        // A new drag while the twist is animating is canceled.
        drag.on_drag_start(pick_on_top(0, 10.0), &sim);
        assert_eq!(drag.state(), DragState::Canceled);
    }

    #[test]
    fn test_ambiguous_drag_cancels() {
        let sim = sim();
        let mut drag = DragController::default();
        drag.on_drag_start(pick_on_top(0, 10.0), &sim);
        let diagonal = PickResult {
            touched: SubCubeId(0),
            world_point: Point3::new(13.0, 15.0, 13.0),
            face_normal: vec3(0.0, 1.0, 0.0),
        };
        assert_eq!(drag.on_drag_move(Some(diagonal), &sim), None);
        assert_eq!(drag.state(), DragState::Canceled);
        assert!(!sim.lock().is_rotating());
    }

    #[test]
    fn test_drag_off_puzzle() {
        let sim = sim();
        let mut drag = DragController::default();
        drag.on_drag_start(None, &sim);
        assert_eq!(drag.state(), DragState::Canceled);
        drag.on_drag_end();
        drag.on_drag_start(pick_on_top(0, 10.0), &sim);
        assert_eq!(drag.on_drag_move(None, &sim), None);
        assert!(matches!(drag.state(), DragState::PreTwist { .. }));
    }
}
