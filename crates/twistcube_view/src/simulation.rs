use std::collections::VecDeque;

use twistcube_core::{
    LayoutError, LogicalIndex, Puzzle, SubCubeId, Twist, reconcile, resolve_twist, select_layer,
};
use twistmath::cgmath::{Quaternion, Rotation};
use twistmath::prelude::*;
use twistprefs::{AnimationPreferences, InteractionPreferences, Preferences};
use web_time::Instant;

use crate::{AnimatorPhase, RotationAnimator, RotationJob, SimEvent, Timestamp, TwistRequest};

/// Twist that finished and can be undone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CompletedTwist {
    /// Twist that was applied.
    pub twist: Twist,
    /// Logical index of a slot in the layer that turned.
    pub touched: LogicalIndex,
}

/// Puzzle simulation, which manages the puzzle state, twist animation, undo
/// history, and events.
#[derive(Debug)]
pub struct PuzzleSimulation {
    puzzle: Puzzle,
    /// Rotation from the puzzle's local frame to world space.
    orientation: Quaternion<Float>,

    animator: RotationAnimator,
    /// Whether the twist in `animator` is undoing an earlier twist.
    animating_undo: bool,

    animation_prefs: AnimationPreferences,
    interaction_prefs: InteractionPreferences,

    /// Stack of twists to undo, holding at most
    /// `interaction_prefs.max_undo` entries.
    undo_stack: Vec<CompletedTwist>,
    /// Events that have not been drained yet.
    events: VecDeque<SimEvent>,

    /// Time that the simulation was created, used as the epoch for
    /// [`Self::step_now()`].
    load_time: Instant,
}
impl PuzzleSimulation {
    /// Constructs a new simulation with a solved puzzle described by `prefs`.
    pub fn new(prefs: &Preferences) -> Result<Self, LayoutError> {
        let puzzle = Puzzle::new(prefs.puzzle.layout_params())?;
        Ok(Self {
            puzzle,
            orientation: prefs.view.orientation(),

            animator: RotationAnimator::new(prefs.animation.twist_interpolation),
            animating_undo: false,

            animation_prefs: prefs.animation.clone(),
            interaction_prefs: prefs.interaction.clone(),

            undo_stack: vec![],
            events: VecDeque::new(),

            load_time: Instant::now(),
        })
    }

    /// Returns the puzzle, including any partially-applied rotation.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }
    /// Returns the rotation from the puzzle's local frame to world space.
    pub fn orientation(&self) -> Quaternion<Float> {
        self.orientation
    }
    /// Sets the rotation from the puzzle's local frame to world space.
    pub fn set_orientation(&mut self, orientation: Quaternion<Float>) {
        self.orientation = orientation;
    }
    /// Converts a vector from world space to the puzzle's local frame.
    pub fn world_to_local(&self, v: Vector3<Float>) -> Vector3<Float> {
        self.orientation.invert().rotate_vector(v)
    }

    /// Updates the animation and interaction preferences. The change takes
    /// effect on the next twist.
    pub fn set_prefs(&mut self, animation: AnimationPreferences, interaction: InteractionPreferences) {
        self.animator.set_interpolation(animation.twist_interpolation);
        self.animation_prefs = animation;
        self.interaction_prefs = interaction;
        self.trim_undo_stack();
    }

    /// Returns whether a twist is in progress.
    pub fn is_rotating(&self) -> bool {
        self.animator.is_rotating()
    }
    /// Returns the twist in progress, if any.
    pub fn current_twist(&self) -> Option<&RotationJob> {
        self.animator.current()
    }

    /// Resolves a drag in world space across a face with the given local
    /// normal into a twist.
    pub fn resolve_drag(&self, world_drag: Vector3<Float>, local_normal: Vector3<Float>) -> Option<Twist> {
        let local_drag = self.world_to_local(world_drag);
        resolve_twist(
            local_drag,
            local_normal,
            self.interaction_prefs.ambiguity_tolerance,
        )
    }

    /// Starts animating `twist` on the layer containing the slot `touched`.
    ///
    /// The request is ignored if another twist is in progress or `twist` is
    /// `None`.
    pub fn request_twist(&mut self, touched: LogicalIndex, twist: Option<Twist>) -> TwistRequest {
        let request = self.start_twist(touched, twist);
        if request == TwistRequest::Started {
            self.animating_undo = false;
        }
        request
    }
    fn start_twist(&mut self, touched: LogicalIndex, twist: Option<Twist>) -> TwistRequest {
        if self.is_rotating() {
            log::trace!("ignoring twist {twist:?} while another twist is in progress");
            return TwistRequest::Ignored;
        }
        let Some(twist) = twist else {
            return TwistRequest::Ignored;
        };
        let layer = select_layer(&self.puzzle, touched, Some(twist));
        let job = RotationJob::new(layer, twist, touched, self.animation_prefs.twist_duration);
        match self.animator.start(job) {
            Ok(()) => TwistRequest::Started,
            Err(_) => TwistRequest::Ignored,
        }
    }

    /// Starts animating the inverse of the most recent twist.
    pub fn undo(&mut self) -> TwistRequest {
        let Some(&last) = self.undo_stack.last() else {
            return TwistRequest::Ignored;
        };
        let request = self.start_twist(last.touched, Some(last.twist.rev()));
        if request == TwistRequest::Started {
            self.undo_stack.pop();
            self.animating_undo = true;
        }
        request
    }
    /// Returns whether there is a twist to undo.
    pub fn has_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }
    /// Returns the completed twists, oldest first, that can be undone.
    pub fn undo_stack(&self) -> &[CompletedTwist] {
        &self.undo_stack
    }

    /// Advances the animation to `timestamp`, in milliseconds. Returns whether
    /// the puzzle must be redrawn.
    pub fn step(&mut self, timestamp: Timestamp) -> bool {
        match self.animator.tick(&mut self.puzzle, timestamp) {
            AnimatorPhase::Idle => false,
            AnimatorPhase::Running => true,
            AnimatorPhase::Complete => {
                self.finish_twist();
                true
            }
        }
    }
    /// Advances the animation to the current time. Returns whether the puzzle
    /// must be redrawn.
    pub fn step_now(&mut self) -> bool {
        let timestamp = self.load_time.elapsed().as_secs_f64() * 1000.0;
        self.step(timestamp)
    }

    /// Instantly finishes the twist in progress. Returns whether there was a
    /// twist in progress.
    pub fn cancel(&mut self) -> bool {
        let canceled = self.animator.cancel(&mut self.puzzle);
        if canceled {
            self.finish_twist();
        }
        canceled
    }

    fn finish_twist(&mut self) {
        let Some(job) = self.animator.take_completed() else {
            return;
        };
        if self.interaction_prefs.snap_after_twist {
            self.puzzle.snap_transforms(&job.layer);
        }
        let reconciliation = match reconcile(&mut self.puzzle, &job.layer) {
            Ok(reconciliation) => reconciliation,
            Err(e) => {
                twistmath::debug_panic!("error reconciling after {}: {e}", job.twist);
                Default::default()
            }
        };
        log::debug!("completed {} at index {}", job.twist, job.touched);

        let undo = std::mem::take(&mut self.animating_undo);
        if !undo {
            self.undo_stack.push(CompletedTwist {
                twist: job.twist,
                touched: job.touched,
            });
            self.trim_undo_stack();
        }
        self.events.push_back(SimEvent::MoveCompleted {
            twist: job.twist,
            touched: job.touched,
            undo,
            reconciliation,
        });
    }

    fn trim_undo_stack(&mut self) {
        let excess = self
            .undo_stack
            .len()
            .saturating_sub(self.interaction_prefs.max_undo);
        self.undo_stack.drain(..excess);
    }

    /// Returns the world-space transform of every sub-cube, for rendering a
    /// mesh centered at the origin.
    pub fn sub_cube_transforms(&self) -> Vec<(SubCubeId, Matrix4<Float>)> {
        let world = Matrix4::from(self.orientation);
        self.puzzle
            .cubes()
            .iter()
            .map(|(id, cube)| (id, world * cube.render_transform()))
            .collect()
    }

    /// Removes and returns all pending events.
    pub fn drain_events(&mut self) -> impl '_ + Iterator<Item = SimEvent> {
        self.events.drain(..)
    }

    /// Returns whether the puzzle is solved and no twist is in progress.
    pub fn is_solved(&self) -> bool {
        !self.is_rotating() && self.puzzle.is_solved()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use twistcube_core::{Face, TwistDirection};
    use twistmath::cgmath::{Deg, Rotation3, Transform, vec3};

    use super::*;

    fn sim() -> PuzzleSimulation {
        PuzzleSimulation::new(&Preferences::default()).unwrap()
    }

    fn run_to_completion(sim: &mut PuzzleSimulation, mut t: Timestamp) -> Timestamp {
        while sim.is_rotating() {
            sim.step(t);
            t += 16.0;
        }
        t
    }

    #[test]
    fn test_twist_and_undo() {
        let mut sim = sim();
        let r = Twist::new(Face::R, TwistDirection::CW);
        let touched = sim.puzzle().face_representative(Face::R);

        assert_eq!(sim.request_twist(touched, Some(r)), TwistRequest::Started);
        assert_eq!(sim.request_twist(touched, Some(r)), TwistRequest::Ignored);
        let t = run_to_completion(&mut sim, 0.0);
        assert!(!sim.is_solved());
        assert_eq!(
            sim.drain_events().collect::<Vec<_>>(),
            vec![SimEvent::MoveCompleted {
                twist: r,
                touched,
                undo: false,
                reconciliation: twistcube_core::Reconciliation {
                    relabeled: 9,
                    fallbacks: 0,
                },
            }],
        );

        assert_eq!(sim.undo(), TwistRequest::Started);
        run_to_completion(&mut sim, t);
        assert!(sim.is_solved());
        assert!(!sim.has_undo());
        assert_eq!(sim.undo(), TwistRequest::Ignored);
        let events: Vec<_> = sim.drain_events().collect();
        assert!(matches!(
            events.as_slice(),
            [SimEvent::MoveCompleted { undo: true, .. }],
        ));
    }

    #[test]
    fn test_undo_history_is_limited() {
        let mut prefs = Preferences::default();
        prefs.interaction.max_undo = 2;
        let mut sim = PuzzleSimulation::new(&prefs).unwrap();
        let twists = twistcube_core::parse_twists("R U F").unwrap();
        let mut t = 0.0;
        for &twist in &twists {
            let touched = sim.puzzle().face_representative(twist.face);
            sim.request_twist(touched, Some(twist));
            t = run_to_completion(&mut sim, t);
        }
        let kept = sim.undo_stack().iter().map(|c| c.twist).collect::<Vec<_>>();
        assert_eq!(kept, twists[1..].to_vec());

        sim.set_prefs(
            prefs.animation.clone(),
            InteractionPreferences {
                max_undo: 0,
                ..prefs.interaction.clone()
            },
        );
        assert!(!sim.has_undo());
    }

    #[test]
    fn test_unsnapped_twists_reconcile() {
        let mut prefs = Preferences::default();
        prefs.interaction.snap_after_twist = false;
        prefs.animation.twist_interpolation = twistprefs::InterpolateFn::Cosine;
        let mut sim = PuzzleSimulation::new(&prefs).unwrap();
        let twists = twistcube_core::parse_twists("R U R' U' R U R' U' R U R' U'").unwrap();
        let mut t = 0.0;
        for &twist in &twists {
            let touched = sim.puzzle().face_representative(twist.face);
            assert_eq!(sim.request_twist(touched, Some(twist)), TwistRequest::Started);
            t = run_to_completion(&mut sim, t);
            sim.puzzle().check_permutation().unwrap();
        }
        for event in sim.drain_events() {
            let SimEvent::MoveCompleted { reconciliation, .. } = event;
            assert_eq!(reconciliation.fallbacks, 0);
            assert_eq!(reconciliation.relabeled, 9);
        }
        // Three more repetitions make six, which returns to solved.
        for &twist in &twists {
            let touched = sim.puzzle().face_representative(twist.face);
            sim.request_twist(touched, Some(twist));
            t = run_to_completion(&mut sim, t);
        }
        assert!(sim.is_solved());
    }

    #[test]
    fn test_no_twist_is_ignored() {
        let mut sim = sim();
        assert_eq!(sim.request_twist(0, None), TwistRequest::Ignored);
        assert_eq!(
            sim.request_twist(1000, Some(Twist::new(Face::U, TwistDirection::CW))),
            TwistRequest::Ignored,
        );
        assert!(!sim.step(0.0));
    }

    #[test]
    fn test_cancel_reconciles() {
        let mut sim = sim();
        let f = Twist::new(Face::F, TwistDirection::CCW);
        sim.request_twist(4, Some(f));
        sim.step(0.0);
        sim.step(10.0);
        assert!(sim.cancel());
        assert!(!sim.is_rotating());
        sim.puzzle().check_permutation().unwrap();
        assert_eq!(sim.drain_events().count(), 1);
        assert!(!sim.cancel());
    }

    #[test]
    fn test_resolve_drag_uses_orientation() {
        let mut sim = sim();
        // With the identity orientation, world and local frames agree.
        sim.set_orientation(Quaternion::new(1.0, 0.0, 0.0, 0.0));
        let up = vec3(0.0, 1.0, 0.0);
        assert_eq!(sim.resolve_drag(vec3(3.0, 0.0, 0.0), up), "F".parse().ok());

        // Turn the puzzle a quarter turn about Y, so local +Z points along
        // world +X.
        sim.set_orientation(Quaternion::from_angle_y(Deg(90.0)));
        assert_eq!(sim.resolve_drag(vec3(3.0, 0.0, 0.0), up), "R'".parse().ok());
    }

    #[test]
    fn test_sub_cube_transforms() {
        let mut sim = sim();
        sim.set_orientation(Quaternion::new(1.0, 0.0, 0.0, 0.0));
        let transforms = sim.sub_cube_transforms();
        assert_eq!(transforms.len(), 27);
        let (id, m) = transforms[0];
        assert_eq!(id, SubCubeId(0));
        twistmath::assert_approx_eq!(
            m.transform_point(Point3::new(0.0, 0.0, 0.0)),
            Point3::new(10.0, 10.0, 10.0),
        );
    }
}
