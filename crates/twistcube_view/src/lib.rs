//! Twist animation, simulation, and drag input for cube puzzles, independent
//! of any renderer.
//!
//! The host calls [`PuzzleSimulation::step()`] once per frame and feeds drag
//! events through [`DragController`].

mod animation;
mod event;
mod gesture;
mod simulation;

pub use animation::{AnimatorPhase, RotationAnimator, RotationJob, Timestamp};
pub use event::{SimEvent, TwistRequest};
pub use gesture::{DragController, DragState, PickHit, PickResult, PickTarget};
pub use simulation::{CompletedTwist, PuzzleSimulation};
