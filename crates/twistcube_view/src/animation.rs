//! Time-driven rotation of one layer.

use twistcube_core::{Layer, LogicalIndex, Puzzle, Twist};
use twistmath::prelude::*;
use twistprefs::InterpolateFn;

/// Time in milliseconds since an arbitrary epoch.
pub type Timestamp = f64;

/// Animated twist in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationJob {
    /// Sub-cubes that are turning.
    pub layer: Layer,
    /// Twist being animated.
    pub twist: Twist,
    /// Logical index of the slot that was touched to start the twist.
    pub touched: LogicalIndex,
    /// Duration of the whole twist.
    pub duration: f64,
    /// Time of the first tick, or `None` if no tick has happened yet.
    pub start_time: Option<Timestamp>,
    /// Time of the most recent tick, clamped to the end of the twist.
    pub last_tick_time: Timestamp,
    /// Interpolated progress that has already been applied to the layer, from
    /// 0.0 to 1.0.
    applied: f64,
}
impl RotationJob {
    /// Constructs a job that has not started yet.
    pub fn new(layer: Layer, twist: Twist, touched: LogicalIndex, duration: f64) -> Self {
        Self {
            layer,
            twist,
            touched,
            duration,
            start_time: None,
            last_tick_time: 0.0,
            applied: 0.0,
        }
    }

    /// Returns the fraction of the quarter turn that has been applied.
    pub fn applied_fraction(&self) -> f64 {
        self.applied
    }

    /// Rotates the layer so that the applied fraction becomes `target`.
    fn advance_to(&mut self, puzzle: &mut Puzzle, target: f64) {
        let delta = target - self.applied;
        if delta != 0.0 {
            let angle = Rad(QUARTER_TURN.0 * delta);
            puzzle.apply_transform(&self.layer, self.twist.transform(puzzle.pivot(), angle));
        }
        self.applied = target;
    }
}

/// Phase of a [`RotationAnimator`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnimatorPhase {
    /// No twist is animating.
    #[default]
    Idle,
    /// A twist is animating.
    Running,
    /// A twist has finished animating but has not been reconciled yet.
    Complete,
}

#[derive(Debug, Default, Clone)]
enum AnimatorState {
    #[default]
    Idle,
    Running(RotationJob),
    Complete(RotationJob),
}

/// State machine that animates at most one twist at a time.
///
/// Each tick rotates the layer by the difference between the interpolated
/// progress at this tick and at the previous one, so the rotations compose to
/// exactly one quarter turn no matter how ticks are spaced.
#[derive(Debug, Default, Clone)]
pub struct RotationAnimator {
    state: AnimatorState,
    interpolation: InterpolateFn,
}
impl RotationAnimator {
    /// Constructs an idle animator.
    pub fn new(interpolation: InterpolateFn) -> Self {
        Self {
            state: AnimatorState::Idle,
            interpolation,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> AnimatorPhase {
        match self.state {
            AnimatorState::Idle => AnimatorPhase::Idle,
            AnimatorState::Running(_) => AnimatorPhase::Running,
            AnimatorState::Complete(_) => AnimatorPhase::Complete,
        }
    }
    /// Returns whether a twist is animating or waiting to be reconciled.
    pub fn is_rotating(&self) -> bool {
        !matches!(self.state, AnimatorState::Idle)
    }
    /// Returns the job that is running or complete.
    pub fn current(&self) -> Option<&RotationJob> {
        match &self.state {
            AnimatorState::Idle => None,
            AnimatorState::Running(job) | AnimatorState::Complete(job) => Some(job),
        }
    }

    /// Sets the interpolation function used for future ticks.
    pub fn set_interpolation(&mut self, interpolation: InterpolateFn) {
        self.interpolation = interpolation;
    }

    /// Starts animating `job`. Returns the job back if another twist is
    /// already in progress or the layer is empty.
    pub fn start(&mut self, job: RotationJob) -> Result<(), RotationJob> {
        if self.is_rotating() || job.layer.is_empty() {
            return Err(job);
        }
        log::trace!("animator: idle -> running ({})", job.twist);
        self.state = AnimatorState::Running(job);
        Ok(())
    }

    /// Advances the animation to time `t`, rotating the layer in `puzzle`.
    /// Returns the phase after the tick.
    ///
    /// The first tick only records the start time. A tick at or after
    /// `start_time + duration` finishes the quarter turn and moves to
    /// [`AnimatorPhase::Complete`], as does any tick of a job whose duration
    /// is not a positive finite number. Ticks earlier than the previous one are
    /// treated as if no time had passed.
    pub fn tick(&mut self, puzzle: &mut Puzzle, t: Timestamp) -> AnimatorPhase {
        let AnimatorState::Running(job) = &mut self.state else {
            return self.phase();
        };

        let start = match job.start_time {
            Some(start) => start,
            None => {
                job.start_time = Some(t);
                job.last_tick_time = t;
                t
            }
        };
        let end = start + job.duration;
        let t = t.max(job.last_tick_time).min(end);
        let finished = t >= end || !job.duration.is_finite() || job.duration <= 0.0;

        let progress = if finished {
            1.0
        } else {
            self.interpolation.interpolate((t - start) / job.duration)
        };
        job.advance_to(puzzle, progress);
        job.last_tick_time = t;

        if finished {
            self.finish();
        }
        self.phase()
    }

    /// Applies the remaining rotation of the running twist instantly and moves
    /// to [`AnimatorPhase::Complete`]. Returns whether there was a running
    /// twist.
    pub fn cancel(&mut self, puzzle: &mut Puzzle) -> bool {
        let AnimatorState::Running(job) = &mut self.state else {
            return false;
        };
        log::trace!(
            "animator: canceling {} at {:.0}%",
            job.twist,
            job.applied * 100.0,
        );
        job.advance_to(puzzle, 1.0);
        self.finish();
        true
    }

    fn finish(&mut self) {
        if let AnimatorState::Running(job) = std::mem::take(&mut self.state) {
            log::trace!("animator: running -> complete ({})", job.twist);
            self.state = AnimatorState::Complete(job);
        }
    }

    /// Takes the completed job, returning the animator to
    /// [`AnimatorPhase::Idle`]. Returns `None` if no job is complete.
    pub fn take_completed(&mut self) -> Option<RotationJob> {
        match std::mem::take(&mut self.state) {
            AnimatorState::Complete(job) => {
                log::trace!("animator: complete -> idle ({})", job.twist);
                Some(job)
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}
