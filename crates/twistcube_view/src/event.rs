use twistcube_core::{LogicalIndex, Reconciliation, Twist};

/// Notification emitted by a [`crate::PuzzleSimulation`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A twist finished animating and the sub-cubes were relabeled.
    MoveCompleted {
        /// Twist that was applied.
        twist: Twist,
        /// Logical index of the slot that was touched to start the twist.
        touched: LogicalIndex,
        /// Whether the twist undid an earlier one.
        undo: bool,
        /// Result of relabeling the turned layer.
        reconciliation: Reconciliation,
    },
}

/// Outcome of a request to start a twist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TwistRequest {
    /// The twist started animating.
    Started,
    /// The twist was dropped because another twist is in progress, there was
    /// no twist to perform, or the touched slot does not exist.
    Ignored,
}
