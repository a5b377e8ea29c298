use twistmath::IndexOverflow;

use crate::LogicalIndex;

/// Error produced when generating a puzzle layout.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum LayoutError {
    #[error("puzzle order must be at least 2, got {0}")]
    OrderTooSmall(usize),
    #[error("puzzle order {order} is too large")]
    OrderTooLarge {
        order: usize,
        #[source]
        source: IndexOverflow,
    },
    #[error("edge length must be positive and finite, got {0}")]
    BadEdgeLength(f64),
    #[error("puzzle center must be finite")]
    BadCenter,
}

/// Error produced when parsing twist notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown twist {0:?}")]
pub struct ParseTwistError(pub String);

/// Error produced when logical indices no longer form a permutation of the
/// canonical index space.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ReconcileError {
    #[error("logical index {0} is assigned to more than one sub-cube")]
    DuplicateIndex(LogicalIndex),
    #[error("logical index {0} is outside the canonical index space")]
    OutOfRange(LogicalIndex),
    #[error("logical index {0} is not assigned to any sub-cube")]
    MissingIndex(LogicalIndex),
}
