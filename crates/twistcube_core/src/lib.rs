//! Cube puzzle model: canonical layout, move resolution, layer selection, and
//! index reconciliation.
//!
//! Nothing in this crate depends on time or input; see `twistcube_view` for
//! animation and gesture handling.

mod error;
mod face;
mod layer;
mod layout;
mod puzzle;
mod reconcile;
mod resolve;

pub use error::{LayoutError, ParseTwistError, ReconcileError};
pub use face::{Face, Twist, TwistDirection, parse_twists};
pub use layer::{Layer, select_layer};
pub use layout::{CanonicalEntry, GridCoords, LayoutParams, generate_layout};
pub use puzzle::{Puzzle, SubCube, SubCubeId};
pub use reconcile::{Reconciliation, reconcile};
pub use resolve::{DEFAULT_AMBIGUITY_TOLERANCE, resolve_twist};
/// Re-export of `twistmath`.
pub use twistmath;

/// Integer identifying a grid slot of the puzzle.
pub type LogicalIndex = u32;
