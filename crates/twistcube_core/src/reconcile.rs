//! Relabeling of sub-cubes after a twist.

use float_ord::FloatOrd;
use twistmath::cgmath::MetricSpace;
use twistmath::prelude::*;

use crate::{Puzzle, ReconcileError, SubCubeId};

/// Summary of a call to [`reconcile()`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Number of sub-cubes that were relabeled.
    pub relabeled: usize,
    /// Number of sub-cubes that matched no canonical slot within tolerance
    /// and were assigned the nearest one instead.
    pub fallbacks: usize,
}

/// Assigns each sub-cube in `moved` the logical index of the canonical slot
/// it now occupies.
///
/// A slot matches if every axis delta is within half an edge length. If no
/// slot matches, the nearest slot is used and a warning is logged. Returns an
/// error if the resulting indices are not a permutation.
pub fn reconcile(
    puzzle: &mut Puzzle,
    moved: &[SubCubeId],
) -> Result<Reconciliation, ReconcileError> {
    let tolerance = puzzle.params().edge_length / 2.0;
    let mut ret = Reconciliation::default();

    let mut new_indices = vec![];
    for &id in moved {
        let Ok(cube) = puzzle.cubes().get(id) else {
            continue;
        };
        let position = cube.position();
        let canonical = puzzle.canonical();
        let entry = match canonical
            .iter()
            .find(|entry| within_box(position, entry.position, tolerance))
        {
            Some(entry) => entry,
            None => {
                let Some(nearest) = canonical
                    .iter()
                    .min_by_key(|entry| FloatOrd(entry.position.distance2(position)))
                else {
                    continue;
                };
                log::warn!(
                    "sub-cube {id} at {position:?} matches no canonical slot; \
                     using nearest slot {}",
                    nearest.index,
                );
                ret.fallbacks += 1;
                nearest
            }
        };
        new_indices.push((id, entry.index));
    }

    puzzle.relabel(&new_indices)?;
    ret.relabeled = new_indices.len();
    Ok(ret)
}
