//! Puzzle state: sub-cubes, their transforms, and their logical indices.

use twistmath::cgmath::{EuclideanSpace, SquareMatrix, Transform};
use twistmath::idx_struct;
use twistmath::prelude::*;

use crate::{
    CanonicalEntry, Face, GridCoords, Layer, LayoutError, LayoutParams, LogicalIndex,
    Reconciliation, ReconcileError, Twist, generate_layout,
};

idx_struct! {
    /// Stable handle to a sub-cube in a [`Puzzle`].
    pub struct SubCubeId(pub u16);
}

/// One of the `order³` pieces of the puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SubCube {
    /// Center of the sub-cube at generation time.
    pub home: Point3<Float>,
    /// Accumulated rigid transform applied since generation.
    pub transform: Matrix4<Float>,
    /// Logical index of the grid slot the sub-cube currently occupies.
    pub index: LogicalIndex,
}
impl SubCube {
    /// Returns the current center of the sub-cube.
    pub fn position(&self) -> Point3<Float> {
        self.transform.transform_point(self.home)
    }
    /// Returns the transform that takes a sub-cube mesh centered at the origin
    /// to its current place in the puzzle.
    pub fn render_transform(&self) -> Matrix4<Float> {
        self.transform * Matrix4::from_translation(self.home.to_vec())
    }
}

/// Cube puzzle of arbitrary order.
#[derive(Debug, Clone)]
pub struct Puzzle {
    params: LayoutParams,
    canonical: Vec<CanonicalEntry>,
    min_index: LogicalIndex,
    cubes: GenericVec<SubCubeId, SubCube>,
    /// Sub-cube holding each logical index, offset by `min_index`.
    slots: Vec<SubCubeId>,
}
impl Puzzle {
    /// Generates a puzzle in its solved state.
    pub fn new(params: LayoutParams) -> Result<Self, LayoutError> {
        let canonical = generate_layout(&params)?;
        let min_index = canonical.iter().map(|entry| entry.index).min().unwrap_or(0);
        let cubes: GenericVec<SubCubeId, SubCube> = canonical
            .iter()
            .map(|entry| SubCube {
                home: entry.position,
                transform: Matrix4::identity(),
                index: entry.index,
            })
            .collect();
        let slots = cubes.iter_keys().collect();
        log::debug!(
            "generated {0}x{0}x{0} puzzle with {1} sub-cubes",
            params.order,
            cubes.len(),
        );
        Ok(Self {
            params,
            canonical,
            min_index,
            cubes,
            slots,
        })
    }

    /// Returns the layout parameters.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }
    /// Returns the number of sub-cubes along each edge.
    pub fn order(&self) -> usize {
        self.params.order
    }
    /// Returns the point that all twists rotate around.
    pub fn pivot(&self) -> Point3<Float> {
        self.params.center
    }
    /// Returns the canonical snapshot taken at generation time.
    pub fn canonical(&self) -> &[CanonicalEntry] {
        &self.canonical
    }
    /// Returns the smallest logical index.
    pub fn min_index(&self) -> LogicalIndex {
        self.min_index
    }
    /// Returns all sub-cubes.
    pub fn cubes(&self) -> &GenericVec<SubCubeId, SubCube> {
        &self.cubes
    }

    /// Returns the sub-cube that currently holds a logical index.
    pub fn cube_at(&self, index: LogicalIndex) -> Option<SubCubeId> {
        let offset = index.checked_sub(self.min_index)?;
        self.slots.get(offset as usize).copied()
    }
    /// Returns the grid coordinates of a logical index.
    pub fn grid_coords(&self, index: LogicalIndex) -> Option<GridCoords> {
        let offset = index.checked_sub(self.min_index)? as usize;
        (offset < self.canonical.len()).then(|| GridCoords::from_flat(offset, self.order()))
    }
    /// Returns the logical index of a slot in the outermost layer of `face`.
    pub fn face_representative(&self, face: Face) -> LogicalIndex {
        let flat = GridCoords::outer_layer(face, self.order()).to_flat(self.order());
        self.min_index + flat as LogicalIndex
    }

    /// Applies `transform` to each sub-cube in `layer`, on top of its existing
    /// transform.
    pub fn apply_transform(&mut self, layer: &[SubCubeId], transform: Matrix4<Float>) {
        for &id in layer {
            if let Ok(cube) = self.cubes.get_mut(id) {
                cube.transform = transform * cube.transform;
            }
        }
    }
    /// Rounds the transform of each sub-cube in `layer` to the nearest
    /// composition of quarter turns about the pivot.
    pub fn snap_transforms(&mut self, layer: &[SubCubeId]) {
        let pivot = self.pivot();
        for &id in layer {
            if let Ok(cube) = self.cubes.get_mut(id) {
                cube.transform = snap_quarter_turns(cube.transform, pivot);
            }
        }
    }

    /// Assigns new logical indices to some sub-cubes and recomputes the index
    /// lookup table. If the resulting indices are not a permutation, nothing
    /// is changed and an error is returned.
    pub(crate) fn relabel(
        &mut self,
        relabeled: &[(SubCubeId, LogicalIndex)],
    ) -> Result<(), ReconcileError> {
        let mut overrides = vec![None; self.cubes.len()];
        for &(id, index) in relabeled {
            if let Some(slot) = overrides.get_mut(id.to_usize()) {
                *slot = Some(index);
            }
        }
        self.slots = self.index_slots(|id, cube| {
            overrides.get(id.to_usize()).copied().flatten().unwrap_or(cube.index)
        })?;
        for &(id, index) in relabeled {
            if let Ok(cube) = self.cubes.get_mut(id) {
                cube.index = index;
            }
        }
        Ok(())
    }

    /// Returns an error if the logical indices are not exactly
    /// `min_index..min_index + order³`.
    pub fn check_permutation(&self) -> Result<(), ReconcileError> {
        self.index_slots(|_, cube| cube.index).map(|_| ())
    }
    fn index_slots(
        &self,
        index_of: impl Fn(SubCubeId, &SubCube) -> LogicalIndex,
    ) -> Result<Vec<SubCubeId>, ReconcileError> {
        let mut slots = vec![None; self.cubes.len()];
        for (id, cube) in self.cubes.iter() {
            let index = index_of(id, cube);
            let slot = index
                .checked_sub(self.min_index)
                .and_then(|offset| slots.get_mut(offset as usize))
                .ok_or(ReconcileError::OutOfRange(index))?;
            if slot.replace(id).is_some() {
                return Err(ReconcileError::DuplicateIndex(index));
            }
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(offset, id)| {
                id.ok_or(ReconcileError::MissingIndex(self.min_index + offset as LogicalIndex))
            })
            .collect()
    }

    /// Returns whether every sub-cube is back at its generation-time
    /// transform.
    pub fn is_solved(&self) -> bool {
        let identity = Matrix4::identity();
        self.cubes
            .iter_values()
            .all(|cube| approx_eq(&cube.transform, &identity))
    }

    /// Applies a twist to the layer containing `touched` immediately, without
    /// animation, and returns the layer that moved.
    pub fn twist(
        &mut self,
        touched: LogicalIndex,
        twist: Twist,
    ) -> Result<(Layer, Reconciliation), ReconcileError> {
        let layer = crate::select_layer(self, touched, Some(twist));
        self.apply_transform(&layer, twist.transform(self.pivot(), QUARTER_TURN));
        self.snap_transforms(&layer);
        let reconciliation = crate::reconcile(self, &layer)?;
        Ok((layer, reconciliation))
    }
}
