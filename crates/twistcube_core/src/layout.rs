//! Canonical grid layout of sub-cubes.

use twistmath::cgmath::vec3;
use twistmath::prelude::*;

use crate::{Face, LayoutError, LogicalIndex, SubCubeId};

/// Parameters that determine the canonical layout of a puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutParams {
    /// Number of sub-cubes along each edge of the puzzle.
    pub order: usize,
    /// Edge length of a single sub-cube.
    pub edge_length: Float,
    /// Center of the puzzle, in the puzzle's local frame.
    pub center: Point3<Float>,
}
impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            order: 3,
            edge_length: 10.0,
            center: Point3::new(0.0, 0.0, 0.0),
        }
    }
}
impl LayoutParams {
    /// Returns an error if the parameters cannot produce a valid layout.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.order < 2 {
            return Err(LayoutError::OrderTooSmall(self.order));
        }
        let last = self
            .order
            .checked_pow(3)
            .map_or(usize::MAX, |count| count - 1);
        if let Err(source) = SubCubeId::try_from_usize(last) {
            return Err(LayoutError::OrderTooLarge {
                order: self.order,
                source,
            });
        }
        if !(self.edge_length.is_finite() && self.edge_length > 0.0) {
            return Err(LayoutError::BadEdgeLength(self.edge_length));
        }
        if ![self.center.x, self.center.y, self.center.z]
            .iter()
            .all(|x| x.is_finite())
        {
            return Err(LayoutError::BadCenter);
        }
        Ok(())
    }

    /// Returns the total number of sub-cubes.
    pub fn sub_cube_count(&self) -> usize {
        self.order.pow(3)
    }

    /// Returns the corner of the grid from which all coordinates decrease.
    pub fn corner(&self) -> Point3<Float> {
        let half_extent = self.order as Float * self.edge_length / 2.0;
        self.center + vec3(half_extent, half_extent, half_extent)
    }

    /// Returns the canonical center of the sub-cube at `coords`.
    pub fn grid_position(&self, coords: GridCoords) -> Point3<Float> {
        let l = self.edge_length;
        let offset = |n: usize| l / 2.0 + n as Float * l;
        let corner = self.corner();
        Point3::new(
            corner.x - offset(coords.depth),
            corner.y - offset(coords.row),
            corner.z - offset(coords.col),
        )
    }
}

/// Position of a sub-cube in generation order.
///
/// The depth layer runs along X, the row along Y, and the column along Z.
/// Each coordinate counts from the positive side of its axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridCoords {
    /// Depth layer `i`.
    pub depth: usize,
    /// Row within the depth layer.
    pub row: usize,
    /// Column within the depth layer.
    pub col: usize,
}
impl GridCoords {
    /// Returns the coordinates of the `flat`th sub-cube in generation order.
    pub fn from_flat(flat: usize, order: usize) -> Self {
        let j = flat % (order * order);
        Self {
            depth: flat / (order * order),
            row: j / order,
            col: j % order,
        }
    }
    /// Returns the position of the sub-cube in generation order.
    pub fn to_flat(self, order: usize) -> usize {
        (self.depth * order + self.row) * order + self.col
    }

    /// Returns the coordinate along `axis`.
    pub fn along(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.depth,
            Axis::Y => self.row,
            Axis::Z => self.col,
        }
    }

    /// Returns coordinates of a sub-cube in the outermost layer of `face`.
    pub fn outer_layer(face: Face, order: usize) -> Self {
        let layer = match face.sign() {
            Sign::Pos => 0,
            Sign::Neg => order - 1,
        };
        let mut ret = Self {
            depth: 0,
            row: 0,
            col: 0,
        };
        match face.axis() {
            Axis::X => ret.depth = layer,
            Axis::Y => ret.row = layer,
            Axis::Z => ret.col = layer,
        }
        ret
    }
}

/// Position and logical index of a sub-cube at generation time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanonicalEntry {
    /// Logical index assigned at generation time.
    pub index: LogicalIndex,
    /// Center of the sub-cube at generation time.
    pub position: Point3<Float>,
}

/// Generates the canonical snapshot, in generation order.
pub fn generate_layout(params: &LayoutParams) -> Result<Vec<CanonicalEntry>, LayoutError> {
    params.validate()?;
    let ret = (0..params.sub_cube_count())
        .map(|flat| CanonicalEntry {
            index: flat as LogicalIndex,
            position: params.grid_position(GridCoords::from_flat(flat, params.order)),
        })
        .collect();
    Ok(ret)
}
