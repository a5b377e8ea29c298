use smallvec::SmallVec;

use crate::{LogicalIndex, Puzzle, SubCubeId, Twist};

/// Set of sub-cubes that turn together.
pub type Layer = SmallVec<[SubCubeId; 9]>;

/// Returns the sub-cubes in the layer that contains the slot `touched` and is
/// perpendicular to the axis of `twist`.
///
/// U/D twists select a row, F/B twists select a column, and L/R twists
/// select a depth layer. Returns an empty layer if `twist` is `None` or
/// `touched` is not a valid logical index.
pub fn select_layer(puzzle: &Puzzle, touched: LogicalIndex, twist: Option<Twist>) -> Layer {
    let Some(twist) = twist else {
        return Layer::new();
    };
    let Some(touched_coords) = puzzle.grid_coords(touched) else {
        log::warn!("no sub-cube with logical index {touched}");
        return Layer::new();
    };
    let axis = twist.face.axis();
    let layer_coord = touched_coords.along(axis);

    let layer: Layer = puzzle
        .cubes()
        .iter_filter(|_, cube| {
            puzzle
                .grid_coords(cube.index)
                .is_some_and(|coords| coords.along(axis) == layer_coord)
        })
        .collect();
    log::trace!(
        "{twist} at index {touched} selected {} sub-cubes in layer {layer_coord} along {axis}",
        layer.len(),
    );
    layer
}
