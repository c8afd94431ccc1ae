//! Remove the volume part of a grid, keeping only its boundary surface.

use crate::topology::grid::{Cell, Grid};

/// Deletes every non-surface cell of `grid` and the points only they used.
///
/// Surviving cells and points keep their relative order, so surface cell
/// codes and point coordinates are unchanged. Returns the number of deleted
/// cells.
pub fn delete_volume_cells(grid: &mut Grid) -> usize {
    let removed = grid.retain_cells(Cell::is_surface);
    log::debug!(
        "delete_volume_cells: {removed} volume cells removed, {} surface cells and {} points left",
        grid.num_cells(),
        grid.num_points()
    );
    removed
}
