//! Extrusion of the layer surface into a one-cell-thick prism shell.
//!
//! # Shell layout
//! The shell grid holds two rings of `N` points each, `N` being the number of
//! distinct nodes of the layer triangles:
//! - base ring `0..N`: the layer nodes at their current position,
//! - offset ring `N..2N`: the same nodes displaced by their offset vector.
//!
//! For every layer triangle `(a, b, c)` (shell-local ids) the shell receives
//! the triangle itself, with the source cell code, and the wedge
//! `(a, b, c, a + N, b + N, c + N)` with the default code.
//!
//! The working grid's layer nodes are moved to the offset ring positions as
//! part of the extrusion; the adjacent-boundary relaxation that follows relies
//! on seeing the displaced surface.

use std::collections::BTreeSet;

use crate::geometry::metrics::add;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use crate::topology::grid::Grid;
use crate::topology::partition::MeshPartition;

/// Output of [`create_prismatic_grid`].
#[derive(Clone, Debug, Default)]
pub struct PrismaticShell {
    /// Triangles (base ring) and wedges.
    pub grid: Grid,
    /// Number of points per ring.
    pub ring_size: usize,
    /// Working grid node id → shell-local base ring id.
    pub node_map: Vec<Option<usize>>,
    /// Boundary codes of the source node, for every shell point.
    pub node_boundary_codes: Vec<Vec<i32>>,
}

impl PrismaticShell {
    /// Number of layer triangles the shell was built from.
    pub fn num_triangles(&self) -> usize {
        self.grid.num_cells() / 2
    }
}

/// Maps every node of `shell_part` to its partition-local index.
///
/// Partition nodes are in ascending global order, so the map is stable across
/// rebuilds over the same cells.
pub fn build_node_map(
    shell_part: &MeshPartition,
    num_points: usize,
) -> Result<Vec<Option<usize>>, MeshError> {
    let mut node_map = vec![None; num_points];
    for (i, &node) in shell_part.nodes().iter().enumerate() {
        let slot = node_map.get_mut(node).ok_or_else(|| {
            MeshError::internal(format!(
                "shell partition node {node} outside grid of {num_points} points"
            ))
        })?;
        *slot = Some(i);
    }
    Ok(node_map)
}

/// Builds the prism shell over the layer surface of `grid`.
///
/// `original` is the snapshot of `grid` taken before extrusion; `part` is the
/// adjacency oracle of `grid`; `vectors` holds one offset per node of `grid`.
/// Layer nodes of `grid` are moved to their offset position.
pub fn create_prismatic_grid(
    grid: &mut Grid,
    original: &Grid,
    part: &MeshPartition,
    layer_codes: &BTreeSet<i32>,
    vectors: &[[f64; 3]],
) -> Result<PrismaticShell, MeshError> {
    let original_triangles = original.surface_cells(layer_codes);
    let shell_triangles = grid.surface_cells(layer_codes);
    if original_triangles != shell_triangles {
        return Err(MeshError::internal(format!(
            "layer surface changed since preparation: {} original vs {} current cells",
            original_triangles.len(),
            shell_triangles.len()
        )));
    }
    if vectors.len() != grid.num_points() {
        return Err(MeshError::internal(format!(
            "offset field has {} vectors for {} nodes",
            vectors.len(),
            grid.num_points()
        )));
    }
    if let Some(&cell) = shell_triangles
        .iter()
        .find(|&&c| grid.cells()[c].kind() != CellType::Triangle)
    {
        return Err(MeshError::InvalidGeometry(format!(
            "layer cell {cell} is a {:?}; only triangles can be extruded to wedges",
            grid.cells()[cell].kind()
        )));
    }

    let shell_part = MeshPartition::from_cells(grid, shell_triangles.iter().copied())?;
    let ring_size = shell_part.num_nodes();
    let mut shell = Grid::allocate(2 * shell_part.num_cells(), 2 * ring_size);
    let node_map = build_node_map(&shell_part, grid.num_points())?;
    let mut node_boundary_codes = vec![Vec::new(); 2 * ring_size];

    for (node, local) in node_map.iter().enumerate() {
        let Some(local) = *local else { continue };
        let x = grid.point(node)?;
        shell.set_point(local, x)?;
        let x = add(x, vectors[node]);
        shell.set_point(local + ring_size, x)?;
        grid.set_point(node, x)?;
        for &bc in part.node_boundary_codes(node) {
            node_boundary_codes[local].push(bc);
            node_boundary_codes[local + ring_size].push(bc);
        }
    }

    for &cell in &shell_triangles {
        let pts = grid.cell_points(cell)?;
        let mut tri = [0usize; 3];
        let mut pri = [0usize; 6];
        for (i, &p) in pts.iter().enumerate() {
            let local = node_map[p].ok_or_else(|| {
                MeshError::internal(format!("node {p} of layer cell {cell} is not mapped"))
            })?;
            if local >= ring_size {
                return Err(MeshError::internal(format!(
                    "node {p} of layer cell {cell} maps to {local}, inside the offset ring (size {ring_size})"
                )));
            }
            tri[i] = local;
            pri[i] = local;
            pri[i + 3] = local + ring_size;
        }
        let id_tri = shell.insert_next_cell(CellType::Triangle, &tri)?;
        shell.insert_next_cell(CellType::Prism, &pri)?;
        shell.copy_cell_data(grid, cell, id_tri)?;
    }

    log::debug!(
        "prismatic shell: {} triangles, {} points per ring",
        shell_triangles.len(),
        ring_size
    );
    Ok(PrismaticShell {
        grid: shell,
        ring_size,
        node_map,
        node_boundary_codes,
    })
}
