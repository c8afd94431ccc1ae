//! Plane-constrained Laplacian relaxation of nodes on an adjacent patch.
//!
//! Nodes whose only boundary code is the patch code are moved, one after the
//! other, to the mean of their neighbour nodes and projected back onto the
//! patch plane. After each round the unit normals of the patch cells around
//! the moved nodes are compared with the plane normal; relaxation stops once
//! the smallest dot product reaches the configured alignment, or when the
//! round cap is hit. Cells without area are left out of the check.
//! Convergence is not guaranteed.

use std::collections::BTreeSet;

use crate::algs::boundary_layer::planarity::PatchPlane;
use crate::geometry::metrics::{add, cell_normal, dot, normalise, scale};
use crate::mesh_error::MeshError;
use crate::topology::grid::Grid;
use crate::topology::partition::MeshPartition;

/// Limits of one relaxation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxOptions {
    pub max_iterations: usize,
    pub min_alignment: f64,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            min_alignment: 0.5,
        }
    }
}

/// What one relaxation run did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxationReport {
    /// Boundary code of the relaxed patch.
    pub code: i32,
    /// Rounds executed (at least one).
    pub rounds: usize,
    /// Nodes moved per round.
    pub moved_nodes: usize,
    /// Smallest normal alignment seen in the last round (1 when nothing moved).
    pub min_alignment: f64,
    /// True when the alignment threshold was reached.
    pub converged: bool,
}

/// Relaxes the nodes of patch `bc` of `grid` towards a smooth, planar state.
///
/// `part` must be the adjacency oracle of `grid`.
pub fn correct_adjacent_bc(
    grid: &mut Grid,
    part: &MeshPartition,
    bc: i32,
    plane: &PatchPlane,
    opts: RelaxOptions,
) -> Result<RelaxationReport, MeshError> {
    let nodes: Vec<usize> = (0..grid.num_points())
        .filter(|&n| part.node_boundary_codes(n) == [bc])
        .collect();
    let cells: BTreeSet<usize> = nodes
        .iter()
        .flat_map(|&n| part.node_cells(n).iter().copied())
        .filter(|&c| grid.cells()[c].is_surface() && grid.cells()[c].code() == bc)
        .collect();

    let mut scal_min = -1.0;
    let mut rounds = 0;
    while scal_min < opts.min_alignment && rounds < opts.max_iterations.max(1) {
        for &node in &nodes {
            let neighbours = part.node_neighbours(node);
            if neighbours.is_empty() {
                continue;
            }
            let mut x = [0.0; 3];
            for &n in neighbours {
                x = add(x, grid.point(n)?);
            }
            x = scale(x, 1.0 / neighbours.len() as f64);
            grid.set_point(node, plane.project(x))?;
        }

        scal_min = 1.0;
        for &cell in &cells {
            // zero-area cells have no direction to compare
            let Ok(n) = normalise(cell_normal(grid, cell)?) else {
                continue;
            };
            scal_min = f64::min(scal_min, dot(n, plane.normal));
        }
        rounds += 1;
        log::trace!("relax bc={bc} round={rounds} min alignment={scal_min:.4}");
    }

    let converged = scal_min >= opts.min_alignment;
    if !converged {
        log::warn!(
            "relaxation of boundary {bc} stopped after {rounds} rounds with min alignment {scal_min:.3} < {}",
            opts.min_alignment
        );
    }
    Ok(RelaxationReport {
        code: bc,
        rounds,
        moved_nodes: nodes.len(),
        min_alignment: scal_min,
        converged,
    })
}
