//! Offset vector fields for the boundary-layer surface.
//!
//! A provider returns one displacement per grid node. Nodes that are not
//! touched by a layer surface cell get the zero vector.

use std::collections::BTreeSet;

use crate::geometry::metrics::{add, cell_normal, normalise, scale};
use crate::mesh_error::MeshError;
use crate::topology::grid::Grid;

/// Computes the displacement of every layer node.
pub trait BoundaryLayerVectors {
    /// Returns a vector of length `grid.num_points()`.
    fn compute(
        &self,
        grid: &Grid,
        layer_codes: &BTreeSet<i32>,
    ) -> Result<Vec<[f64; 3]>, MeshError>;
}

/// The same displacement for every layer node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformOffset(pub [f64; 3]);

impl BoundaryLayerVectors for UniformOffset {
    fn compute(
        &self,
        grid: &Grid,
        layer_codes: &BTreeSet<i32>,
    ) -> Result<Vec<[f64; 3]>, MeshError> {
        let mut field = vec![[0.0; 3]; grid.num_points()];
        for cell in grid.surface_cells(layer_codes) {
            for &n in grid.cell_points(cell)? {
                field[n] = self.0;
            }
        }
        Ok(field)
    }
}

/// Displacement along the area-weighted node normal of the layer surface.
///
/// Normals follow the winding of the layer cells; a negative `thickness`
/// extrudes against it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalOffset {
    pub thickness: f64,
}

impl BoundaryLayerVectors for NormalOffset {
    fn compute(
        &self,
        grid: &Grid,
        layer_codes: &BTreeSet<i32>,
    ) -> Result<Vec<[f64; 3]>, MeshError> {
        let mut sums: Vec<Option<[f64; 3]>> = vec![None; grid.num_points()];
        for cell in grid.surface_cells(layer_codes) {
            let n = cell_normal(grid, cell)?;
            for &node in grid.cell_points(cell)? {
                let slot = sums[node].get_or_insert([0.0; 3]);
                *slot = add(*slot, n);
            }
        }
        sums.into_iter()
            .enumerate()
            .map(|(node, sum)| match sum {
                None => Ok([0.0; 3]),
                Some(n) => {
                    let v = scale(normalise(n)?, self.thickness);
                    log::trace!("layer vector node={node} v={v:?}");
                    Ok(v)
                }
            })
            .collect()
    }
}
