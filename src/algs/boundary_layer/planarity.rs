//! Plane fitting and planarity validation of the patches bordering the layer.
//!
//! For each adjacent boundary code the patch's surface cells are fitted with a
//! plane through the area-weighted centroid, oriented along the summed area
//! normal. A patch is accepted when every cell centroid lies within
//! `tolerance * L` of that plane, where `L` is the smallest
//! equilateral-equivalent edge length `sqrt(4 A / sqrt(3))` over the patch.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::bc::BoundaryConditions;
use crate::geometry::metrics::{add, cell_centre, cell_normal, dot, norm, normalise, scale, sub};
use crate::mesh_error::MeshError;
use crate::topology::grid::Grid;
use crate::topology::partition::MeshPartition;

/// Fitted plane of an adjacent boundary patch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchPlane {
    /// Unit normal.
    pub normal: [f64; 3],
    /// Area-weighted centroid of the patch.
    pub origin: [f64; 3],
}

impl PatchPlane {
    /// Signed distance of `x` along the plane normal.
    #[inline]
    pub fn signed_distance(&self, x: [f64; 3]) -> f64 {
        dot(sub(x, self.origin), self.normal)
    }

    /// Orthogonal projection of `x` onto the plane.
    #[inline]
    pub fn project(&self, x: [f64; 3]) -> [f64; 3] {
        sub(x, scale(self.normal, self.signed_distance(x)))
    }
}

/// Codes of the cells adjacent to `layer_cells` that are not layer codes.
pub fn layer_adjacent_codes(
    grid: &Grid,
    part: &MeshPartition,
    layer_cells: &[usize],
    layer_codes: &BTreeSet<i32>,
) -> Result<BTreeSet<i32>, MeshError> {
    let mut adjacent = BTreeSet::new();
    for &cell in layer_cells {
        for &neigh in part.cell_neighbours(cell) {
            let bc = grid.cell_code(neigh)?;
            if !layer_codes.contains(&bc) {
                adjacent.insert(bc);
            }
        }
    }
    Ok(adjacent)
}

/// Fits the plane of patch `bc` and checks that the patch is planar.
///
/// `tolerance` is the fraction of the patch length scale `L` a centroid may
/// deviate from the fitted plane. The error names the patch through `bcs`.
pub fn fit_patch_plane(
    grid: &Grid,
    bc: i32,
    tolerance: f64,
    bcs: &BoundaryConditions,
) -> Result<PatchPlane, MeshError> {
    let cells = grid.surface_cells(&[bc]);

    let mut length = f64::INFINITY;
    let mut n0 = [0.0; 3];
    let mut x0 = [0.0; 3];
    let mut total_area = 0.0;
    for &cell in &cells {
        let n = cell_normal(grid, cell)?;
        let area = norm(n);
        total_area += area;
        n0 = add(n0, n);
        x0 = add(x0, scale(cell_centre(grid, cell)?, area));
        length = length.min((4.0 * area / 3f64.sqrt()).sqrt());
    }
    if total_area <= 0.0 {
        return Err(MeshError::InvalidGeometry(format!(
            "boundary \"{}\" has no surface area",
            bcs.name(bc)
        )));
    }
    let plane = PatchPlane {
        normal: normalise(n0)?,
        origin: scale(x0, 1.0 / total_area),
    };

    let limit = tolerance * length;
    for &cell in &cells {
        let distance = plane.signed_distance(cell_centre(grid, cell)?).abs();
        if distance > limit {
            return Err(MeshError::NonPlanarBoundary {
                name: bcs.name(bc),
                code: bc,
                distance,
                tolerance: limit,
            });
        }
    }
    log::debug!(
        "patch {bc}: {} cells, normal {:?}, origin {:?}, L = {length:.3e}",
        cells.len(),
        plane.normal,
        plane.origin
    );
    Ok(plane)
}

/// Fits and validates every adjacent patch; the first non-planar patch aborts.
pub fn fit_adjacent_planes(
    grid: &Grid,
    adjacent_codes: &BTreeSet<i32>,
    tolerance: f64,
    bcs: &BoundaryConditions,
) -> Result<BTreeMap<i32, PatchPlane>, MeshError> {
    adjacent_codes
        .iter()
        .map(|&bc| Ok((bc, fit_patch_plane(grid, bc, tolerance, bcs)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::CellType;

    /// 2x1 strip of unit squares in the plane z = 0, split into four triangles
    /// tagged `code`.
    fn strip(code: i32) -> Grid {
        let mut g = Grid::new();
        for j in 0..2 {
            for i in 0..3 {
                g.add_point([i as f64, j as f64, 0.0]);
            }
        }
        for (a, b, c, d) in [(0, 1, 4, 3), (1, 2, 5, 4)] {
            for tri in [[a, b, c], [a, c, d]] {
                let id = g.insert_next_cell(CellType::Triangle, &tri).unwrap();
                g.set_cell_code(id, code).unwrap();
            }
        }
        g
    }

    #[test]
    fn flat_patch_fits_exactly() {
        let g = strip(3);
        let plane = fit_patch_plane(&g, 3, 0.1, &BoundaryConditions::new()).unwrap();
        assert!((plane.normal[2] - 1.0).abs() < 1e-12);
        assert!((plane.origin[0] - 1.0).abs() < 1e-12);
        assert!((plane.origin[1] - 0.5).abs() < 1e-12);
        assert!(plane.origin[2].abs() < 1e-12);
    }

    #[test]
    fn lifted_node_fails_with_patch_name() {
        let mut g = strip(3);
        g.set_point(5, [2.0, 1.0, 1.5]).unwrap();
        let bcs: BoundaryConditions = [(3, "floor")].into_iter().collect();
        match fit_patch_plane(&g, 3, 0.1, &bcs) {
            Err(MeshError::NonPlanarBoundary { name, code, .. }) => {
                assert_eq!(name, "floor");
                assert_eq!(code, 3);
            }
            other => panic!("expected NonPlanarBoundary, got {other:?}"),
        }
    }

    #[test]
    fn missing_patch_is_invalid_geometry() {
        let g = strip(3);
        assert!(matches!(
            fit_patch_plane(&g, 99, 0.1, &BoundaryConditions::new()),
            Err(MeshError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn projection_lands_on_plane() {
        let plane = PatchPlane {
            normal: [0.0, 0.0, 1.0],
            origin: [0.0, 0.0, 2.0],
        };
        assert_eq!(plane.project([1.0, 2.0, 5.0]), [1.0, 2.0, 2.0]);
        assert_eq!(plane.signed_distance([0.0, 0.0, 1.0]), -1.0);
    }
}
