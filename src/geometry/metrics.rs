//! Geometry queries on grid cells: area normals, centroids and surface tests.
//!
//! Surface cell normals are *area vectors*: their direction follows the
//! right-hand rule on the vertex ordering and their magnitude equals the cell
//! area. Quadrilaterals are split into the fan `(0, 1, 2)`, `(0, 2, 3)`.

use crate::mesh_error::MeshError;
use crate::topology::grid::Grid;

const EPS: f64 = 1e-300;

/// True when `cell` is a boundary face (triangle or quad).
pub fn is_surface(cell: usize, grid: &Grid) -> Result<bool, MeshError> {
    Ok(grid.cell(cell)?.is_surface())
}

/// Area vector of a surface cell.
pub fn cell_normal(grid: &Grid, cell: usize) -> Result<[f64; 3], MeshError> {
    let record = grid.cell(cell)?;
    if !record.is_surface() {
        return Err(MeshError::InvalidGeometry(format!(
            "cell {cell} ({:?}) has no single normal",
            record.kind()
        )));
    }
    let nodes = record.nodes();
    let x0 = grid.point(nodes[0])?;
    let mut n = [0.0; 3];
    for pair in nodes[1..].windows(2) {
        let a = grid.point(pair[0])?;
        let b = grid.point(pair[1])?;
        n = add(n, scale(cross(sub(a, x0), sub(b, x0)), 0.5));
    }
    Ok(n)
}

/// Vertex average of a cell.
pub fn cell_centre(grid: &Grid, cell: usize) -> Result<[f64; 3], MeshError> {
    let nodes = grid.cell_points(cell)?;
    let mut x = [0.0; 3];
    for &n in nodes {
        x = add(x, grid.point(n)?);
    }
    Ok(scale(x, 1.0 / nodes.len() as f64))
}

/// Unit vector along `a`, or an error for a zero vector.
pub fn normalise(a: [f64; 3]) -> Result<[f64; 3], MeshError> {
    let len = norm(a);
    if !len.is_finite() || len <= EPS {
        return Err(MeshError::InvalidGeometry(
            "cannot normalise a zero-length vector".into(),
        ));
    }
    Ok(scale(a, 1.0 / len))
}

#[inline]
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
