//! # mesh-prism-shell
//!
//! mesh-prism-shell builds a one-cell-thick shell of wedge (prism) cells over the
//! boundary-layer surface of an unstructured grid. The layer surface is pushed
//! out along a per-node offset field, and the planar boundary patches bordering
//! the layer are relaxed so they stay planar and well shaped.
//!
//! ## Features
//! - Unstructured grid with tagged triangle, quad, tet, pyramid, prism and hex cells
//! - CSR cell/node adjacency with per-node boundary-code sets
//! - Planarity validation of the patches adjacent to the layer
//! - Prism shell extrusion with a stable node map between grid and shell
//! - Plane-constrained Laplacian relaxation of adjacent patches
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-prism-shell = "0.1"
//! ```
//!
//! The entry point is
//! [`CreateBoundaryLayerShell::operate`](crate::algs::boundary_layer::CreateBoundaryLayerShell::operate).
//! Progress is reported through the [`log`] facade; install any logger to see it.

pub mod algs;
pub mod data;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary_layer::{
        BoundaryLayerVectors, CreateBoundaryLayerShell, NormalOffset, PatchPlane,
        PrismaticShell, RelaxOptions, RelaxationReport, ShellConfig, UniformOffset,
    };
    pub use crate::algs::delete_volume::delete_volume_cells;
    pub use crate::data::bc::BoundaryConditions;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::grid::{Cell, DEFAULT_CELL_CODE, Grid};
    pub use crate::topology::partition::MeshPartition;
}
