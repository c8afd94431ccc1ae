//! Re-export public algorithms.

pub mod boundary_layer;
pub mod delete_volume;

pub use boundary_layer::{CreateBoundaryLayerShell, PrismaticShell, ShellConfig};
pub use delete_volume::delete_volume_cells;
