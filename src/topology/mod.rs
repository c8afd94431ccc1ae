//! Top-level module for mesh topology.
//!
//! This module provides the unstructured grid and the adjacency built over it:
//! - [`CellType`] with its vertex count and local edge/face tables
//! - [`Grid`] and [`Cell`], the point array and tagged cell records
//! - [`MeshPartition`], CSR cell/node adjacency over a subset of cells
//!
//! Most users build a [`Grid`] and let the algorithms derive a
//! [`MeshPartition`] from it.

pub mod cell_type;
pub mod grid;
pub mod partition;

pub use cell_type::CellType;
pub use grid::{Cell, DEFAULT_CELL_CODE, Grid};
pub use partition::MeshPartition;
