//! MeshError: Unified error type for mesh-prism-shell public APIs
//!
//! Two kinds of failure leave the boundary-layer operation. A
//! [`MeshError::NonPlanarBoundary`] is a data error the caller can report and
//! fix (the adjacent patch must be flat). A
//! [`MeshError::InternalInconsistency`] means an earlier step produced a state
//! that must never happen; callers should not try to recover from it.

use thiserror::Error;

use crate::topology::cell_type::CellType;

/// Unified error type for mesh-prism-shell operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// An adjacent boundary patch deviates from its fitted plane.
    #[error(
        "The boundary \"{name}\" (code {code}) is not planar: \
         centroid distance {distance:.3e} exceeds tolerance {tolerance:.3e}"
    )]
    NonPlanarBoundary {
        name: String,
        code: i32,
        distance: f64,
        tolerance: f64,
    },
    /// Broken internal invariant (node map, partition or shell sizing).
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
    /// A cell was built with the wrong number of vertices for its kind.
    #[error("invalid cell: {kind:?} expects {expected} vertices, got {got}")]
    InvalidCell {
        kind: CellType,
        expected: usize,
        got: usize,
    },
    /// A node index is outside the grid's point range.
    #[error("node {node} out of range (grid has {len} points)")]
    NodeOutOfRange { node: usize, len: usize },
    /// A cell index is outside the grid's cell range.
    #[error("cell {cell} out of range (grid has {len} cells)")]
    CellOutOfRange { cell: usize, len: usize },
    /// Geometry that cannot be evaluated (zero area, zero normal, ...).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Rejected shell configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MeshError {
    /// Shorthand for an [`MeshError::InternalInconsistency`].
    pub fn internal(details: impl Into<String>) -> Self {
        MeshError::InternalInconsistency(details.into())
    }

    /// True for broken invariants that no retry or user fix can resolve.
    pub fn is_internal(&self) -> bool {
        matches!(self, MeshError::InternalInconsistency(_))
    }
}
