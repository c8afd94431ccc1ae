//! Geometry utilities for mesh-prism-shell.
//!
//! This module provides the cell normal, centroid and surface-classification
//! helpers used by the boundary-layer algorithms.

pub mod metrics;
