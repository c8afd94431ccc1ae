//! Settings for the boundary-layer shell operation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;
use crate::topology::grid::DEFAULT_CELL_CODE;

/// Options controlling [`CreateBoundaryLayerShell`](super::CreateBoundaryLayerShell).
///
/// Missing fields take their defaults when deserialized, so a settings file
/// only needs to name the layer codes:
///
/// ```rust
/// use mesh_prism_shell::algs::boundary_layer::ShellConfig;
///
/// let cfg: ShellConfig = serde_json::from_str(r#"{ "layer_codes": [1, 4] }"#).unwrap();
/// assert_eq!(cfg.relax_max_iterations, 20);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Boundary codes of the surface that is extruded.
    pub layer_codes: BTreeSet<i32>,
    /// Allowed centroid distance from the fitted plane, as a fraction of the
    /// smallest equilateral-equivalent edge length of the patch.
    pub planarity_tolerance: f64,
    /// Hard cap on relaxation rounds per adjacent patch.
    pub relax_max_iterations: usize,
    /// Relaxation stops once every checked cell normal has at least this dot
    /// product with the patch normal.
    pub relax_min_alignment: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            layer_codes: BTreeSet::new(),
            planarity_tolerance: 0.1,
            relax_max_iterations: 20,
            relax_min_alignment: 0.5,
        }
    }
}

impl ShellConfig {
    /// Default settings for the given layer codes.
    pub fn with_layer_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            layer_codes: codes.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.layer_codes.is_empty() {
            return Err(MeshError::InvalidConfig(
                "at least one boundary layer code is required".into(),
            ));
        }
        // wedges are emitted with the default code
        if self.layer_codes.contains(&DEFAULT_CELL_CODE) {
            return Err(MeshError::InvalidConfig(format!(
                "boundary layer code {DEFAULT_CELL_CODE} is reserved for untagged cells"
            )));
        }
        if !self.planarity_tolerance.is_finite() || self.planarity_tolerance <= 0.0 {
            return Err(MeshError::InvalidConfig(format!(
                "planarity_tolerance must be positive, got {}",
                self.planarity_tolerance
            )));
        }
        if !(-1.0..=1.0).contains(&self.relax_min_alignment) {
            return Err(MeshError::InvalidConfig(format!(
                "relax_min_alignment must lie in [-1, 1], got {}",
                self.relax_min_alignment
            )));
        }
        Ok(())
    }
}
