//! Boundary-layer prism shell creation.
//!
//! [`CreateBoundaryLayerShell`] turns the boundary-layer surface of a grid into
//! a one-cell-thick shell of wedges and keeps the planar patches that border
//! the layer attached to the pushed-out surface.
//!
//! # Phases
//! 1. [`prepare`](CreateBoundaryLayerShell::prepare): strip the volume cells,
//!    find the patches adjacent to the layer, fit and validate their planes,
//!    compute the offset field and snapshot the grid.
//! 2. [`create_prismatic_grid`](CreateBoundaryLayerShell::create_prismatic_grid):
//!    build the shell and move the layer nodes of the working grid outward.
//! 3. [`correct_adjacent_bc`](CreateBoundaryLayerShell::correct_adjacent_bc):
//!    relax every adjacent patch on its plane.
//!
//! The phases must run in this order: relaxation averages over the displaced
//! layer nodes.
//!
//! # Example
//! ```rust
//! # fn try_main() -> Result<(), mesh_prism_shell::mesh_error::MeshError> {
//! use mesh_prism_shell::algs::boundary_layer::{
//!     CreateBoundaryLayerShell, ShellConfig, UniformOffset,
//! };
//! use mesh_prism_shell::data::bc::BoundaryConditions;
//! use mesh_prism_shell::topology::cell_type::CellType;
//! use mesh_prism_shell::topology::grid::Grid;
//!
//! let mut grid = Grid::new();
//! for x in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
//!     grid.add_point(x);
//! }
//! for tri in [[0, 1, 2], [0, 2, 3]] {
//!     let id = grid.insert_next_cell(CellType::Triangle, &tri)?;
//!     grid.set_cell_code(id, 1)?;
//! }
//!
//! let mut op = CreateBoundaryLayerShell::new(
//!     ShellConfig::with_layer_codes([1]),
//!     BoundaryConditions::new(),
//!     UniformOffset([0.0, 0.0, 1.0]),
//! );
//! let shell = op.operate(&mut grid)?;
//! assert_eq!(shell.grid.num_cells(), 4);
//! assert_eq!(shell.grid.num_points(), 8);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

pub mod config;
pub mod extrude;
pub mod planarity;
pub mod relax;
pub mod vectors;

use std::collections::{BTreeMap, BTreeSet};

pub use config::ShellConfig;
pub use extrude::{PrismaticShell, build_node_map, create_prismatic_grid};
pub use planarity::{PatchPlane, fit_adjacent_planes, fit_patch_plane, layer_adjacent_codes};
pub use relax::{RelaxOptions, RelaxationReport, correct_adjacent_bc};
pub use vectors::{BoundaryLayerVectors, NormalOffset, UniformOffset};

use crate::algs::delete_volume::delete_volume_cells;
use crate::data::bc::BoundaryConditions;
use crate::mesh_error::MeshError;
use crate::topology::grid::Grid;
use crate::topology::partition::MeshPartition;

/// Boundary-layer shell operation over a working grid.
///
/// The operation owns its settings, the boundary-condition names used in
/// error messages, and the offset field provider. Per-run state (adjacency,
/// planes, offset field, original snapshot) is rebuilt by every
/// [`prepare`](Self::prepare).
#[derive(Debug)]
pub struct CreateBoundaryLayerShell<V> {
    config: ShellConfig,
    bcs: BoundaryConditions,
    vectors: V,
    part: MeshPartition,
    layer_cells: Vec<usize>,
    adjacent_codes: BTreeSet<i32>,
    planes: BTreeMap<i32, PatchPlane>,
    layer_vectors: Vec<[f64; 3]>,
    original: Grid,
    reports: Vec<RelaxationReport>,
}

impl<V: BoundaryLayerVectors> CreateBoundaryLayerShell<V> {
    pub fn new(config: ShellConfig, bcs: BoundaryConditions, vectors: V) -> Self {
        Self {
            config,
            bcs,
            vectors,
            part: MeshPartition::default(),
            layer_cells: Vec::new(),
            adjacent_codes: BTreeSet::new(),
            planes: BTreeMap::new(),
            layer_vectors: Vec::new(),
            original: Grid::new(),
            reports: Vec::new(),
        }
    }

    /// Runs all phases on `grid` and returns the prism shell.
    ///
    /// On return `grid` holds the surface with the layer pushed out and the
    /// adjacent patches relaxed.
    pub fn operate(&mut self, grid: &mut Grid) -> Result<PrismaticShell, MeshError> {
        self.prepare(grid)?;
        let mut shell = self.create_prismatic_grid(grid)?;
        let codes: Vec<i32> = self.adjacent_codes.iter().copied().collect();
        for bc in codes {
            self.correct_adjacent_bc(grid, bc)?;
        }
        self.finalise(grid, &mut shell)?;
        Ok(shell)
    }

    /// Strips volume cells and computes everything the later phases need.
    pub fn prepare(&mut self, grid: &mut Grid) -> Result<(), MeshError> {
        self.config.validate()?;
        delete_volume_cells(grid);
        self.part = MeshPartition::track_grid(grid)?;
        self.reports.clear();

        self.layer_cells = grid.surface_cells(&self.config.layer_codes);
        self.adjacent_codes =
            layer_adjacent_codes(grid, &self.part, &self.layer_cells, &self.config.layer_codes)?;
        log::debug!(
            "boundary layer: {} layer cells, adjacent codes {:?}",
            self.layer_cells.len(),
            self.adjacent_codes
        );

        self.planes = fit_adjacent_planes(
            grid,
            &self.adjacent_codes,
            self.config.planarity_tolerance,
            &self.bcs,
        )?;

        self.layer_vectors = self.vectors.compute(grid, &self.config.layer_codes)?;
        self.original = grid.clone();
        Ok(())
    }

    /// Builds the shell and moves the layer nodes of `grid` outward.
    pub fn create_prismatic_grid(&mut self, grid: &mut Grid) -> Result<PrismaticShell, MeshError> {
        create_prismatic_grid(
            grid,
            &self.original,
            &self.part,
            &self.config.layer_codes,
            &self.layer_vectors,
        )
    }

    /// Relaxes the nodes of adjacent patch `bc` onto its plane.
    pub fn correct_adjacent_bc(
        &mut self,
        grid: &mut Grid,
        bc: i32,
    ) -> Result<RelaxationReport, MeshError> {
        let plane = self.planes.get(&bc).copied().ok_or_else(|| {
            MeshError::internal(format!("no fitted plane for adjacent boundary code {bc}"))
        })?;
        let opts = RelaxOptions {
            max_iterations: self.config.relax_max_iterations,
            min_alignment: self.config.relax_min_alignment,
        };
        let report = correct_adjacent_bc(grid, &self.part, bc, &plane, opts)?;
        log::debug!(
            "relaxed boundary {bc}: {} nodes, {} rounds, min alignment {:.3}",
            report.moved_nodes,
            report.rounds,
            report.min_alignment
        );
        self.reports.push(report);
        Ok(report)
    }

    /// Post-processing hook; currently does nothing.
    pub fn finalise(
        &mut self,
        _grid: &mut Grid,
        _shell: &mut PrismaticShell,
    ) -> Result<(), MeshError> {
        Ok(())
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Non-layer codes bordering the layer, found by the last `prepare`.
    pub fn adjacent_codes(&self) -> &BTreeSet<i32> {
        &self.adjacent_codes
    }

    /// Fitted planes of the adjacent patches.
    pub fn planes(&self) -> &BTreeMap<i32, PatchPlane> {
        &self.planes
    }

    /// Offset field computed by the last `prepare`.
    pub fn boundary_layer_vectors(&self) -> &[[f64; 3]] {
        &self.layer_vectors
    }

    /// Grid as it was before extrusion.
    pub fn original_grid(&self) -> &Grid {
        &self.original
    }

    pub fn relaxation_reports(&self) -> &[RelaxationReport] {
        &self.reports
    }
}
