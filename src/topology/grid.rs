//! Unstructured grid container: points, typed cells, and one integer code per cell.
//!
//! Node and cell ids are 0-based indices into the point and cell arrays.
//! The cell code carries the boundary (or region) tag of a cell; cells that are
//! never tagged keep [`DEFAULT_CELL_CODE`].

use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;

/// Code given to cells that are inserted without copying cell data.
pub const DEFAULT_CELL_CODE: i32 = 0;

/// A single cell record: kind, ordered node ids, and its code.
///
/// Deserialization goes through [`Cell::with_code`], so the vertex count is
/// checked for cells read from data files too.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    kind: CellType,
    nodes: Vec<usize>,
    code: i32,
}

#[derive(serde::Deserialize)]
struct RawCell {
    kind: CellType,
    nodes: Vec<usize>,
    #[serde(default)]
    code: i32,
}

impl TryFrom<RawCell> for Cell {
    type Error = MeshError;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Cell::with_code(raw.kind, raw.nodes, raw.code)
    }
}

impl Cell {
    /// Build a cell, checking the vertex count against `kind`.
    pub fn new(kind: CellType, nodes: impl Into<Vec<usize>>) -> Result<Self, MeshError> {
        Self::with_code(kind, nodes, DEFAULT_CELL_CODE)
    }

    /// Build a cell with an explicit code.
    pub fn with_code(
        kind: CellType,
        nodes: impl Into<Vec<usize>>,
        code: i32,
    ) -> Result<Self, MeshError> {
        let nodes = nodes.into();
        let expected = kind.vertex_count();
        if nodes.len() != expected {
            return Err(MeshError::InvalidCell {
                kind,
                expected,
                got: nodes.len(),
            });
        }
        Ok(Self { kind, nodes, code })
    }

    #[inline]
    pub fn kind(&self) -> CellType {
        self.kind
    }

    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// True for boundary face cells (triangles, quads).
    #[inline]
    pub fn is_surface(&self) -> bool {
        self.kind.is_surface()
    }
}

/// Points plus cells; the mesh every phase of the shell operation works on.
///
/// A deserialized grid is rebuilt cell by cell with [`Grid::push_cell`], so
/// every node id is range-checked.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    points: Vec<[f64; 3]>,
    cells: Vec<Cell>,
}

#[derive(serde::Deserialize)]
struct RawGrid {
    points: Vec<[f64; 3]>,
    #[serde(default)]
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = MeshError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let mut grid = Grid {
            points: raw.points,
            cells: Vec::with_capacity(raw.cells.len()),
        };
        for cell in raw.cells {
            grid.push_cell(cell)?;
        }
        Ok(grid)
    }
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid with `num_points` points at the origin and room for
    /// `num_cells` cells; points are filled in later with [`Grid::set_point`].
    pub fn allocate(num_cells: usize, num_points: usize) -> Self {
        Self {
            points: vec![[0.0; 3]; num_points],
            cells: Vec::with_capacity(num_cells),
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Appends a point and returns its id.
    pub fn add_point(&mut self, x: [f64; 3]) -> usize {
        self.points.push(x);
        self.points.len() - 1
    }

    pub fn point(&self, node: usize) -> Result<[f64; 3], MeshError> {
        self.points
            .get(node)
            .copied()
            .ok_or(MeshError::NodeOutOfRange {
                node,
                len: self.points.len(),
            })
    }

    pub fn set_point(&mut self, node: usize, x: [f64; 3]) -> Result<(), MeshError> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(node)
            .ok_or(MeshError::NodeOutOfRange { node, len })?;
        *slot = x;
        Ok(())
    }

    pub fn cell(&self, cell: usize) -> Result<&Cell, MeshError> {
        self.cells.get(cell).ok_or(MeshError::CellOutOfRange {
            cell,
            len: self.cells.len(),
        })
    }

    /// Ordered node ids of `cell`.
    pub fn cell_points(&self, cell: usize) -> Result<&[usize], MeshError> {
        self.cell(cell).map(Cell::nodes)
    }

    pub fn cell_code(&self, cell: usize) -> Result<i32, MeshError> {
        self.cell(cell).map(Cell::code)
    }

    pub fn set_cell_code(&mut self, cell: usize, code: i32) -> Result<(), MeshError> {
        let len = self.cells.len();
        let slot = self
            .cells
            .get_mut(cell)
            .ok_or(MeshError::CellOutOfRange { cell, len })?;
        slot.code = code;
        Ok(())
    }

    /// Appends a cell with the default code and returns its id.
    ///
    /// Every node id must already exist in the grid.
    pub fn insert_next_cell(&mut self, kind: CellType, nodes: &[usize]) -> Result<usize, MeshError> {
        self.push_cell(Cell::new(kind, nodes)?)
    }

    /// Appends a prebuilt cell and returns its id.
    pub fn push_cell(&mut self, cell: Cell) -> Result<usize, MeshError> {
        let len = self.points.len();
        if let Some(&node) = cell.nodes.iter().find(|&&n| n >= len) {
            return Err(MeshError::NodeOutOfRange { node, len });
        }
        self.cells.push(cell);
        Ok(self.cells.len() - 1)
    }

    /// Copies the per-cell data (the code) of `src_cell` in `src` onto
    /// `dst_cell` of this grid.
    pub fn copy_cell_data(
        &mut self,
        src: &Grid,
        src_cell: usize,
        dst_cell: usize,
    ) -> Result<(), MeshError> {
        let code = src.cell_code(src_cell)?;
        self.set_cell_code(dst_cell, code)
    }

    /// Ids of all surface cells whose code is in `codes`, ascending.
    pub fn surface_cells<'c>(&self, codes: impl IntoIterator<Item = &'c i32>) -> Vec<usize> {
        let codes: Vec<i32> = codes.into_iter().copied().collect();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_surface() && codes.contains(&c.code))
            .map(|(id, _)| id)
            .collect()
    }

    /// Keeps the cells for which `keep` holds, then drops points no longer
    /// referenced by any cell. Relative order of cells and points is kept.
    ///
    /// Returns the number of cells removed.
    pub fn retain_cells<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Cell) -> bool,
    {
        let before = self.cells.len();
        self.cells.retain(|c| keep(c));
        let removed = before - self.cells.len();

        let mut used = vec![false; self.points.len()];
        for cell in &self.cells {
            for &n in &cell.nodes {
                used[n] = true;
            }
        }
        if used.iter().all(|&u| u) {
            return removed;
        }

        let mut new_id = vec![usize::MAX; self.points.len()];
        let mut points = Vec::with_capacity(self.points.len());
        for (old, x) in self.points.iter().enumerate() {
            if used[old] {
                new_id[old] = points.len();
                points.push(*x);
            }
        }
        for cell in &mut self.cells {
            for n in &mut cell.nodes {
                *n = new_id[*n];
            }
        }
        log::debug!(
            "retain_cells: removed {removed} cells and {} unused points",
            self.points.len() - points.len()
        );
        self.points = points;
        removed
    }
}
