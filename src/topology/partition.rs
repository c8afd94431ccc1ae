//! `MeshPartition`: adjacency oracle over a subset of grid cells.
//!
//! A partition is built from a grid and a list of cell ids and answers, in
//! global (grid) numbering:
//! - cell → neighbour cells (sharing an edge for surface cells, a face for
//!   volume cells),
//! - node → neighbour nodes (connected by a cell edge),
//! - node → incident cells,
//! - node → boundary codes of the incident surface cells.
//!
//! Determinism:
//! - Partition nodes are numbered in ascending global id, so rebuilding a
//!   partition over unchanged cells yields the same local numbering.
//! - Every neighbour list is sorted and deduplicated.
//!
//! Adjacency is topological only; moving points does not invalidate it.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::mesh_error::MeshError;
use crate::topology::grid::Grid;

/// CSR storage of one adjacency relation, indexed by local id.
#[derive(Debug, Clone, Default)]
struct Csr<T> {
    xadj: Vec<usize>,
    adjncy: Vec<T>,
}

impl<T> Csr<T> {
    fn from_lists(lists: Vec<Vec<T>>) -> Self {
        let mut xadj = Vec::with_capacity(lists.len() + 1);
        xadj.push(0);
        let mut adjncy = Vec::new();
        for list in lists {
            adjncy.extend(list);
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    #[inline]
    fn row(&self, i: usize) -> &[T] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }
}

/// Adjacency queries for a set of cells of a [`Grid`].
#[derive(Debug, Clone, Default)]
pub struct MeshPartition {
    cells: Vec<usize>,
    nodes: Vec<usize>,
    local_cell: HashMap<usize, usize>,
    local_node: HashMap<usize, usize>,
    c2c: Csr<usize>,
    n2n: Csr<usize>,
    n2c: Csr<usize>,
    n2bc: Csr<i32>,
}

impl MeshPartition {
    /// Partition over every cell of `grid`.
    pub fn track_grid(grid: &Grid) -> Result<Self, MeshError> {
        Self::from_cells(grid, 0..grid.num_cells())
    }

    /// Partition restricted to `cells` (kept in the given order, duplicates
    /// removed).
    pub fn from_cells(
        grid: &Grid,
        cells: impl IntoIterator<Item = usize>,
    ) -> Result<Self, MeshError> {
        let cells: Vec<usize> = cells.into_iter().unique().collect();
        let mut local_cell = HashMap::with_capacity(cells.len());
        for (i, &c) in cells.iter().enumerate() {
            grid.cell(c)?;
            local_cell.insert(c, i);
        }

        let nodes: Vec<usize> = cells
            .iter()
            .flat_map(|&c| grid.cells()[c].nodes().iter().copied())
            .sorted_unstable()
            .dedup()
            .collect();
        let local_node: HashMap<usize, usize> =
            nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

        let mut n2c = vec![Vec::new(); nodes.len()];
        let mut n2n = vec![Vec::new(); nodes.len()];
        let mut n2bc = vec![Vec::new(); nodes.len()];
        let mut facets: HashMap<Vec<usize>, Vec<usize>> = HashMap::new();

        for &c in &cells {
            let cell = &grid.cells()[c];
            let cn = cell.nodes();
            for &n in cn {
                let ln = local_node[&n];
                n2c[ln].push(c);
                if cell.is_surface() {
                    n2bc[ln].push(cell.code());
                }
            }
            for &(a, b) in cell.kind().edges() {
                n2n[local_node[&cn[a]]].push(cn[b]);
                n2n[local_node[&cn[b]]].push(cn[a]);
            }
            for key in facet_keys(cell.is_surface(), cell.kind(), cn) {
                facets.entry(key).or_default().push(c);
            }
        }

        let mut c2c = vec![Vec::new(); cells.len()];
        for sharing in facets.values() {
            for (&a, &b) in sharing.iter().tuple_combinations() {
                c2c[local_cell[&a]].push(b);
                c2c[local_cell[&b]].push(a);
            }
        }

        let sort_dedup = |lists: Vec<Vec<usize>>| -> Vec<Vec<usize>> {
            lists
                .into_iter()
                .map(|l| l.into_iter().sorted_unstable().dedup().collect())
                .collect()
        };
        let n2bc: Vec<Vec<i32>> = n2bc
            .into_iter()
            .map(|l| l.into_iter().sorted_unstable().dedup().collect())
            .collect();

        Ok(Self {
            c2c: Csr::from_lists(sort_dedup(c2c)),
            n2n: Csr::from_lists(sort_dedup(n2n)),
            n2c: Csr::from_lists(sort_dedup(n2c)),
            n2bc: Csr::from_lists(n2bc),
            cells,
            nodes,
            local_cell,
            local_node,
        })
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes of the partition, ascending global id.
    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Partition-local id of the global `node`, if it belongs to the partition.
    #[inline]
    fn local_node(&self, node: usize) -> Option<usize> {
        self.local_node.get(&node).copied()
    }

    /// Neighbour cells of a global `cell`; empty for cells outside the partition.
    pub fn cell_neighbours(&self, cell: usize) -> &[usize] {
        match self.local_cell.get(&cell) {
            Some(&i) => self.c2c.row(i),
            None => &[],
        }
    }

    /// Edge-connected neighbour nodes of a global `node`.
    pub fn node_neighbours(&self, node: usize) -> &[usize] {
        match self.local_node(node) {
            Some(i) => self.n2n.row(i),
            None => &[],
        }
    }

    /// Cells incident to a global `node`.
    pub fn node_cells(&self, node: usize) -> &[usize] {
        match self.local_node(node) {
            Some(i) => self.n2c.row(i),
            None => &[],
        }
    }

    /// Sorted distinct codes of the surface cells incident to a global `node`.
    pub fn node_boundary_codes(&self, node: usize) -> &[i32] {
        match self.local_node(node) {
            Some(i) => self.n2bc.row(i),
            None => &[],
        }
    }
}

/// Sorted node keys of the entities through which cells become neighbours.
fn facet_keys(
    surface: bool,
    kind: crate::topology::cell_type::CellType,
    nodes: &[usize],
) -> Vec<Vec<usize>> {
    if surface {
        kind.edges()
            .iter()
            .map(|&(a, b)| vec![nodes[a].min(nodes[b]), nodes[a].max(nodes[b])])
            .collect()
    } else {
        kind.faces()
            .iter()
            .map(|face| face.iter().map(|&i| nodes[i]).sorted_unstable().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::CellType;

    /// Two triangles (codes 1, 2) sharing edge 1-2 of the unit square.
    fn two_triangles() -> Grid {
        let mut g = Grid::new();
        for x in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]] {
            g.add_point(x);
        }
        let a = g.insert_next_cell(CellType::Triangle, &[0, 1, 2]).unwrap();
        let b = g.insert_next_cell(CellType::Triangle, &[1, 3, 2]).unwrap();
        g.set_cell_code(a, 1).unwrap();
        g.set_cell_code(b, 2).unwrap();
        g
    }

    #[test]
    fn edge_sharing_triangles_are_neighbours() {
        let g = two_triangles();
        let part = MeshPartition::track_grid(&g).unwrap();
        assert_eq!(part.cell_neighbours(0), &[1]);
        assert_eq!(part.cell_neighbours(1), &[0]);
    }

    #[test]
    fn node_queries() {
        let g = two_triangles();
        let part = MeshPartition::track_grid(&g).unwrap();
        assert_eq!(part.num_nodes(), 4);
        assert_eq!(part.node_neighbours(0), &[1, 2]);
        assert_eq!(part.node_neighbours(1), &[0, 2, 3]);
        assert_eq!(part.node_cells(2), &[0, 1]);
        assert_eq!(part.node_boundary_codes(1), &[1, 2]);
        assert_eq!(part.node_boundary_codes(3), &[2]);
    }

    #[test]
    fn subset_partition_is_local() {
        let g = two_triangles();
        let part = MeshPartition::from_cells(&g, [1]).unwrap();
        assert_eq!(part.num_cells(), 1);
        assert_eq!(part.nodes(), &[1, 2, 3]);
        assert_eq!(part.local_node(0), None);
        assert_eq!(part.local_node(3), Some(2));
        assert!(part.cell_neighbours(1).is_empty());
        assert!(part.node_neighbours(0).is_empty());
    }

    #[test]
    fn tets_sharing_a_face() {
        let mut g = Grid::new();
        for x in [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ] {
            g.add_point(x);
        }
        g.insert_next_cell(CellType::Tetrahedron, &[0, 1, 2, 3]).unwrap();
        g.insert_next_cell(CellType::Tetrahedron, &[0, 2, 1, 4]).unwrap();
        let part = MeshPartition::track_grid(&g).unwrap();
        assert_eq!(part.cell_neighbours(0), &[1]);
        assert!(part.node_boundary_codes(0).is_empty());
    }

    #[test]
    fn hex_and_pyramid_share_the_quad_face() {
        let mut g = Grid::new();
        for k in 0..2 {
            for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
                g.add_point([x, y, k as f64]);
            }
        }
        let apex = g.add_point([0.5, 0.5, 1.5]);
        g.insert_next_cell(CellType::Hexahedron, &[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        g.insert_next_cell(CellType::Pyramid, &[4, 5, 6, 7, apex]).unwrap();
        let part = MeshPartition::track_grid(&g).unwrap();
        assert_eq!(part.cell_neighbours(0), &[1]);
        assert_eq!(part.cell_neighbours(1), &[0]);
        assert_eq!(part.node_neighbours(apex), &[4, 5, 6, 7]);
        assert_eq!(part.node_neighbours(0), &[1, 3, 4]);
        assert_eq!(part.node_cells(5), &[0, 1]);
    }

    #[test]
    fn unknown_cell_is_rejected() {
        let g = two_triangles();
        assert!(matches!(
            MeshPartition::from_cells(&g, [5]),
            Err(MeshError::CellOutOfRange { cell: 5, len: 2 })
        ));
    }
}
