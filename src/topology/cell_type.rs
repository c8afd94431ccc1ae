//! Cell type metadata for grid cells.

/// Cell kinds stored in a [`Grid`](crate::topology::grid::Grid).
///
/// Vertex ordering follows the usual unstructured-grid convention:
/// - **Triangle**: `[v0, v1, v2]`.
/// - **Quadrilateral**: `[v0, v1, v2, v3]`.
/// - **Tetrahedron**: `[v0, v1, v2, v3]`.
/// - **Pyramid**: base quad `[0, 1, 2, 3]`, apex `4`.
/// - **Prism** (wedge): bottom triangle `[0, 1, 2]`, top triangle `[3, 4, 5]`
///   with `i + 3` above `i`.
/// - **Hexahedron**: bottom face `[0, 1, 2, 3]`, top face `[4, 5, 6, 7]`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D pyramid.
    Pyramid,
    /// 3D wedge/prism.
    Prism,
    /// 3D tensor-product cell (hex).
    Hexahedron,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Pyramid | CellType::Prism | CellType::Hexahedron => 3,
        }
    }

    /// Number of vertices a cell of this kind references.
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Prism => 6,
            CellType::Hexahedron => 8,
        }
    }

    /// Surface (boundary face) cells are the 2D kinds.
    pub fn is_surface(self) -> bool {
        self.dimension() == 2
    }

    /// Local vertex pairs forming the edges of the cell.
    pub fn edges(self) -> &'static [(usize, usize)] {
        match self {
            CellType::Triangle => &TRI_EDGES,
            CellType::Quadrilateral => &QUAD_EDGES,
            CellType::Tetrahedron => &TET_EDGES,
            CellType::Pyramid => &PYRAMID_EDGES,
            CellType::Prism => &PRISM_EDGES,
            CellType::Hexahedron => &HEX_EDGES,
        }
    }

    /// Local vertex lists of the faces of a volume cell.
    ///
    /// Surface cells return a single face covering the whole cell.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            CellType::Triangle => &TRI_FACES,
            CellType::Quadrilateral => &QUAD_FACES,
            CellType::Tetrahedron => &TET_FACES,
            CellType::Pyramid => &PYRAMID_FACES,
            CellType::Prism => &PRISM_FACES,
            CellType::Hexahedron => &HEX_FACES,
        }
    }
}

const TRI_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];
const QUAD_EDGES: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];
const TET_EDGES: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];
const PYRAMID_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (0, 4),
    (1, 4),
    (2, 4),
    (3, 4),
];
const PRISM_EDGES: [(usize, usize); 9] = [
    (0, 1),
    (1, 2),
    (2, 0),
    (3, 4),
    (4, 5),
    (5, 3),
    (0, 3),
    (1, 4),
    (2, 5),
];
const HEX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

const TRI_FACE: [usize; 3] = [0, 1, 2];
const QUAD_FACE: [usize; 4] = [0, 1, 2, 3];
const TET_FACE_0: [usize; 3] = [0, 1, 2];
const TET_FACE_1: [usize; 3] = [0, 1, 3];
const TET_FACE_2: [usize; 3] = [1, 2, 3];
const TET_FACE_3: [usize; 3] = [0, 2, 3];
const PYRAMID_FACE_0: [usize; 4] = [0, 1, 2, 3];
const PYRAMID_FACE_1: [usize; 3] = [0, 1, 4];
const PYRAMID_FACE_2: [usize; 3] = [1, 2, 4];
const PYRAMID_FACE_3: [usize; 3] = [2, 3, 4];
const PYRAMID_FACE_4: [usize; 3] = [3, 0, 4];
const PRISM_FACE_0: [usize; 3] = [0, 1, 2];
const PRISM_FACE_1: [usize; 3] = [3, 4, 5];
const PRISM_FACE_2: [usize; 4] = [0, 1, 4, 3];
const PRISM_FACE_3: [usize; 4] = [1, 2, 5, 4];
const PRISM_FACE_4: [usize; 4] = [2, 0, 3, 5];
const HEX_FACE_0: [usize; 4] = [0, 1, 2, 3];
const HEX_FACE_1: [usize; 4] = [4, 5, 6, 7];
const HEX_FACE_2: [usize; 4] = [0, 1, 5, 4];
const HEX_FACE_3: [usize; 4] = [1, 2, 6, 5];
const HEX_FACE_4: [usize; 4] = [2, 3, 7, 6];
const HEX_FACE_5: [usize; 4] = [3, 0, 4, 7];

const TRI_FACES: [&[usize]; 1] = [&TRI_FACE];
const QUAD_FACES: [&[usize]; 1] = [&QUAD_FACE];
const TET_FACES: [&[usize]; 4] = [&TET_FACE_0, &TET_FACE_1, &TET_FACE_2, &TET_FACE_3];
const PYRAMID_FACES: [&[usize]; 5] = [
    &PYRAMID_FACE_0,
    &PYRAMID_FACE_1,
    &PYRAMID_FACE_2,
    &PYRAMID_FACE_3,
    &PYRAMID_FACE_4,
];
const PRISM_FACES: [&[usize]; 5] = [
    &PRISM_FACE_0,
    &PRISM_FACE_1,
    &PRISM_FACE_2,
    &PRISM_FACE_3,
    &PRISM_FACE_4,
];
const HEX_FACES: [&[usize]; 6] = [
    &HEX_FACE_0,
    &HEX_FACE_1,
    &HEX_FACE_2,
    &HEX_FACE_3,
    &HEX_FACE_4,
    &HEX_FACE_5,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_indices_within_vertex_count() {
        for kind in [
            CellType::Triangle,
            CellType::Quadrilateral,
            CellType::Tetrahedron,
            CellType::Pyramid,
            CellType::Prism,
            CellType::Hexahedron,
        ] {
            let n = kind.vertex_count();
            assert!(kind.faces().iter().flat_map(|f| f.iter()).all(|&i| i < n));
            assert!(kind.edges().iter().all(|&(a, b)| a < n && b < n));
        }
    }

    #[test]
    fn only_2d_kinds_are_surface() {
        assert!(CellType::Triangle.is_surface());
        assert!(CellType::Quadrilateral.is_surface());
        assert!(!CellType::Prism.is_surface());
        assert!(!CellType::Tetrahedron.is_surface());
    }
}
