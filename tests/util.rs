#![allow(dead_code)]
use mesh_prism_shell::topology::cell_type::CellType;
use mesh_prism_shell::topology::grid::Grid;

/// Add triangles with a shared code.
pub fn add_triangles(grid: &mut Grid, tris: &[[usize; 3]], code: i32) {
    for tri in tris {
        let id = grid.insert_next_cell(CellType::Triangle, tri).unwrap();
        grid.set_cell_code(id, code).unwrap();
    }
}

/// Unit square at z = 0 split into two triangles, both tagged `code`.
pub fn flat_square(code: i32) -> Grid {
    let mut g = Grid::new();
    for x in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
        g.add_point(x);
    }
    add_triangles(&mut g, &[[0, 1, 2], [0, 2, 3]], code);
    g
}

/// 3x3 node floor on z = 0 (code `floor`) with a wall of height 1 standing on
/// every outer floor edge (code `wall`).
///
/// Nodes 0..9 are the floor, row-major in y; nodes 9..17 are the wall tops in
/// the order of the boundary loop 0, 1, 2, 5, 8, 7, 6, 3. Only the floor centre
/// node 4 carries the floor code alone.
pub fn floor_with_walls(floor: i32, wall: i32) -> Grid {
    let mut g = Grid::new();
    for j in 0..3 {
        for i in 0..3 {
            g.add_point([i as f64, j as f64, 0.0]);
        }
    }
    for (a, b, c, d) in [(0, 1, 4, 3), (1, 2, 5, 4), (3, 4, 7, 6), (4, 5, 8, 7)] {
        add_triangles(&mut g, &[[a, b, c], [a, c, d]], floor);
    }
    let ring = [0, 1, 2, 5, 8, 7, 6, 3];
    let tops: Vec<usize> = ring
        .iter()
        .map(|&n| {
            let x = g.point(n).unwrap();
            g.add_point([x[0], x[1], 1.0])
        })
        .collect();
    for k in 0..ring.len() {
        let l = (k + 1) % ring.len();
        let (a, b, ta, tb) = (ring[k], ring[l], tops[k], tops[l]);
        add_triangles(&mut g, &[[a, b, tb], [a, tb, ta]], wall);
    }
    g
}

/// Regular hexagon fan of unit radius around node 0 at the origin, in z = 0.
pub fn hexagon_fan(code: i32) -> Grid {
    let mut g = Grid::new();
    g.add_point([0.0; 3]);
    for k in 0..6 {
        let a = k as f64 * std::f64::consts::PI / 3.0;
        g.add_point([a.cos(), a.sin(), 0.0]);
    }
    let tris: Vec<[usize; 3]> = (0..6).map(|k| [0, 1 + k, 1 + (k + 1) % 6]).collect();
    add_triangles(&mut g, &tris, code);
    g
}

/// Apply `f` to every point of `grid`.
pub fn map_points(grid: &mut Grid, f: impl Fn([f64; 3]) -> [f64; 3]) {
    for n in 0..grid.num_points() {
        let x = grid.point(n).unwrap();
        grid.set_point(n, f(x)).unwrap();
    }
}

pub fn assert_close(a: [f64; 3], b: [f64; 3], tol: f64) {
    for k in 0..3 {
        assert!((a[k] - b[k]).abs() <= tol, "{a:?} != {b:?} (tol {tol})");
    }
}
