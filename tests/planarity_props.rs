use std::collections::BTreeSet;

use mesh_prism_shell::algs::boundary_layer::{fit_adjacent_planes, fit_patch_plane};
use mesh_prism_shell::prelude::*;
use proptest::prelude::*;

mod util;
use util::{assert_close, hexagon_fan, map_points};

fn rotate(x: [f64; 3], yaw: f64, pitch: f64) -> [f64; 3] {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let x = [cy * x[0] - sy * x[1], sy * x[0] + cy * x[1], x[2]];
    [x[0], cp * x[1] - sp * x[2], sp * x[1] + cp * x[2]]
}

fn moved_fan(lift: f64, scale: f64, yaw: f64, pitch: f64, shift: [f64; 3]) -> Grid {
    let mut g = hexagon_fan(7);
    let mut x = g.point(1).unwrap();
    x[2] += lift;
    g.set_point(1, x).unwrap();
    map_points(&mut g, |x| {
        let r = rotate([x[0] * scale, x[1] * scale, x[2] * scale], yaw, pitch);
        [r[0] + shift[0], r[1] + shift[1], r[2] + shift[2]]
    });
    g
}

fn bcs() -> BoundaryConditions {
    BoundaryConditions::from_iter([(7, "outlet")])
}

proptest! {
    #[test]
    fn rigid_motion_keeps_flat_patch_planar(
        yaw in -3.0f64..3.0,
        pitch in -3.0f64..3.0,
        sx in -50.0f64..50.0,
        sy in -50.0f64..50.0,
        sz in -50.0f64..50.0,
    ) {
        let g = moved_fan(0.0, 1.0, yaw, pitch, [sx, sy, sz]);
        let plane = fit_patch_plane(&g, 7, 0.1, &bcs()).unwrap();
        assert_close(plane.normal, rotate([0.0, 0.0, 1.0], yaw, pitch), 1e-9);
        for n in 0..g.num_points() {
            prop_assert!(plane.signed_distance(g.point(n).unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn small_lift_is_accepted_at_any_scale(
        lift in -0.5f64..0.5,
        scale in 0.01f64..100.0,
        yaw in -3.0f64..3.0,
        pitch in -3.0f64..3.0,
    ) {
        let g = moved_fan(lift, scale, yaw, pitch, [1.0, 2.0, 3.0]);
        prop_assert!(fit_patch_plane(&g, 7, 0.1, &bcs()).is_ok());
    }

    #[test]
    fn large_lift_is_rejected_at_any_scale(
        lift in 1.5f64..8.0,
        scale in 0.01f64..100.0,
        yaw in -3.0f64..3.0,
        pitch in -3.0f64..3.0,
    ) {
        let g = moved_fan(lift, scale, yaw, pitch, [1.0, 2.0, 3.0]);
        let err = fit_patch_plane(&g, 7, 0.1, &bcs()).unwrap_err();
        let is_non_planar = matches!(err, MeshError::NonPlanarBoundary { code: 7, .. });
        prop_assert!(is_non_planar);
        prop_assert!(err.to_string().contains("outlet"));
    }
}

#[test]
fn looser_tolerance_accepts_what_default_rejects() {
    let g = moved_fan(1.5, 1.0, 0.0, 0.0, [0.0; 3]);
    assert!(fit_patch_plane(&g, 7, 0.1, &bcs()).is_err());
    assert!(fit_patch_plane(&g, 7, 0.5, &bcs()).is_ok());
}

#[test]
fn first_bad_patch_aborts_all() {
    let mut g = moved_fan(0.0, 1.0, 0.0, 0.0, [0.0; 3]);
    let mut bent = moved_fan(3.0, 1.0, 0.0, 0.0, [0.0, 0.0, 10.0]);
    for c in 0..bent.num_cells() {
        bent.set_cell_code(c, 8).unwrap();
    }
    let offset = g.num_points();
    for n in 0..bent.num_points() {
        g.add_point(bent.point(n).unwrap());
    }
    for c in bent.cells() {
        let nodes: Vec<usize> = c.nodes().iter().map(|&n| n + offset).collect();
        let id = g.insert_next_cell(c.kind(), &nodes).unwrap();
        g.set_cell_code(id, c.code()).unwrap();
    }

    let err = fit_adjacent_planes(&g, &BTreeSet::from([7, 8]), 0.1, &bcs()).unwrap_err();
    assert!(err.to_string().contains("BC 8"));
    let planes = fit_adjacent_planes(&g, &BTreeSet::from([7]), 0.1, &bcs()).unwrap();
    assert_eq!(planes.len(), 1);
}
