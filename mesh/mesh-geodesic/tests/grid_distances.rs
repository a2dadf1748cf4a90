//! Distance fields on a regular planar grid, where the true geodesic
//! distance is the Euclidean one.

#![allow(clippy::unwrap_used, clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use mesh_geodesic::{
    DistanceField, DistanceSolver, EdgeDijkstra, GeodesicError, HeatMethod, HeatParams,
    OperatorProvider, SolveRequest,
};
use mesh_types::{IndexedMesh, Vertex};

const N: usize = 11;

/// `N x N` vertices on the unit square, each cell split along its
/// (i, j) - (i + 1, j + 1) diagonal.
fn grid() -> IndexedMesh {
    let mut mesh = IndexedMesh::new();
    let step = 1.0 / (N - 1) as f64;
    for j in 0..N {
        for i in 0..N {
            mesh.vertices
                .push(Vertex::from_coords(i as f64 * step, j as f64 * step, 0.0));
        }
    }
    for j in 0..N - 1 {
        for i in 0..N - 1 {
            let a = idx(i, j);
            let b = idx(i + 1, j);
            let c = idx(i + 1, j + 1);
            let d = idx(i, j + 1);
            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        }
    }
    mesh
}

fn idx(i: usize, j: usize) -> u32 {
    (j * N + i) as u32
}

fn heat(mesh: &IndexedMesh, origins: &[u32]) -> DistanceField {
    let solver = HeatMethod::default();
    let operators = solver.precompute(mesh).unwrap();
    solver
        .solve_blocking(SolveRequest::new(origins, mesh, &operators))
        .unwrap()
}

fn dijkstra(mesh: &IndexedMesh, origins: &[u32]) -> DistanceField {
    let adjacency = EdgeDijkstra.precompute(mesh).unwrap();
    EdgeDijkstra
        .solve_blocking(SolveRequest::new(origins, mesh, &adjacency))
        .unwrap()
}

fn at(field: &DistanceField, i: usize, j: usize) -> f64 {
    field.distance(idx(i, j) as usize)
}

#[test]
fn heat_from_corner_approximates_euclidean() {
    let mesh = grid();
    let field = heat(&mesh, &[idx(0, 0)]);

    assert_eq!(field.len(), N * N);
    assert_eq!(field.unresolved_count(), 0);
    assert!(at(&field, 0, 0).abs() < 1e-9);

    let edge = at(&field, N - 1, 0);
    let diagonal = at(&field, N - 1, N - 1);
    assert!((edge - 1.0).abs() < 0.15, "edge distance {edge}");

    let ratio = diagonal / edge;
    assert!((1.2..1.65).contains(&ratio), "ratio {ratio}");
    assert_eq!(field.farthest_vertex().unwrap().0, idx(N - 1, N - 1) as usize);
}

#[test]
fn heat_distance_grows_away_from_origin() {
    let mesh = grid();
    let field = heat(&mesh, &[idx(0, 0)]);

    for i in 1..N {
        assert!(
            at(&field, i, 0) > at(&field, i - 1, 0),
            "not increasing at column {i}"
        );
        assert!(at(&field, i, i) > at(&field, i - 1, i - 1));
    }
    assert!(field.as_slice().iter().all(|d| *d >= 0.0));
}

#[test]
fn dijkstra_follows_edges() {
    let mesh = grid();
    let field = dijkstra(&mesh, &[idx(0, 0)]);

    assert!((at(&field, N - 1, 0) - 1.0).abs() < 1e-12);
    assert!((at(&field, N - 1, N - 1) - 2.0_f64.sqrt()).abs() < 1e-12);
    // No diagonal runs the other way, so this corner costs a full L-path.
    assert!((at(&field, 0, N - 1) - 1.0).abs() < 1e-12);
}

#[test]
fn heat_never_far_above_edge_distance() {
    let mesh = grid();
    let origins = [idx(3, 7)];
    let smooth = heat(&mesh, &origins);
    let edges = dijkstra(&mesh, &origins);

    for v in 0..mesh.vertices.len() {
        assert!(
            smooth.distance(v) <= edges.distance(v) * 1.15 + 0.05,
            "vertex {v}: heat {} edges {}",
            smooth.distance(v),
            edges.distance(v)
        );
    }
}

#[test]
fn multiple_origins_take_nearest() {
    let mesh = grid();
    let origins = [idx(0, 0), idx(N - 1, 0)];

    let edges = dijkstra(&mesh, &origins);
    assert!((at(&edges, 5, 0) - 0.5).abs() < 1e-12);
    assert!(at(&edges, N - 1, 0).abs() < 1e-12);

    let smooth = heat(&mesh, &origins);
    assert!(at(&smooth, 0, 0).abs() < 1e-9);
    assert!(at(&smooth, N - 1, 0).abs() < 1e-9);
    assert!((at(&smooth, 5, 0) - 0.5).abs() < 0.1);
    assert!(at(&smooth, 5, 0) > at(&smooth, 2, 0));
}

#[test]
fn disconnected_component_is_unresolved() {
    let mut mesh = grid();
    let base = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::from_coords(5.0, 5.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(6.0, 5.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(5.0, 6.0, 0.0));
    mesh.faces.push([base, base + 1, base + 2]);

    for field in [heat(&mesh, &[0]), dijkstra(&mesh, &[0])] {
        assert_eq!(field.unresolved_count(), 3);
        assert!(field.distance(base as usize).is_nan());
        assert!(field.is_resolved(0));
        assert!(field.max_distance().is_finite());
    }

    // An origin on each island resolves everything.
    let both = heat(&mesh, &[0, base]);
    assert_eq!(both.unresolved_count(), 0);
    assert!(both.distance(base as usize).abs() < 1e-9);
}

#[test]
fn async_solve_matches_blocking() {
    let mesh = grid();
    let solver = HeatMethod::new(HeatParams::interactive());
    let operators = solver.precompute(&mesh).unwrap();
    let sources = [idx(5, 5)];
    let request = SolveRequest::new(&sources, &mesh, &operators);

    let blocking = solver.solve_blocking(request).unwrap();
    let awaited = pollster::block_on(solver.solve(request)).unwrap();
    assert_eq!(blocking, awaited);
}

#[test]
fn request_errors() {
    let mesh = grid();
    let solver = HeatMethod::default();
    let operators = solver.precompute(&mesh).unwrap();

    let err = solver
        .solve_blocking(SolveRequest::new(&[], &mesh, &operators))
        .unwrap_err();
    assert_eq!(err, GeodesicError::NoOrigins);

    let err = solver
        .solve_blocking(SolveRequest::new(&[500], &mesh, &operators))
        .unwrap_err();
    assert!(matches!(err, GeodesicError::InvalidVertex { index: 500, .. }));
}
