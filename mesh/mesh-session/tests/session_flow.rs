//! End-to-end session behavior with stub and real solvers.

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::cell::Cell;
use std::io::Write;

use mesh_geodesic::{
    DistanceField, DistanceSolver, EdgeDijkstra, GeodesicError, GeodesicResult,
    OperatorProvider, SolveRequest,
};
use mesh_io::IoError;
use mesh_session::{
    HEAT_PALETTE, Interaction, ORIGIN_MARKER, Rgb, Session, SessionConfig, SessionError,
};
use mesh_types::{IndexedMesh, MeshBounds};

/// Straight-line distance to the nearest origin; fails every solve after
/// the first `budget` ones.
#[derive(Debug, Default)]
struct Euclidean {
    budget: Option<usize>,
    solves: Cell<usize>,
    precomputes: Cell<usize>,
}

impl Euclidean {
    fn failing_after(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            ..Self::default()
        }
    }

    fn run(&self, request: SolveRequest<'_, usize>) -> GeodesicResult<DistanceField> {
        request.validate(*request.operators)?;
        let solves = self.solves.get();
        self.solves.set(solves + 1);
        if self.budget.is_some_and(|b| solves >= b) {
            return Err(GeodesicError::SolverDiverged {
                stage: "stub",
                iterations: 0,
                residual: f64::NAN,
            });
        }
        let mesh = request.mesh;
        let distances = mesh
            .vertices
            .iter()
            .map(|v| {
                request
                    .origins
                    .iter()
                    .map(|&o| (v.position - mesh.vertices[o as usize].position).norm())
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        Ok(DistanceField::from_distances(distances))
    }
}

impl OperatorProvider for Euclidean {
    type Operators = usize;

    fn precompute(&self, mesh: &IndexedMesh) -> GeodesicResult<usize> {
        self.precomputes.set(self.precomputes.get() + 1);
        if mesh.faces.is_empty() {
            return Err(GeodesicError::EmptyMesh);
        }
        Ok(mesh.vertices.len())
    }
}

impl DistanceSolver for Euclidean {
    fn solve(
        &self,
        request: SolveRequest<'_, usize>,
    ) -> impl Future<Output = GeodesicResult<DistanceField>> {
        async move { self.run(request) }
    }
}

/// `n` x `n` quad grid spanning `[0, 10]` in x and y.
fn grid_obj(n: usize) -> String {
    let mut text = String::from("# grid\n");
    let step = 10.0 / n as f64;
    for j in 0..=n {
        for i in 0..=n {
            text.push_str(&format!("v {} {} 0\n", i as f64 * step, j as f64 * step));
        }
    }
    let row = n + 1;
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i + 1;
            text.push_str(&format!("f {a} {} {} {}\n", a + 1, a + row + 1, a + row));
        }
    }
    text
}

fn loaded(solver: Euclidean) -> Session<Euclidean> {
    let mut session = Session::new(solver, SessionConfig::default());
    session.load("grid.obj", grid_obj(8).as_bytes()).unwrap();
    session
}

#[test]
fn load_installs_marker_colors_and_centers_mesh() {
    let session = loaded(Euclidean::default());
    let frame = session.frame().unwrap();

    assert_eq!(frame.generation, 1);
    assert_eq!(frame.mesh.vertices.len(), 81);
    assert_eq!(frame.mesh.faces.len(), 128);
    assert!(frame.colors.iter().all(|c| *c == ORIGIN_MARKER));
    assert!(frame.isolines.is_empty());
    assert!(frame.mesh.center().coords.norm() < 1e-12);

    let normalized = session.normalized().unwrap();
    assert!((normalized.mesh.max_abs_coordinate() - 1.0).abs() < 1e-12);
    assert_eq!(session.operators(), Some(&81));
}

#[test]
fn pick_colors_vertices_and_draws_isolines() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(0)).unwrap();

    let frame = session.frame().unwrap();
    assert_eq!(frame.colors[0], HEAT_PALETTE[0]);
    // The opposite corner is the farthest vertex.
    assert_eq!(frame.colors[80], HEAT_PALETTE[7]);
    assert!(!frame.isolines.is_empty());

    // Isolines live in the centered display frame.
    let bounds = frame.mesh.bounds();
    for s in &frame.isolines.segments {
        for p in [s.start, s.end] {
            assert!(p.x >= bounds.min.x - 1e-9 && p.x <= bounds.max.x + 1e-9);
            assert!(p.y >= bounds.min.y - 1e-9 && p.y <= bounds.max.y + 1e-9);
        }
    }
    assert_eq!(frame.color_buffer().len(), 81 * 3);
}

#[test]
fn second_origin_takes_nearest() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(0)).unwrap();
    session.handle_blocking(Interaction::PickVertex(80)).unwrap();

    let field = session.field().unwrap();
    assert!(field.distance(0).abs() < 1e-12);
    assert!(field.distance(80).abs() < 1e-12);
    assert_eq!(session.origins().as_slice(), &[0, 80]);
    assert_eq!(session.frame().unwrap().colors[80], HEAT_PALETTE[0]);
}

#[test]
fn duplicate_pick_does_not_recompute() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(4)).unwrap();
    session.handle_blocking(Interaction::PickVertex(4)).unwrap();

    assert_eq!(session.origins().len(), 1);
    assert_eq!(session.solver().solves.get(), 1);
}

#[test]
fn operators_are_built_once_per_load() {
    let mut session = loaded(Euclidean::default());
    for v in [1, 2, 3, 40] {
        session.handle_blocking(Interaction::PickVertex(v)).unwrap();
    }
    assert_eq!(session.solver().precomputes.get(), 1);
    assert_eq!(session.solver().solves.get(), 4);
}

#[test]
fn invalid_pick_is_rejected() {
    let mut session = loaded(Euclidean::default());
    let err = session
        .handle_blocking(Interaction::PickVertex(81))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidVertex {
            vertex: 81,
            vertex_count: 81
        }
    ));
    assert!(session.origins().is_empty());
}

#[test]
fn pick_without_mesh() {
    let mut session = Session::new(Euclidean::default(), SessionConfig::default());
    assert!(matches!(
        session.handle_blocking(Interaction::PickVertex(0)),
        Err(SessionError::NoMesh)
    ));
    // Clearing is always allowed.
    session.handle_blocking(Interaction::ClearOrigins).unwrap();
}

#[test]
fn solver_failure_keeps_previous_state() {
    let mut session = loaded(Euclidean::failing_after(1));
    session.handle_blocking(Interaction::PickVertex(0)).unwrap();
    let colors: Vec<Rgb> = session.frame().unwrap().colors.to_vec();
    let isolines = session.frame().unwrap().isolines.clone();
    let field = session.field().cloned();

    let err = session.handle_blocking(Interaction::PickVertex(80)).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Geodesic(GeodesicError::SolverDiverged { .. })
    ));

    assert_eq!(session.origins().as_slice(), &[0]);
    assert_eq!(session.field().cloned(), field);
    let frame = session.frame().unwrap();
    assert_eq!(frame.colors, colors.as_slice());
    assert_eq!(frame.isolines, &isolines);
}

#[test]
fn clear_resets_colors_and_isolines() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(10)).unwrap();
    session.handle_blocking(Interaction::ClearOrigins).unwrap();

    assert!(session.origins().is_empty());
    assert!(session.field().is_none());
    let frame = session.frame().unwrap();
    assert!(frame.colors.iter().all(|c| *c == ORIGIN_MARKER));
    assert!(frame.isolines.is_empty());
    assert_eq!(frame.generation, 1);
}

#[test]
fn malformed_reload_keeps_previous_mesh() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(3)).unwrap();

    let err = session
        .load("broken.off", b"3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n")
        .unwrap_err();
    assert!(matches!(err, SessionError::Io(ref e) if e.is_malformed()));

    let err = session.load("model.stl", b"solid x").unwrap_err();
    assert!(matches!(err, SessionError::Io(IoError::UnsupportedFormat { .. })));

    let frame = session.frame().unwrap();
    assert_eq!(frame.generation, 1);
    assert_eq!(frame.mesh.vertices.len(), 81);
    assert_eq!(session.origins().as_slice(), &[3]);
    assert!(session.field().is_some());
}

#[test]
fn hostile_reload_keeps_previous_mesh() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(3)).unwrap();

    for (name, bytes) in [
        ("nan.obj", &b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv nan 1 0\nf 1 2 3\nf 1 3 4\n"[..]),
        ("inf.off", &b"OFF\n3 1 0\n0 0 0\ninf 0 0\n0 1 0\n3 0 1 2\n"[..]),
        ("huge.off", &b"OFF\n18446744073709551615 0 0\n0 0 0\n"[..]),
    ] {
        let err = session.load(name, bytes).unwrap_err();
        assert!(
            matches!(err, SessionError::Io(ref e) if e.is_malformed()),
            "{name}: {err}"
        );
    }

    let frame = session.frame().unwrap();
    assert_eq!(frame.generation, 1);
    assert_eq!(frame.mesh.vertices.len(), 81);
    assert_eq!(session.origins().as_slice(), &[3]);
}

#[test]
fn failed_precompute_keeps_previous_mesh() {
    let mut session = loaded(Euclidean::default());
    let err = session.load("points.obj", b"v 0 0 0\nv 1 0 0\n").unwrap_err();
    assert!(matches!(err, SessionError::Geodesic(GeodesicError::EmptyMesh)));
    assert_eq!(session.frame().unwrap().generation, 1);
}

#[test]
fn reload_starts_new_generation() {
    let mut session = loaded(Euclidean::default());
    session.handle_blocking(Interaction::PickVertex(3)).unwrap();

    let off = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
    session.load("tri.off", off.as_bytes()).unwrap();

    let frame = session.frame().unwrap();
    assert_eq!(frame.generation, 2);
    assert_eq!(frame.mesh.vertices.len(), 3);
    assert!(frame.colors.iter().all(|c| *c == ORIGIN_MARKER));
    assert!(session.origins().is_empty());
    assert!(session.field().is_none());
}

#[test]
fn load_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".OBJ").tempfile().unwrap();
    file.write_all(grid_obj(3).as_bytes()).unwrap();

    let mut session = Session::new(EdgeDijkstra, SessionConfig::default());
    session.load_path(file.path()).unwrap();
    session.handle_blocking(Interaction::PickVertex(0)).unwrap();

    let field = session.field().unwrap();
    assert_eq!(field.len(), 16);
    assert_eq!(field.unresolved_count(), 0);
}

#[test]
fn heat_method_session() {
    let mut session = Session::heat_method(SessionConfig::interactive().with_level_count(10));
    session.load("grid.obj", grid_obj(10).as_bytes()).unwrap();
    session.handle_blocking(Interaction::PickVertex(60)).unwrap();

    let field = session.field().unwrap();
    assert!(field.distance(60) < 1e-6);
    assert_eq!(field.unresolved_count(), 0);

    let frame = session.frame().unwrap();
    assert_eq!(frame.isolines.level_count, 10);
    assert!(!frame.isolines.is_empty());
    assert_eq!(frame.colors[60], HEAT_PALETTE[0]);
}

#[test]
fn async_handle() {
    let mut session = loaded(Euclidean::default());
    pollster::block_on(session.handle(Interaction::PickVertex(5))).unwrap();
    assert_eq!(session.origins().as_slice(), &[5]);
}
