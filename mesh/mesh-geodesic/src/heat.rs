//! Heat method for geodesic distance.
//!
//! Three steps per solve, all on operators built once per mesh:
//!
//! 1. diffuse heat from the origins for a short time `t`:
//!    `(A - t L) u = delta`
//! 2. normalize the negated heat gradient per face: `X = -grad u / |grad u|`
//! 3. recover the distance whose gradient best matches `X`:
//!    `L phi = div X` with `phi = 0` at the origins
//!
//! Each connected component is then shifted so its smallest distance is
//! zero; components without an origin stay unresolved.

use std::future::Future;

use mesh_types::IndexedMesh;
use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;
use tracing::{debug, info};

use crate::distance::DistanceField;
use crate::error::{GeodesicError, GeodesicResult};
use crate::operators::HeatOperators;
use crate::params::HeatParams;
use crate::solver::{DistanceSolver, OperatorProvider, SolveRequest};
use crate::sparse::{self, CgSettings};

/// Geodesic distance solver using the heat method.
///
/// # Example
///
/// ```
/// use mesh_geodesic::{DistanceSolver, HeatMethod, OperatorProvider, SolveRequest};
/// use mesh_types::IndexedMesh;
///
/// let mesh = IndexedMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2, 0, 2, 3],
/// );
/// let solver = HeatMethod::default();
/// let operators = solver.precompute(&mesh).unwrap();
///
/// let field = solver.solve_blocking(SolveRequest::new(&[0], &mesh, &operators)).unwrap();
/// assert!(field.distance(0) < 1e-6);
/// assert!(field.distance(2) > field.distance(1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeatMethod {
    params: HeatParams,
}

impl HeatMethod {
    /// Create a solver with the given parameters.
    #[must_use]
    pub const fn new(params: HeatParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    #[must_use]
    pub const fn params(&self) -> &HeatParams {
        &self.params
    }

    /// Run a solve on the calling thread.
    ///
    /// # Errors
    ///
    /// Request validation errors from [`SolveRequest::validate`], plus
    /// [`GeodesicError::SolverDiverged`] and [`GeodesicError::NonFinite`]
    /// from the linear solves.
    pub fn solve_blocking(
        &self,
        request: SolveRequest<'_, HeatOperators>,
    ) -> GeodesicResult<DistanceField> {
        let ops = request.operators;
        request.validate(ops.vertex_count())?;

        let n = ops.vertex_count();
        let areas = ops.vertex_areas();
        let components = ops.components();

        let mut is_origin = vec![false; n];
        for &o in request.origins {
            is_origin[o as usize] = true;
        }

        // Vertices taking part in both linear solves.
        let reached = components.reached_by(request.origins);
        let active: Vec<bool> = (0..n)
            .map(|v| {
                areas[v] > 0.0
                    && components
                        .label(v)
                        .is_some_and(|label| reached[label as usize])
            })
            .collect();

        let t = self.params.time_factor * ops.mean_spacing().powi(2);
        debug!(
            origins = request.origins.len(),
            active = active.iter().filter(|a| **a).count(),
            t,
            "Heat method solve"
        );

        // 1. Heat flow.
        let heat_system = restricted_system(ops.laplacian(), -t, areas, 1.0, &active);
        let delta = DVector::from_fn(n, |v, _| if active[v] && is_origin[v] { 1.0 } else { 0.0 });
        let heat = sparse::conjugate_gradient(&heat_system, &delta, self.settings("heat"))?
            .map(|u| u.max(0.0));

        // 2. Normalized vector field.
        let mut field = sparse::mul_vec(ops.gradient(), &heat);
        for g in field.as_mut_slice().chunks_exact_mut(3) {
            let norm = (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt();
            if norm > f64::MIN_POSITIVE && norm.is_finite() {
                for c in g.iter_mut() {
                    *c = -*c / norm;
                }
            } else {
                g.fill(0.0);
            }
        }

        // 3. Poisson solve with the origins pinned at zero.
        let divergence = sparse::mul_vec(ops.divergence(), &field);
        let free: Vec<bool> = (0..n).map(|v| active[v] && !is_origin[v]).collect();
        let poisson_system =
            restricted_system(ops.laplacian(), -1.0, areas, self.params.regularization, &free);
        let rhs = DVector::from_fn(n, |v, _| if free[v] { -divergence[v] } else { 0.0 });
        let phi = sparse::conjugate_gradient(&poisson_system, &rhs, self.settings("poisson"))?;

        let mut distances: Vec<f64> = (0..n)
            .map(|v| {
                if free[v] || is_origin[v] {
                    phi[v]
                } else {
                    f64::NAN
                }
            })
            .collect();
        shift_components(&mut distances, components.labels(), components.count());

        if distances.iter().any(|d| d.is_infinite()) {
            return Err(GeodesicError::NonFinite { context: "distance" });
        }

        let field = DistanceField::from_distances(distances);
        info!(
            origins = request.origins.len(),
            resolved = field.resolved_count(),
            max_distance = field.max_distance(),
            "Computed heat-method distances"
        );
        Ok(field)
    }

    const fn settings(&self, stage: &'static str) -> CgSettings {
        CgSettings {
            tolerance: self.params.tolerance,
            max_iterations: self.params.max_iterations,
            stage,
        }
    }
}

impl OperatorProvider for HeatMethod {
    type Operators = HeatOperators;

    fn precompute(&self, mesh: &IndexedMesh) -> GeodesicResult<HeatOperators> {
        HeatOperators::build(mesh)
    }
}

impl DistanceSolver for HeatMethod {
    fn solve(
        &self,
        request: SolveRequest<'_, HeatOperators>,
    ) -> impl Future<Output = GeodesicResult<DistanceField>> {
        async move { self.solve_blocking(request) }
    }
}

/// `scale * L + diag(weight * areas)` on the `keep` vertices.
///
/// Rows and columns of the other vertices are replaced by the identity,
/// so their unknowns solve to the right-hand side (kept at zero by the
/// callers) and do not couple to the rest.
fn restricted_system(
    laplacian: &CsrMatrix<f64>,
    scale: f64,
    areas: &DVector<f64>,
    weight: f64,
    keep: &[bool],
) -> CsrMatrix<f64> {
    let n = keep.len();
    let coupled = laplacian
        .triplet_iter()
        .filter(|&(row, col, _)| keep[row] && keep[col])
        .map(|(row, col, &val)| (row, col, scale * val));
    let diagonal = (0..n).map(|v| {
        if keep[v] {
            (v, v, weight * areas[v])
        } else {
            (v, v, 1.0)
        }
    });
    sparse::from_triplets(n, n, coupled.chain(diagonal))
}

/// Subtract from each component the minimum of its finite values.
fn shift_components(values: &mut [f64], labels: &[u32], component_count: usize) {
    let mut min = vec![f64::INFINITY; component_count];
    for (&value, &label) in values.iter().zip(labels) {
        if value.is_finite() {
            let m = &mut min[label as usize];
            *m = m.min(value);
        }
    }
    for (value, &label) in values.iter_mut().zip(labels) {
        if value.is_finite() {
            *value -= min[label as usize];
        }
    }
}
