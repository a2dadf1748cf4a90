//! Geodesic (surface) distance fields for triangle meshes.
//!
//! Two solvers share one interface:
//!
//! - [`HeatMethod`] - the heat method of Crane et al.: one short heat
//!   diffusion step, normalization of its gradient, and a Poisson solve.
//!   Smooth distances that follow the surface rather than its edges.
//! - [`EdgeDijkstra`] - shortest paths along mesh edges. Fast and exact on
//!   the edge graph, an overestimate of the true surface distance.
//!
//! Both split their work into [`OperatorProvider::precompute`], run once
//! per mesh, and [`DistanceSolver::solve`], run per origin set.
//!
//! # Unresolved vertices
//!
//! A vertex that no origin can reach (another connected component, or an
//! isolated vertex) has distance `NaN` in the returned [`DistanceField`].
//!
//! # Example
//!
//! ```
//! use mesh_geodesic::{HeatMethod, OperatorProvider, SolveRequest};
//! use mesh_types::IndexedMesh;
//!
//! // Unit square split along its diagonal.
//! let mesh = IndexedMesh::from_raw(
//!     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
//!     &[0, 1, 2, 0, 2, 3],
//! );
//!
//! let solver = HeatMethod::default();
//! let operators = solver.precompute(&mesh).unwrap();
//! let field = solver
//!     .solve_blocking(SolveRequest::new(&[0], &mesh, &operators))
//!     .unwrap();
//!
//! assert!(field.distance(0) < 1e-6);
//! assert!(field.distance(2) > field.distance(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod dijkstra;
mod distance;
mod error;
mod heat;
mod operators;
mod params;
mod solver;
mod sparse;

pub use adjacency::{AdjacencyList, Components};
pub use dijkstra::EdgeDijkstra;
pub use distance::DistanceField;
pub use error::{GeodesicError, GeodesicResult};
pub use heat::HeatMethod;
pub use operators::HeatOperators;
pub use params::HeatParams;
pub use solver::{DistanceSolver, OperatorProvider, SolveRequest};
