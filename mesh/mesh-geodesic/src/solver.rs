//! Seams between the session and the numerics.
//!
//! Solvers are split in two phases: [`OperatorProvider::precompute`] runs
//! once per loaded mesh, [`DistanceSolver::solve`] once per change of the
//! origin set, reusing the operators.

use std::future::Future;

use mesh_types::{IndexedMesh, MeshTopology};

use crate::distance::DistanceField;
use crate::error::{GeodesicError, GeodesicResult};

/// Builds the mesh-derived artifacts a solver needs.
pub trait OperatorProvider {
    /// Artifacts cached for the lifetime of one mesh.
    type Operators;

    /// Build the operators for `mesh`.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesicError::EmptyMesh`] when `mesh` has no vertices or
    /// no usable faces.
    fn precompute(&self, mesh: &IndexedMesh) -> GeodesicResult<Self::Operators>;
}

/// Computes a distance field from a set of origin vertices.
///
/// Implementations must be deterministic: the same request always yields
/// the same field.
pub trait DistanceSolver: OperatorProvider {
    /// Distance from the nearest origin to every vertex.
    ///
    /// The returned field has one entry per vertex of `request.mesh`;
    /// vertices no origin can reach are `NaN`.
    fn solve(
        &self,
        request: SolveRequest<'_, Self::Operators>,
    ) -> impl Future<Output = GeodesicResult<DistanceField>>;
}

/// Inputs of one solve.
#[derive(Debug)]
pub struct SolveRequest<'a, O> {
    /// Origin vertex indices; duplicates are harmless.
    pub origins: &'a [u32],
    /// The mesh the operators were built for.
    pub mesh: &'a IndexedMesh,
    /// Operators from [`OperatorProvider::precompute`].
    pub operators: &'a O,
}

impl<O> Clone for SolveRequest<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for SolveRequest<'_, O> {}

impl<'a, O> SolveRequest<'a, O> {
    /// Bundle the inputs of a solve.
    #[must_use]
    pub const fn new(origins: &'a [u32], mesh: &'a IndexedMesh, operators: &'a O) -> Self {
        Self {
            origins,
            mesh,
            operators,
        }
    }

    /// Check the request against the vertex count the operators cover.
    ///
    /// # Errors
    ///
    /// - [`GeodesicError::OperatorMismatch`] when the counts differ
    /// - [`GeodesicError::NoOrigins`] when `origins` is empty
    /// - [`GeodesicError::InvalidVertex`] for an origin out of range
    pub fn validate(&self, operator_vertices: usize) -> GeodesicResult<()> {
        let vertex_count = self.mesh.vertex_count();
        if operator_vertices != vertex_count {
            return Err(GeodesicError::OperatorMismatch {
                expected: operator_vertices,
                actual: vertex_count,
            });
        }
        if self.origins.is_empty() {
            return Err(GeodesicError::NoOrigins);
        }
        if let Some(&bad) = self.origins.iter().find(|&&o| o as usize >= vertex_count) {
            return Err(GeodesicError::InvalidVertex {
                index: bad as usize,
                vertex_count,
            });
        }
        Ok(())
    }
}
