//! Error types for geodesic distance computation.

use thiserror::Error;

/// Result type for geodesic operations.
pub type GeodesicResult<T> = Result<T, GeodesicError>;

/// Errors that can occur during geodesic computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeodesicError {
    /// Invalid vertex index.
    #[error("invalid vertex index: {index} (mesh has {vertex_count} vertices)")]
    InvalidVertex {
        /// The invalid index.
        index: usize,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Empty mesh (no vertices or faces).
    #[error("mesh is empty")]
    EmptyMesh,

    /// A solve was requested without any origin vertex.
    #[error("no origin vertices given")]
    NoOrigins,

    /// Operators were built for a different mesh.
    #[error("operators cover {expected} vertices but the mesh has {actual}")]
    OperatorMismatch {
        /// Vertex count the operators were built for.
        expected: usize,
        /// Vertex count of the mesh passed to the solve.
        actual: usize,
    },

    /// The iterative linear solver did not reach its tolerance.
    #[error("{stage} solve did not converge after {iterations} iterations (residual {residual:e})")]
    SolverDiverged {
        /// Which linear system failed.
        stage: &'static str,
        /// Iterations performed.
        iterations: usize,
        /// Relative residual when the solver stopped.
        residual: f64,
    },

    /// NaN or infinity appeared where a finite value is required.
    #[error("non-finite value in {context}")]
    NonFinite {
        /// Where the value was found.
        context: &'static str,
    },
}
