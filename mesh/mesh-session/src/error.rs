//! Error types for session operations.

use mesh_geodesic::GeodesicError;
use mesh_io::IoError;
use mesh_isoline::IsolineError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by a [`Session`](crate::Session).
///
/// Every error leaves the session exactly as it was before the call.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Loading or parsing the mesh file failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Operator precompute or distance solve failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),

    /// Isoline extraction failed.
    #[error(transparent)]
    Isoline(#[from] IsolineError),

    /// An interaction needs a mesh but none is loaded.
    #[error("no mesh loaded")]
    NoMesh,

    /// A picked vertex is outside the loaded mesh.
    #[error("picked vertex {vertex} but the mesh has {vertex_count} vertices")]
    InvalidVertex {
        /// The picked index.
        vertex: u32,
        /// Vertex count of the loaded mesh.
        vertex_count: usize,
    },
}
