//! Geodesic distance fields and isolines on triangle meshes.
//!
//! This umbrella crate re-exports all mesh-* crates, providing a unified API
//! from file loading to rendered contours. All crates are Layer 0 (zero rendering
//! dependencies) and can be used in CLI tools, WASM, servers, or viewers.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! let obj = "v 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nf 1 2 3 4\n";
//! let mesh = mesh::io::load_bytes("plate.obj", obj.as_bytes(), &LoadOptions::default()).unwrap();
//! let normalized = normalize(mesh);
//!
//! let solver = HeatMethod::default();
//! let operators = solver.precompute(&normalized.mesh).unwrap();
//! let field = solver
//!     .solve_blocking(SolveRequest::new(&[0], &normalized.mesh, &operators))
//!     .unwrap();
//!
//! let isolines = extract_isolines(&normalized.mesh, field.as_slice(), &IsolineParams::default())
//!     .unwrap()
//!     .translated(&normalized.display_offset());
//! assert!(!isolines.is_empty());
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `EdgeKey`, normalization
//! - [`io`] - OBJ and OFF parsing, polygon triangulation
//! - [`geodesic`] - Distance solvers: heat method, edge Dijkstra
//! - [`isoline`] - Level-set contour extraction
//! - [`session`] - Interactive session: origin picking, heat colors, frames

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`, `EdgeKey`.
pub use mesh_types as types;

/// File I/O for OBJ and OFF.
pub use mesh_io as io;

/// Geodesic distance fields.
pub use mesh_geodesic as geodesic;

/// Isoline extraction.
pub use mesh_isoline as isoline;

/// Interactive sessions.
pub use mesh_session as session;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh processing.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        Aabb, EdgeKey, IndexedMesh, MeshBounds, MeshTopology, NormalizedMesh, Vertex, normalize,
    };

    // I/O
    pub use mesh_io::{LoadOptions, MeshFormat, PolygonPolicy, load_mesh};

    // Distance
    pub use mesh_geodesic::{
        DistanceField, DistanceSolver, EdgeDijkstra, HeatMethod, OperatorProvider, SolveRequest,
    };

    // Isolines
    pub use mesh_isoline::{IsolineParams, IsolineSet, extract_isolines};

    // Session (main use case)
    pub use mesh_session::{Interaction, Session, SessionConfig, color_for};
}

// =============================================================================
// Tests
// =============================================================================
