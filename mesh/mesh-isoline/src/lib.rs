//! Isoline extraction for scalar fields on triangle meshes.
//!
//! Given a mesh and one value per vertex (typically a geodesic distance
//! field), [`extract_isolines`] cuts the value range into equal bands and
//! returns the contour segments on every interior band boundary, one chord
//! per crossed triangle.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**. The output is
//! plain geometry that any line renderer can draw.
//!
//! # Example
//!
//! ```
//! use mesh_isoline::{IsolineParams, extract_isolines};
//! use mesh_types::{IndexedMesh, MeshTopology};
//!
//! let mesh = IndexedMesh::from_raw(
//!     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
//!     &[0, 1, 2, 0, 2, 3],
//! );
//! // Distance from the edge x = 0.
//! let field: Vec<f64> = mesh.vertices.iter().map(|v| v.position.x).collect();
//!
//! let isolines = extract_isolines(&mesh, &field, &IsolineParams::default()).unwrap();
//! assert_eq!(isolines.len(), 19 * mesh.face_count());
//! ```
//!
//! # Consistency
//!
//! Two triangles that share an edge produce bit-identical endpoints on it,
//! so the segments of one level join into continuous curves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod extract;
mod params;
mod segment;

pub use error::{IsolineError, IsolineResult};
pub use extract::extract_isolines;
pub use params::IsolineParams;
pub use segment::{IsolineSet, Segment};
