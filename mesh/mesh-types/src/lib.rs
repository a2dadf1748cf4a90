//! Core mesh types for the isoline toolkit.
//!
//! This crate provides the canonical in-memory representation every other
//! crate in the workspace works against:
//!
//! - [`Vertex`] - A point in 3D space with optional attributes
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`EdgeKey`] - Orientation-independent identifier of a mesh edge
//! - [`NormalizedMesh`] - A mesh scaled into the unit cube plus its display offset
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**. It can be
//! used from CLI tools, WASM front-ends, servers or test harnesses alike.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`. After
//! [`normalize`] every coordinate lies in `[-1, 1]`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Point3, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod edge;
mod mesh;
mod normalize;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use edge::EdgeKey;
pub use mesh::IndexedMesh;
pub use normalize::{NormalizedMesh, normalize};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes, VertexColor};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
