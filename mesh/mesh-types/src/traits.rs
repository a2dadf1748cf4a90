//! Traits for mesh types.

use crate::{Aabb, Triangle};
use nalgebra::Point3;

/// Read-only access to the topology of a triangle mesh.
///
/// Algorithms downstream (operators, isolines) only need positions and
/// index triples, so they are written against this trait rather than a
/// concrete storage layout.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn face_count(&self) -> usize;

    /// A mesh is empty when it has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Position of a vertex, `None` when out of range.
    fn position(&self, index: usize) -> Option<Point3<f64>>;

    /// Vertex index triple of a face, `None` when out of range.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Face with resolved vertex positions.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all faces as vertex index triples.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;

    /// Iterate over all faces with resolved positions.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Types that can report an axis-aligned bounding box.
pub trait MeshBounds {
    /// Bounding box of all vertices; empty when there are none.
    fn bounds(&self) -> Aabb;

    /// Center of [`MeshBounds::bounds`].
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
