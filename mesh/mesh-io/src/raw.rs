//! Unvalidated parser output.

use mesh_types::{IndexedMesh, Point3, Vector3, Vertex};
use tracing::debug;

use crate::MeshFormat;
use crate::error::{IoError, IoResult};
use crate::triangulate::{PolygonPolicy, triangulate};

/// One corner of a polygon, with 0-based indices into a [`RawMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceCorner {
    /// Index into [`RawMesh::positions`].
    pub vertex: u32,
    /// Index into [`RawMesh::tex_coords`].
    pub tex_coord: Option<u32>,
    /// Index into [`RawMesh::normals`].
    pub normal: Option<u32>,
}

impl FaceCorner {
    /// A corner that only references a position.
    #[inline]
    #[must_use]
    pub const fn vertex(vertex: u32) -> Self {
        Self {
            vertex,
            tex_coord: None,
            normal: None,
        }
    }
}

/// Vertex and polygon lists exactly as a file described them.
///
/// Indices are already 0-based but have not been checked against the
/// list lengths; [`RawMesh::into_mesh`] does that.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    /// Format the data was read from.
    pub format: MeshFormat,
    /// Vertex positions in file order.
    pub positions: Vec<Point3<f64>>,
    /// Normals (OBJ `vn`).
    pub normals: Vec<Vector3<f64>>,
    /// Texture coordinates (OBJ `vt`).
    pub tex_coords: Vec<(f64, f64)>,
    /// Polygons of any corner count, in file order.
    pub polygons: Vec<Vec<FaceCorner>>,
}

impl RawMesh {
    /// An empty mesh for `format`.
    #[must_use]
    pub const fn new(format: MeshFormat) -> Self {
        Self {
            format,
            positions: Vec::new(),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            polygons: Vec::new(),
        }
    }

    /// Triangulate with `policy` and check every index.
    ///
    /// Normal and texture references attach to the vertex they appear
    /// with; when a vertex is referenced several times the first
    /// reference wins.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MalformedFormat`] when a corner references a
    /// position, normal or texture coordinate that does not exist.
    pub fn into_mesh(self, policy: PolygonPolicy) -> IoResult<IndexedMesh> {
        let format = self.format;
        let mut vertices: Vec<Vertex> = self.positions.iter().copied().map(Vertex::new).collect();

        for (face_index, polygon) in self.polygons.iter().enumerate() {
            for corner in polygon {
                let vertex = vertices.get_mut(corner.vertex as usize).ok_or_else(|| {
                    IoError::malformed(
                        format,
                        format!(
                            "face {face_index} references vertex {} but only {} exist",
                            corner.vertex,
                            self.positions.len()
                        ),
                    )
                })?;

                if let Some(n) = corner.normal {
                    let normal = self.normals.get(n as usize).ok_or_else(|| {
                        IoError::malformed(format, format!("face {face_index} references missing normal {n}"))
                    })?;
                    vertex.attributes.normal.get_or_insert(*normal);
                }
                if let Some(t) = corner.tex_coord {
                    let uv = self.tex_coords.get(t as usize).ok_or_else(|| {
                        IoError::malformed(
                            format,
                            format!("face {face_index} references missing texture coordinate {t}"),
                        )
                    })?;
                    vertex.attributes.uv.get_or_insert(*uv);
                }
            }
        }

        let indices: Vec<Vec<u32>> = self
            .polygons
            .iter()
            .map(|polygon| polygon.iter().map(|c| c.vertex).collect())
            .collect();
        let triangulation = triangulate(indices.iter().map(Vec::as_slice), policy);

        debug!(
            format = %format,
            polygons = self.polygons.len(),
            triangles = triangulation.faces.len(),
            dropped = triangulation.dropped,
            ?policy,
            "Triangulated polygons"
        );

        Ok(IndexedMesh::from_parts(vertices, triangulation.faces))
    }
}
