//! Discrete differential operators of a triangle mesh.
//!
//! With `n` vertices and `f` faces:
//!
//! - cotangent Laplacian `L` (n x n): `L[i][j] = (cot a + cot b) / 2` for
//!   each edge, rows sum to zero, so `L` is negative semidefinite
//! - lumped vertex areas `A` (n): a third of the area of every incident face
//! - gradient `G` (3f x n): rows `3k..3k+3` give the constant gradient of a
//!   piecewise-linear function on face `k`
//! - integrated divergence `D` (n x 3f): maps one vector per face to one
//!   value per vertex, with `D G = L`
//!
//! Zero-area faces contribute nothing to any operator.

use mesh_types::{IndexedMesh, MeshTopology, Triangle, Vector3};
use nalgebra::DVector;
use nalgebra_sparse::CsrMatrix;
use tracing::{debug, warn};

use crate::adjacency::{AdjacencyList, Components};
use crate::error::{GeodesicError, GeodesicResult};
use crate::sparse;

/// Operators of one mesh, built once and reused by every heat-method solve.
#[derive(Debug, Clone)]
pub struct HeatOperators {
    laplacian: CsrMatrix<f64>,
    vertex_areas: DVector<f64>,
    gradient: CsrMatrix<f64>,
    divergence: CsrMatrix<f64>,
    mean_spacing: f64,
    components: Components,
    skipped_faces: usize,
}

impl HeatOperators {
    /// Build all operators for `mesh`.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesicError::EmptyMesh`] when the mesh has no vertices
    /// or no face with positive area.
    pub fn build(mesh: &IndexedMesh) -> GeodesicResult<Self> {
        if mesh.is_empty() {
            return Err(GeodesicError::EmptyMesh);
        }

        let n = mesh.vertex_count();
        let f = mesh.face_count();

        let mut laplacian = Vec::with_capacity(12 * f);
        let mut gradient = Vec::with_capacity(9 * f);
        let mut divergence = Vec::with_capacity(9 * f);
        let mut vertex_areas = DVector::zeros(n);
        let mut spacing_sum = 0.0;
        let mut used_faces = 0_usize;

        for (face_index, face) in mesh.faces().enumerate() {
            let Some(tri) = mesh.triangle(face_index) else {
                continue;
            };
            let Some(cot) = tri.cotangents() else {
                continue;
            };
            let [i, j, k] = face.map(|v| v as usize);

            // Edge opposite each corner carries that corner's cotangent.
            for (a, b, c) in [(j, k, cot[0]), (k, i, cot[1]), (i, j, cot[2])] {
                let w = 0.5 * c;
                laplacian.extend([(a, b, w), (b, a, w), (a, a, -w), (b, b, -w)]);
            }

            let area = tri.area();
            for v in [i, j, k] {
                vertex_areas[v] += area / 3.0;
            }

            push_gradient(&mut gradient, face_index, [i, j, k], &tri, area);
            push_divergence(&mut divergence, face_index, [i, j, k], &tri, cot);

            let [l0, l1, l2] = tri.edge_lengths();
            spacing_sum += (l0 + l1 + l2) / 3.0;
            used_faces += 1;
        }

        if used_faces == 0 {
            return Err(GeodesicError::EmptyMesh);
        }

        let skipped_faces = f - used_faces;
        if skipped_faces > 0 {
            warn!(skipped_faces, "Zero-area faces left out of the operators");
        }

        #[allow(clippy::cast_precision_loss)]
        let mean_spacing = spacing_sum / used_faces as f64;
        let components = AdjacencyList::from_mesh(mesh).components();

        debug!(
            vertices = n,
            faces = f,
            mean_spacing,
            components = components.count(),
            "Built heat-method operators"
        );

        Ok(Self {
            laplacian: sparse::from_triplets(n, n, laplacian),
            vertex_areas,
            gradient: sparse::from_triplets(3 * f, n, gradient),
            divergence: sparse::from_triplets(n, 3 * f, divergence),
            mean_spacing,
            components,
            skipped_faces,
        })
    }

    /// Cotangent Laplacian `L`.
    #[must_use]
    pub const fn laplacian(&self) -> &CsrMatrix<f64> {
        &self.laplacian
    }

    /// Lumped vertex areas `A`.
    #[must_use]
    pub const fn vertex_areas(&self) -> &DVector<f64> {
        &self.vertex_areas
    }

    /// Per-face gradient `G`.
    #[must_use]
    pub const fn gradient(&self) -> &CsrMatrix<f64> {
        &self.gradient
    }

    /// Integrated divergence `D`.
    #[must_use]
    pub const fn divergence(&self) -> &CsrMatrix<f64> {
        &self.divergence
    }

    /// Mean edge length, averaged per face then over faces.
    #[must_use]
    pub const fn mean_spacing(&self) -> f64 {
        self.mean_spacing
    }

    /// Connected components of the mesh.
    #[must_use]
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Number of vertices covered.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_areas.len()
    }

    /// Number of faces left out for having zero area.
    #[must_use]
    pub const fn skipped_faces(&self) -> usize {
        self.skipped_faces
    }
}

/// `grad u = sum_v u_v (N x e_v) / 2A`, `e_v` the edge opposite `v` walked
/// counter-clockwise.
fn push_gradient(
    out: &mut Vec<(usize, usize, f64)>,
    face_index: usize,
    [i, j, k]: [usize; 3],
    tri: &Triangle,
    area: f64,
) {
    let Some(normal) = tri.normal() else {
        return;
    };
    let opposite: [(usize, Vector3<f64>); 3] = [
        (i, tri.v2 - tri.v1),
        (j, tri.v0 - tri.v2),
        (k, tri.v1 - tri.v0),
    ];
    for (v, edge) in opposite {
        let g = normal.cross(&edge) / (2.0 * area);
        for c in 0..3 {
            out.push((3 * face_index + c, v, g[c]));
        }
    }
}

/// `div X at v = (cot a <e1, X> + cot b <e2, X>) / 2` over the two edges
/// leaving `v`, each weighted by the cotangent of the angle opposite it.
fn push_divergence(
    out: &mut Vec<(usize, usize, f64)>,
    face_index: usize,
    [i, j, k]: [usize; 3],
    tri: &Triangle,
    [cot_i, cot_j, cot_k]: [f64; 3],
) {
    let (pi, pj, pk) = (tri.v0, tri.v1, tri.v2);
    let rows: [(usize, Vector3<f64>); 3] = [
        (i, (pj - pi) * cot_k + (pk - pi) * cot_j),
        (j, (pk - pj) * cot_i + (pi - pj) * cot_k),
        (k, (pi - pk) * cot_j + (pj - pk) * cot_i),
    ];
    for (v, w) in rows {
        for c in 0..3 {
            out.push((v, 3 * face_index + c, 0.5 * w[c]));
        }
    }
}
