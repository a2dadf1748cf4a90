//! Mesh adjacency data structure.
//!
//! Provides neighbor lookup and connected components for mesh vertices.

use mesh_types::{IndexedMesh, MeshTopology};

/// Adjacency list for mesh vertices.
///
/// Stores neighbors for each vertex, enabling graph traversal.
/// Each neighbor entry includes the neighbor index and edge length.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyList {
    /// For each vertex, list of (neighbor index, edge length) pairs.
    neighbors: Vec<Vec<(u32, f64)>>,
}

impl AdjacencyList {
    /// Build an adjacency list from a mesh.
    ///
    /// Faces referencing a vertex outside the mesh are skipped.
    #[must_use]
    pub fn from_mesh(mesh: &IndexedMesh) -> Self {
        let vertex_count = mesh.vertex_count();
        let mut neighbors: Vec<Vec<(u32, f64)>> = vec![Vec::new(); vertex_count];

        for (face_index, &[i0, i1, i2]) in mesh.faces.iter().enumerate() {
            let Some(tri) = mesh.triangle(face_index) else {
                continue;
            };
            let [len01, len12, len20] = tri.edge_lengths();

            Self::add_edge(&mut neighbors, i0, i1, len01);
            Self::add_edge(&mut neighbors, i1, i2, len12);
            Self::add_edge(&mut neighbors, i2, i0, len20);
        }

        Self { neighbors }
    }

    /// Add an edge between two vertices (if not already present).
    fn add_edge(neighbors: &mut [Vec<(u32, f64)>], v0: u32, v1: u32, length: f64) {
        if v0 == v1 {
            return;
        }
        if !neighbors[v0 as usize].iter().any(|&(n, _)| n == v1) {
            neighbors[v0 as usize].push((v1, length));
        }
        if !neighbors[v1 as usize].iter().any(|&(n, _)| n == v0) {
            neighbors[v1 as usize].push((v0, length));
        }
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Get the neighbors of a vertex.
    ///
    /// Returns a slice of (neighbor index, edge length) pairs.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, vertex: usize) -> &[(u32, f64)] {
        self.neighbors.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Check if the adjacency list is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Get the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        // Each edge is stored twice (once for each direction)
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Label every vertex with the index of its connected component.
    ///
    /// Components are numbered in order of their lowest vertex index.
    /// Isolated vertices form components of their own.
    #[must_use]
    pub fn components(&self) -> Components {
        let mut labels = vec![u32::MAX; self.neighbors.len()];
        let mut count = 0_u32;
        let mut stack = Vec::new();

        for start in 0..self.neighbors.len() {
            if labels[start] != u32::MAX {
                continue;
            }
            labels[start] = count;
            stack.push(start);
            while let Some(v) = stack.pop() {
                for &(n, _) in &self.neighbors[v] {
                    let n = n as usize;
                    if labels[n] == u32::MAX {
                        labels[n] = count;
                        stack.push(n);
                    }
                }
            }
            count += 1;
        }

        Components { labels, count }
    }
}

/// Connected-component labels of a mesh's vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    labels: Vec<u32>,
    count: u32,
}

impl Components {
    /// Component of `vertex`, `None` when out of range.
    #[inline]
    #[must_use]
    pub fn label(&self, vertex: usize) -> Option<u32> {
        self.labels.get(vertex).copied()
    }

    /// Per-vertex labels.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Number of components.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count as usize
    }

    /// Mark the components that contain at least one of `vertices`.
    ///
    /// Out-of-range vertices are ignored.
    #[must_use]
    pub fn reached_by(&self, vertices: &[u32]) -> Vec<bool> {
        let mut reached = vec![false; self.count()];
        for &v in vertices {
            if let Some(label) = self.label(v as usize) {
                reached[label as usize] = true;
            }
        }
        reached
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::map_unwrap_or
)]
mod tests {
    use super::*;
    use mesh_types::Vertex;

    #[test]
    fn adjacency_from_triangle() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let adj = AdjacencyList::from_mesh(&mesh);

        assert_eq!(adj.vertex_count(), 3);
        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.neighbors(0).len(), 2);
        assert!(adj.neighbors(7).is_empty());
    }

    #[test]
    fn adjacency_edge_lengths() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(3.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 4.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let adj = AdjacencyList::from_mesh(&mesh);
        let neighbors_0 = adj.neighbors(0);

        let edge_01 = neighbors_0.iter().find(|&&(n, _)| n == 1);
        assert!((edge_01.map(|e| e.1).unwrap_or(0.0) - 3.0).abs() < 1e-10);

        let edge_02 = neighbors_0.iter().find(|&&(n, _)| n == 2);
        assert!((edge_02.map(|e| e.1).unwrap_or(0.0) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn adjacency_empty_mesh() {
        let adj = AdjacencyList::from_mesh(&IndexedMesh::new());
        assert!(adj.is_empty());
        assert_eq!(adj.edge_count(), 0);
        assert_eq!(adj.components().count(), 0);
    }

    #[test]
    fn components_of_two_islands_and_a_loner() {
        // Triangles {0,1,2} and {3,4,5}; vertex 6 is unused.
        let mesh = IndexedMesh::from_raw(
            &[
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
                5.0, 0.0, 0.0, 6.0, 0.0, 0.0, 5.0, 1.0, 0.0, //
                9.0, 9.0, 9.0,
            ],
            &[0, 1, 2, 3, 4, 5],
        );
        let components = AdjacencyList::from_mesh(&mesh).components();

        assert_eq!(components.count(), 3);
        assert_eq!(components.labels(), &[0, 0, 0, 1, 1, 1, 2]);
        assert_eq!(components.reached_by(&[4, 99]), vec![false, true, false]);
    }
}
