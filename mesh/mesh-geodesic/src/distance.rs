//! Distance field representation.
//!
//! Stores per-vertex distance values computed by a [`DistanceSolver`].
//!
//! [`DistanceSolver`]: crate::DistanceSolver

/// Per-vertex distance field.
///
/// Indexed by vertex; its length always equals the vertex count of the mesh
/// it was computed on. `f64::NAN` marks an unresolved vertex, one that no
/// origin can reach (a disconnected component).
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    /// Distance values for each vertex.
    distances: Vec<f64>,
}

impl DistanceField {
    /// Create a field of `vertex_count` unresolved vertices.
    #[must_use]
    pub fn unresolved(vertex_count: usize) -> Self {
        Self {
            distances: vec![f64::NAN; vertex_count],
        }
    }

    /// Create a distance field from a vector of distances.
    #[must_use]
    pub const fn from_distances(distances: Vec<f64>) -> Self {
        Self { distances }
    }

    /// Get the distance to a vertex.
    ///
    /// Returns `f64::NAN` if the vertex is unresolved or the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn distance(&self, vertex: usize) -> f64 {
        self.distances.get(vertex).copied().unwrap_or(f64::NAN)
    }

    /// Set the distance to a vertex.
    ///
    /// Returns `true` if successful, `false` if the index is out of bounds.
    #[inline]
    pub fn set_distance(&mut self, vertex: usize, distance: f64) -> bool {
        self.distances.get_mut(vertex).is_some_and(|d| {
            *d = distance;
            true
        })
    }

    /// Whether the vertex has a finite distance.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self, vertex: usize) -> bool {
        self.distance(vertex).is_finite()
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if the distance field is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Get all distances as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }

    /// Consume and return the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.distances
    }

    /// Maximum finite distance, `0.0` when nothing is resolved.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.distances
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max)
    }

    /// Distance of `vertex` divided by [`DistanceField::max_distance`].
    ///
    /// `None` for unresolved vertices or when the maximum is zero.
    #[must_use]
    pub fn normalized_value(&self, vertex: usize) -> Option<f64> {
        let d = self.distance(vertex);
        let max = self.max_distance();
        (d.is_finite() && max > 0.0).then(|| d / max)
    }

    /// Count the number of resolved vertices (finite distance).
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// Count the number of unresolved vertices.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.len() - self.resolved_count()
    }

    /// Iterate over (vertex index, distance) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.distances.iter().copied().enumerate()
    }

    /// Find the vertex with the maximum finite distance.
    ///
    /// Returns `None` if no vertex is resolved.
    #[must_use]
    pub fn farthest_vertex(&self) -> Option<(usize, f64)> {
        self.iter()
            .filter(|(_, d)| d.is_finite())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
    }
}

impl From<Vec<f64>> for DistanceField {
    fn from(distances: Vec<f64>) -> Self {
        Self::from_distances(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_field() {
        let df = DistanceField::unresolved(5);
        assert_eq!(df.len(), 5);
        assert!(df.distance(0).is_nan());
        assert_eq!(df.resolved_count(), 0);
        assert!(df.max_distance().abs() < f64::EPSILON);
        assert_eq!(df.farthest_vertex(), None);
    }

    #[test]
    fn set_and_get_distance() {
        let mut df = DistanceField::unresolved(3);
        assert!(df.set_distance(1, 1.5));
        assert!(!df.set_distance(10, 1.0));
        assert!((df.distance(1) - 1.5).abs() < f64::EPSILON);
        assert!(df.is_resolved(1));
        assert!(!df.is_resolved(0));
        assert!(df.distance(10).is_nan());
    }

    #[test]
    fn max_ignores_unresolved() {
        let df = DistanceField::from_distances(vec![0.0, 4.0, f64::NAN, 2.0, f64::INFINITY]);
        assert!((df.max_distance() - 4.0).abs() < f64::EPSILON);
        assert_eq!(df.resolved_count(), 3);
        assert_eq!(df.unresolved_count(), 2);
        assert_eq!(df.farthest_vertex(), Some((1, 4.0)));
    }

    #[test]
    fn normalized_value() {
        let df = DistanceField::from_distances(vec![0.0, 5.0, 10.0, f64::NAN]);
        assert_eq!(df.normalized_value(1), Some(0.5));
        assert_eq!(df.normalized_value(2), Some(1.0));
        assert_eq!(df.normalized_value(3), None);

        let flat = DistanceField::from_distances(vec![0.0, 0.0]);
        assert_eq!(flat.normalized_value(0), None);
    }
}
