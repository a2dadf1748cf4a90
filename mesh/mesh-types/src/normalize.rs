//! Uniform scaling into the unit cube and display centering.

use crate::{IndexedMesh, MeshBounds};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

/// A mesh scaled so its largest absolute coordinate is `1.0`.
///
/// The vertices stay in the scaled frame: isolines and other dependent
/// geometry are computed there and moved by [`display_offset`] together
/// with the mesh, so everything stays aligned on screen.
///
/// [`display_offset`]: NormalizedMesh::display_offset
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMesh {
    /// The scaled mesh, not yet centered.
    pub mesh: IndexedMesh,
    /// Bounding-box center of `mesh`.
    pub center: Point3<f64>,
    /// Factor every coordinate was multiplied by.
    pub scale: f64,
}

impl NormalizedMesh {
    /// Translation that moves the bounding-box center to the origin.
    #[inline]
    #[must_use]
    pub fn display_offset(&self) -> Vector3<f64> {
        -self.center.coords
    }

    /// Copy of the mesh translated by [`NormalizedMesh::display_offset`].
    #[must_use]
    pub fn display_mesh(&self) -> IndexedMesh {
        let mut mesh = self.mesh.clone();
        mesh.translate(self.display_offset());
        mesh
    }
}

/// Scale `mesh` uniformly by `1 / max|coordinate|` and record its center.
///
/// A zero or non-finite magnitude leaves the coordinates untouched
/// (`scale == 1.0`).
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshBounds, normalize};
///
/// let raw = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 2.0, 0.0], &[0, 1, 2]);
/// let normalized = normalize(raw);
///
/// assert!((normalized.mesh.max_abs_coordinate() - 1.0).abs() < 1e-12);
/// assert!(normalized.display_mesh().center().coords.norm() < 1e-12);
/// ```
#[must_use]
pub fn normalize(mut mesh: IndexedMesh) -> NormalizedMesh {
    let magnitude = mesh.max_abs_coordinate();

    let scale = if magnitude > 0.0 && magnitude.is_finite() {
        magnitude.recip()
    } else {
        warn!(magnitude, "Cannot normalize mesh, leaving coordinates unscaled");
        1.0
    };
    mesh.scale(scale);

    let center = if mesh.vertices.is_empty() {
        Point3::origin()
    } else {
        mesh.center()
    };

    debug!(
        vertices = mesh.vertices.len(),
        scale,
        center = ?center,
        "Normalized mesh"
    );

    NormalizedMesh {
        mesh,
        center,
        scale,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scales_to_unit_magnitude_and_centers() {
        let raw = IndexedMesh::from_raw(
            &[2.0, 3.0, 1.0, 10.0, 3.0, 1.0, 2.0, 7.0, 5.0],
            &[0, 1, 2],
        );
        let n = normalize(raw);

        assert_relative_eq!(n.scale, 0.1);
        assert_relative_eq!(n.mesh.max_abs_coordinate(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.center.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(n.center.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(n.center.z, 0.3, epsilon = 1e-12);

        let display = n.display_mesh();
        let c = display.center();
        assert!(c.coords.norm() < 1e-12);
        // Display translation does not change shape.
        assert_relative_eq!(display.surface_area(), n.mesh.surface_area(), epsilon = 1e-12);
    }

    #[test]
    fn negative_coordinates_count_by_magnitude() {
        let raw = IndexedMesh::from_raw(&[-8.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 4.0, 0.0], &[0, 1, 2]);
        let n = normalize(raw);
        assert_eq!(n.mesh.vertices[0].position.x, -1.0);
        assert_relative_eq!(n.mesh.vertices[2].position.y, 0.5);
    }

    #[test]
    fn degenerate_magnitude_is_left_alone() {
        let raw = IndexedMesh::from_raw(&[0.0; 9], &[0, 1, 2]);
        let n = normalize(raw);
        assert_eq!(n.scale, 1.0);
        assert_eq!(n.center, Point3::origin());
        assert!(n.mesh.vertices.iter().all(|v| v.coords() == [0.0; 3]));
    }

    #[test]
    fn empty_mesh_centers_at_origin() {
        let n = normalize(IndexedMesh::new());
        assert_eq!(n.center, Point3::origin());
        assert_eq!(n.display_offset(), Vector3::zeros());
    }
}
