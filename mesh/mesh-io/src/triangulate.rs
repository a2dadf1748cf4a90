//! Polygon decomposition into triangles.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How polygons with more than three corners are split into triangles.
///
/// Both policies pass triangles through untouched and drop polygons with
/// fewer than three corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolygonPolicy {
    /// Triangles `(p0, pi, pi+1)` sharing the first corner.
    ///
    /// Correct for convex polygons; `k` corners give `k - 2` triangles.
    #[default]
    Fan,

    /// Every consecutive triple `(pi, pi+1, pi+2)` plus a closing
    /// triangle `(pk-2, pk-1, p0)`.
    ///
    /// Kept for compatibility with files authored against loaders that
    /// split polygons this way. For `k > 4` the triangles overlap.
    Windowed,
}

impl PolygonPolicy {
    /// Append the triangles of `polygon` to `out`.
    ///
    /// Returns the number of triangles discarded as degenerate: a whole
    /// polygon with fewer than three corners counts as one, and each
    /// generated triangle with a repeated vertex index counts as one.
    pub fn triangulate_into(self, polygon: &[u32], out: &mut Vec<[u32; 3]>) -> usize {
        let k = polygon.len();
        if k < 3 {
            return 1;
        }

        let mut dropped = 0;
        let mut push = |tri: [u32; 3]| {
            if is_degenerate(tri) {
                dropped += 1;
            } else {
                out.push(tri);
            }
        };

        if k == 3 {
            push([polygon[0], polygon[1], polygon[2]]);
            return dropped;
        }

        match self {
            Self::Fan => {
                for pair in polygon[1..].windows(2) {
                    push([polygon[0], pair[0], pair[1]]);
                }
            }
            Self::Windowed => {
                for triple in polygon.windows(3) {
                    push([triple[0], triple[1], triple[2]]);
                }
                push([polygon[k - 2], polygon[k - 1], polygon[0]]);
            }
        }
        dropped
    }
}

/// Triangles produced from a list of polygons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    /// Output triangles, in polygon order.
    pub faces: Vec<[u32; 3]>,
    /// Count of polygons and triangles discarded as degenerate.
    pub dropped: usize,
}

/// Triangulate every polygon with `policy`.
///
/// # Example
///
/// ```
/// use mesh_io::{PolygonPolicy, triangulate};
///
/// let quad = vec![0, 1, 2, 3];
/// let fan = triangulate([quad.as_slice()], PolygonPolicy::Fan);
/// assert_eq!(fan.faces, vec![[0, 1, 2], [0, 2, 3]]);
///
/// let windowed = triangulate([quad.as_slice()], PolygonPolicy::Windowed);
/// assert_eq!(windowed.faces, vec![[0, 1, 2], [1, 2, 3], [2, 3, 0]]);
/// ```
pub fn triangulate<'a>(
    polygons: impl IntoIterator<Item = &'a [u32]>,
    policy: PolygonPolicy,
) -> Triangulation {
    let mut result = Triangulation::default();
    for polygon in polygons {
        result.dropped += policy.triangulate_into(polygon, &mut result.faces);
    }
    result
}

const fn is_degenerate([a, b, c]: [u32; 3]) -> bool {
    a == b || b == c || a == c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(polygon: &[u32], policy: PolygonPolicy) -> Triangulation {
        triangulate([polygon], policy)
    }

    #[test]
    fn triangle_passes_through() {
        for policy in [PolygonPolicy::Fan, PolygonPolicy::Windowed] {
            let t = run(&[4, 7, 9], policy);
            assert_eq!(t.faces, vec![[4, 7, 9]]);
            assert_eq!(t.dropped, 0);
        }
    }

    #[test]
    fn fan_pentagon() {
        let t = run(&[0, 1, 2, 3, 4], PolygonPolicy::Fan);
        assert_eq!(t.faces, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn windowed_pentagon_overlaps() {
        let t = run(&[0, 1, 2, 3, 4], PolygonPolicy::Windowed);
        assert_eq!(
            t.faces,
            vec![[0, 1, 2], [1, 2, 3], [2, 3, 4], [3, 4, 0]]
        );
    }

    #[test]
    fn short_polygons_are_dropped() {
        let t = triangulate(
            [[0_u32, 1].as_slice(), [].as_slice(), [0, 1, 2].as_slice()],
            PolygonPolicy::Fan,
        );
        assert_eq!(t.faces, vec![[0, 1, 2]]);
        assert_eq!(t.dropped, 2);
    }

    #[test]
    fn repeated_indices_are_dropped() {
        let t = run(&[0, 0, 1], PolygonPolicy::Fan);
        assert!(t.faces.is_empty());
        assert_eq!(t.dropped, 1);

        // Quad with a doubled corner keeps its one valid triangle.
        let t = run(&[0, 1, 1, 2], PolygonPolicy::Fan);
        assert_eq!(t.faces, vec![[0, 1, 2]]);
        assert_eq!(t.dropped, 1);
    }

    #[test]
    fn default_policy_is_fan() {
        assert_eq!(PolygonPolicy::default(), PolygonPolicy::Fan);
    }
}
