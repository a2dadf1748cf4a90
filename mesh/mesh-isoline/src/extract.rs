//! Marching-triangles contour extraction.

use hashbrown::HashMap;
use mesh_types::{EdgeKey, IndexedMesh, Point3};
use tracing::{debug, info};

use crate::error::{IsolineError, IsolineResult};
use crate::params::IsolineParams;
use crate::segment::{IsolineSet, Segment};

/// Extract isolines of a per-vertex scalar field.
///
/// The range `[0, max]` of the finite field values is divided into
/// `params.level_count` equal bands. For every interior band boundary and
/// every triangle, each edge whose endpoints fall into different bands is
/// tested for a crossing of that boundary; a triangle with exactly two
/// crossed edges contributes one [`Segment`].
///
/// Vertices whose value is `NaN` or infinite never take part in a
/// crossing. Crossing points are cached per `(edge, level)`, so the two
/// triangles sharing an edge emit bit-identical endpoints there.
///
/// Returns an empty set when the largest finite value is zero or there is
/// none.
///
/// # Errors
///
/// - [`IsolineError::InvalidLevelCount`] when `params.level_count` is zero
/// - [`IsolineError::FieldLengthMismatch`] when `field` does not have one
///   value per vertex
///
/// # Example
///
/// ```
/// use mesh_isoline::{IsolineParams, extract_isolines};
/// use mesh_types::IndexedMesh;
///
/// let mesh = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]);
/// let field = [0.0, 1.0, 1.0];
///
/// let set = extract_isolines(&mesh, &field, &IsolineParams::new().with_level_count(2)).unwrap();
/// assert_eq!(set.len(), 1);
/// assert!((set.segments[0].start.x - 0.5).abs() < 1e-12);
/// ```
pub fn extract_isolines(
    mesh: &IndexedMesh,
    field: &[f64],
    params: &IsolineParams,
) -> IsolineResult<IsolineSet> {
    let level_count = params.level_count;
    if level_count == 0 {
        return Err(IsolineError::InvalidLevelCount { level_count });
    }
    if field.len() != mesh.vertices.len() {
        return Err(IsolineError::FieldLengthMismatch {
            field_len: field.len(),
            vertex_count: mesh.vertices.len(),
        });
    }

    let max_value = field
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_value.is_finite() || max_value <= 0.0 {
        debug!(max_value, "Field has no positive finite range, no isolines");
        return Ok(IsolineSet::empty(level_count));
    }

    let spacing = max_value / f64::from(level_count);
    let mut marcher = Marcher::new(mesh, field, spacing);
    let mut segments = Vec::new();

    for level in params.interior_levels() {
        for &face in &mesh.faces {
            let crossings = marcher.face_crossings(face, level);
            if let [start, end] = crossings.as_slice() {
                segments.push(Segment {
                    start: *start,
                    end: *end,
                    level,
                });
            }
        }
    }

    info!(
        segments = segments.len(),
        levels = level_count.saturating_sub(1),
        spacing,
        cache_hits = marcher.cache_hits,
        "Extracted isolines"
    );

    Ok(IsolineSet {
        segments,
        spacing,
        max_value,
        level_count,
    })
}

/// Accepted crossings of one triangle at one level.
#[derive(Debug, Clone, Copy)]
struct Crossings {
    points: [Point3<f64>; 3],
    count: usize,
}

impl Crossings {
    fn as_slice(&self) -> &[Point3<f64>] {
        &self.points[..self.count]
    }
}

/// Per-run state: the field, its band spacing and the crossing cache.
struct Marcher<'a> {
    mesh: &'a IndexedMesh,
    field: &'a [f64],
    spacing: f64,
    cache: HashMap<(EdgeKey, u32), Point3<f64>>,
    cache_hits: usize,
}

impl<'a> Marcher<'a> {
    fn new(mesh: &'a IndexedMesh, field: &'a [f64], spacing: f64) -> Self {
        Self {
            mesh,
            field,
            spacing,
            cache: HashMap::new(),
            cache_hits: 0,
        }
    }

    fn face_crossings(&mut self, face: [u32; 3], level: u32) -> Crossings {
        let mut crossings = Crossings {
            points: [Point3::origin(); 3],
            count: 0,
        };
        for (a, b, key) in EdgeKey::of_face(face) {
            if let Some(point) = self.crossing(a, b, key, level) {
                crossings.points[crossings.count] = point;
                crossings.count += 1;
            }
        }
        crossings
    }

    fn crossing(&mut self, a: u32, b: u32, key: EdgeKey, level: u32) -> Option<Point3<f64>> {
        if let Some(point) = self.cache.get(&(key, level)) {
            self.cache_hits += 1;
            return Some(*point);
        }

        let va = *self.field.get(a as usize)?;
        let vb = *self.field.get(b as usize)?;
        let pa = self.mesh.vertices.get(a as usize)?.position;
        let pb = self.mesh.vertices.get(b as usize)?.position;

        let point = edge_crossing(
            (va, pa),
            (vb, pb),
            self.spacing,
            f64::from(level) * self.spacing,
        )?;
        self.cache.insert((key, level), point);
        Some(point)
    }
}

/// Point where the field crosses `threshold` along a straight edge.
///
/// Requires both endpoints finite and in different bands of width
/// `spacing`; `t` is measured from the endpoint with the lower value and
/// must land in `[0, 1]`.
fn edge_crossing(
    (va, pa): (f64, Point3<f64>),
    (vb, pb): (f64, Point3<f64>),
    spacing: f64,
    threshold: f64,
) -> Option<Point3<f64>> {
    if !va.is_finite() || !vb.is_finite() {
        return None;
    }
    let band = |v: f64| (v / spacing).floor();
    if band(va) == band(vb) {
        return None;
    }

    let ((lo, lo_p), (hi, hi_p)) = if va <= vb {
        ((va, pa), (vb, pb))
    } else {
        ((vb, pb), (va, pa))
    };
    let t = (threshold - lo) / (hi - lo);
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(lo_p + (hi_p - lo_p) * t)
}
