//! Object File Format (OFF) parsing.
//!
//! ```text
//! OFF
//! nv nf ne
//! x y z            – nv lines
//! k i0 i1 ... ik-1 – nf lines, 0-based indices
//! ```
//!
//! Blank lines and lines starting with `#` are skipped anywhere. Extra
//! tokens after a vertex or face (per-element colors) are ignored, as is
//! the edge count.

use mesh_types::Point3;
use tracing::debug;

use crate::MeshFormat;
use crate::error::{IoError, IoResult};
use crate::raw::{FaceCorner, RawMesh};

/// Parse OFF text into an unvalidated [`RawMesh`].
///
/// # Errors
///
/// Returns [`IoError::MalformedFormat`] when the first meaningful line is
/// not `OFF`, the counts line is missing or invalid, the file ends before
/// the declared vertices or faces, or a vertex or face line is short or
/// holds a non-numeric or non-finite token.
///
/// # Example
///
/// ```
/// use mesh_io::parse_off;
///
/// let raw = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
/// assert_eq!(raw.positions.len(), 3);
/// assert_eq!(raw.polygons.len(), 1);
///
/// assert!(parse_off("3 1 0\n0 0 0\n").unwrap_err().is_malformed());
/// ```
pub fn parse_off(text: &str) -> IoResult<RawMesh> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    match lines.next() {
        Some((_, "OFF")) => {}
        Some((line_no, other)) => {
            return Err(IoError::malformed_at(
                MeshFormat::Off,
                line_no,
                format_args!("expected OFF header, found {other:?}"),
            ));
        }
        None => return Err(IoError::malformed(MeshFormat::Off, "empty file")),
    }

    let (line_no, counts) = lines
        .next()
        .ok_or_else(|| IoError::malformed(MeshFormat::Off, "missing element counts"))?;
    let mut counts = counts.split_whitespace();
    let vertex_count: usize = parse_token(counts.next(), line_no, "vertex count")?;
    let face_count: usize = parse_token(counts.next(), line_no, "face count")?;

    let mut raw = RawMesh::new(MeshFormat::Off);

    for i in 0..vertex_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            IoError::malformed(
                MeshFormat::Off,
                format!("expected {vertex_count} vertices, file ends after {i}"),
            )
        })?;
        let mut parts = line.split_whitespace();
        let x = parse_token(parts.next(), line_no, "vertex coordinate")?;
        let y = parse_token(parts.next(), line_no, "vertex coordinate")?;
        let z = parse_token(parts.next(), line_no, "vertex coordinate")?;
        if ![x, y, z].iter().all(|c: &f64| c.is_finite()) {
            return Err(IoError::malformed_at(
                MeshFormat::Off,
                line_no,
                "non-finite vertex coordinate",
            ));
        }
        raw.positions.push(Point3::new(x, y, z));
    }

    for i in 0..face_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            IoError::malformed(
                MeshFormat::Off,
                format!("expected {face_count} faces, file ends after {i}"),
            )
        })?;
        let mut parts = line.split_whitespace();
        let k: usize = parse_token(parts.next(), line_no, "face size")?;
        let polygon = (0..k)
            .map(|_| parse_token(parts.next(), line_no, "face index").map(FaceCorner::vertex))
            .collect::<IoResult<Vec<_>>>()?;
        raw.polygons.push(polygon);
    }

    debug!(
        vertices = raw.positions.len(),
        polygons = raw.polygons.len(),
        "Parsed OFF"
    );

    Ok(raw)
}

fn parse_token<T: std::str::FromStr>(token: Option<&str>, line_no: usize, what: &str) -> IoResult<T> {
    let token = token.ok_or_else(|| {
        IoError::malformed_at(MeshFormat::Off, line_no, format_args!("missing {what}"))
    })?;
    token.parse().map_err(|_| {
        IoError::malformed_at(MeshFormat::Off, line_no, format_args!("invalid {what} {token:?}"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vertices(raw: &RawMesh, face: usize) -> Vec<u32> {
        raw.polygons[face].iter().map(|c| c.vertex).collect()
    }

    #[test]
    fn parse_single_triangle() {
        let raw = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
        assert_eq!(raw.positions[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(vertices(&raw, 0), vec![0, 1, 2]);
    }

    #[test]
    fn comments_blank_lines_and_colors() {
        let text = "# made by hand\nOFF\n\n4 1 0\n0 0 0\n1 0 0\n# corner\n1 1 0\n0 1 0\n4 0 1 2 3 255 0 0\n";
        let raw = parse_off(text).unwrap();
        assert_eq!(raw.positions.len(), 4);
        assert_eq!(vertices(&raw, 0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn short_faces_are_kept_for_the_triangulator() {
        let raw = parse_off("OFF\n2 1 0\n0 0 0\n1 0 0\n2 0 1\n").unwrap();
        assert_eq!(raw.polygons[0].len(), 2);
    }

    #[test]
    fn missing_edge_count_is_accepted() {
        let raw = parse_off("OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
        assert_eq!(raw.polygons.len(), 1);
    }

    #[test]
    fn malformed_inputs() {
        for text in [
            "",
            "OFF\n",
            "COFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n",
            "3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n",
            "OFF\nthree 1 0\n",
            "OFF\n3 1 0\n0 0 0\n1 0 0\n",
            "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1\n3 0 1 2\n",
            "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n",
            "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1\n",
            "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 -1 2\n",
            "OFF\n3 1 0\n0 0 0\nnan 0 0\n0 1 0\n3 0 1 2\n",
            "OFF\n3 1 0\n0 0 0\n1 inf 0\n0 1 0\n3 0 1 2\n",
        ] {
            let err = parse_off(text).unwrap_err();
            assert!(err.is_malformed(), "{text:?} gave {err}");
        }
    }

    #[test]
    fn oversized_counts_report_truncation() {
        for text in [
            "OFF\n18446744073709551615 0 0\n0 0 0\n",
            "OFF\n1000000000 0 0\n0 0 0\n",
            "OFF\n3 18446744073709551615 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n",
        ] {
            let err = parse_off(text).unwrap_err();
            assert!(err.is_malformed(), "{text:?} gave {err}");
            assert!(err.to_string().contains("file ends after"), "{err}");
        }
    }
}
