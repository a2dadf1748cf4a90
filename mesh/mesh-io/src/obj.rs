//! Wavefront OBJ parsing.
//!
//! Only the geometry directives are read:
//!
//! ```text
//! v  x y z [w]        – vertex position
//! vt u [v [w]]        – texture coordinate
//! vn x y z            – normal
//! f  v[/vt[/vn]] ...  – polygon, 1-based (negative = relative to the end)
//! ```
//!
//! Comments (`#`) and every other directive (`o`, `g`, `s`, `usemtl`,
//! `mtllib`, ...) are ignored.

use std::str::FromStr;

use mesh_types::{Point3, Vector3};
use tracing::debug;

use crate::MeshFormat;
use crate::error::{IoError, IoResult};
use crate::raw::{FaceCorner, RawMesh};

/// Parse OBJ text into an unvalidated [`RawMesh`].
///
/// # Errors
///
/// Returns [`IoError::MalformedFormat`] for a `v` or `vn` line with fewer
/// than 3 numbers or with a non-finite one, a `vt` line without
/// coordinates, a non-numeric token, an index of `0`, or a relative index
/// reaching before the first element.
///
/// # Example
///
/// ```
/// use mesh_io::parse_obj;
///
/// let raw = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
/// assert_eq!(raw.positions.len(), 3);
/// assert_eq!(raw.polygons.len(), 1);
/// ```
pub fn parse_obj(text: &str) -> IoResult<RawMesh> {
    let mut raw = RawMesh::new(MeshFormat::Obj);

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let content = line.split_once('#').map_or(line, |(before, _)| before);
        let mut parts = content.split_whitespace();
        let Some(directive) = parts.next() else {
            continue;
        };

        match directive {
            "v" => {
                let [x, y, z] = read_floats::<3>(&mut parts, line_no, "vertex")?;
                raw.positions.push(Point3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = read_floats::<3>(&mut parts, line_no, "normal")?;
                raw.normals.push(Vector3::new(x, y, z));
            }
            "vt" => {
                let u = parse_number::<f64>(parts.next(), line_no, "texture coordinate")?;
                let v = parts
                    .next()
                    .map(|t| parse_number::<f64>(Some(t), line_no, "texture coordinate"))
                    .transpose()?
                    .unwrap_or(0.0);
                raw.tex_coords.push((u, v));
            }
            "f" => {
                let polygon = parts
                    .map(|token| parse_corner(token, &raw, line_no))
                    .collect::<IoResult<Vec<_>>>()?;
                raw.polygons.push(polygon);
            }
            _ => {}
        }
    }

    debug!(
        vertices = raw.positions.len(),
        normals = raw.normals.len(),
        tex_coords = raw.tex_coords.len(),
        polygons = raw.polygons.len(),
        "Parsed OBJ"
    );

    Ok(raw)
}

fn read_floats<'a, const N: usize>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    what: &str,
) -> IoResult<[f64; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        let value: f64 = parse_number(parts.next(), line_no, what)?;
        if !value.is_finite() {
            return Err(IoError::malformed_at(
                MeshFormat::Obj,
                line_no,
                format_args!("non-finite {what} coordinate"),
            ));
        }
        *slot = value;
    }
    Ok(out)
}

fn parse_number<T: FromStr>(token: Option<&str>, line_no: usize, what: &str) -> IoResult<T> {
    let token = token.ok_or_else(|| {
        IoError::malformed_at(MeshFormat::Obj, line_no, format_args!("{what} has too few values"))
    })?;
    token.parse().map_err(|_| {
        IoError::malformed_at(MeshFormat::Obj, line_no, format_args!("invalid {what} value {token:?}"))
    })
}

/// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn`.
fn parse_corner(token: &str, raw: &RawMesh, line_no: usize) -> IoResult<FaceCorner> {
    let mut fields = token.split('/');
    let vertex = fields
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| {
            IoError::malformed_at(MeshFormat::Obj, line_no, format_args!("face corner {token:?} has no vertex"))
        })?;
    let vertex = resolve_index(vertex, raw.positions.len(), line_no)?;

    let mut optional = |count: usize| -> IoResult<Option<u32>> {
        match fields.next() {
            Some(f) if !f.is_empty() => resolve_index(f, count, line_no).map(Some),
            _ => Ok(None),
        }
    };
    let tex_coord = optional(raw.tex_coords.len())?;
    let normal = optional(raw.normals.len())?;

    Ok(FaceCorner {
        vertex,
        tex_coord,
        normal,
    })
}

/// Convert a 1-based or negative relative index to 0-based.
///
/// Positive indices are not range-checked here; `count` only anchors
/// relative ones.
fn resolve_index(field: &str, count: usize, line_no: usize) -> IoResult<u32> {
    let value: i64 = parse_number(Some(field), line_no, "index")?;
    let resolved = match value {
        0 => None,
        v if v > 0 => Some(v - 1),
        v => i64::try_from(count).ok().map(|c| c + v).filter(|r| *r >= 0),
    };
    resolved
        .and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| {
            IoError::malformed_at(MeshFormat::Obj, line_no, format_args!("index {value} is out of range"))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_triangle() {
        let raw = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(
            raw.positions,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0)
            ]
        );
        let corners: Vec<u32> = raw.polygons[0].iter().map(|c| c.vertex).collect();
        assert_eq!(corners, vec![0, 1, 2]);
    }

    #[test]
    fn comments_and_unknown_directives_are_ignored() {
        let text = "# header\nmtllib a.mtl\no thing\nv 0 0 0 # trailing\nv 1 0 0\ng grp\nusemtl m\ns off\nv 0 1 0\nf 1 2 3\n";
        let raw = parse_obj(text).unwrap();
        assert_eq!(raw.positions.len(), 3);
        assert_eq!(raw.polygons.len(), 1);
    }

    #[test]
    fn corner_forms() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.25\nvn 0 0 1\nf 1/1/1 2//1 3/1\n";
        let raw = parse_obj(text).unwrap();
        let p = &raw.polygons[0];
        assert_eq!(p[0], FaceCorner { vertex: 0, tex_coord: Some(0), normal: Some(0) });
        assert_eq!(p[1], FaceCorner { vertex: 1, tex_coord: None, normal: Some(0) });
        assert_eq!(p[2], FaceCorner { vertex: 2, tex_coord: Some(0), normal: None });
        assert_eq!(raw.tex_coords, vec![(0.5, 0.25)]);
    }

    #[test]
    fn negative_indices_are_relative() {
        let raw = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        let corners: Vec<u32> = raw.polygons[0].iter().map(|c| c.vertex).collect();
        assert_eq!(corners, vec![0, 1, 2]);
    }

    #[test]
    fn windows_line_endings() {
        let raw = parse_obj("v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n").unwrap();
        assert_eq!(raw.polygons[0].len(), 3);
    }

    #[test]
    fn malformed_inputs() {
        for text in [
            "v 0 0\n",
            "v 0 zero 0\n",
            "vn 1 0\n",
            "vt\n",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n",
            "v 0 0 0\nf -2 1 1\n",
            "v 0 0 0\nf a b c\n",
            "v 0 0 0\nf /1 1 1\n",
            "v 0 0 0\nv 1 0 0\nv nan 1 0\nf 1 2 3\n",
            "v inf 0 0\n",
            "v 0 0 -infinity\n",
            "vn 0 NaN 1\n",
        ] {
            let err = parse_obj(text).unwrap_err();
            assert!(err.is_malformed(), "{text:?} gave {err}");
        }
    }

    #[test]
    fn error_reports_line() {
        let err = parse_obj("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
