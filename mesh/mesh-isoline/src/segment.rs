//! Isoline output types.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One chord of one isoline inside one triangle.
///
/// Segments are not chained into polylines; renderers draw them as
/// independent line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// First endpoint, on one crossed edge.
    pub start: Point3<f64>,
    /// Second endpoint, on the other crossed edge.
    pub end: Point3<f64>,
    /// Level index in `1..level_count`.
    pub level: u32,
}

impl Segment {
    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// The segment shifted by `offset`.
    #[inline]
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            level: self.level,
        }
    }
}

/// All isoline segments extracted from one scalar field.
///
/// Segments are ordered by level, then by face.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsolineSet {
    /// Extracted segments.
    pub segments: Vec<Segment>,
    /// Field distance between consecutive levels; `0.0` when nothing was
    /// extracted.
    pub spacing: f64,
    /// Largest finite field value.
    pub max_value: f64,
    /// Number of bands the field range was divided into.
    pub level_count: u32,
}

impl IsolineSet {
    /// A set with no segments.
    #[must_use]
    pub const fn empty(level_count: u32) -> Self {
        Self {
            segments: Vec::new(),
            spacing: 0.0,
            max_value: 0.0,
            level_count,
        }
    }

    /// Number of segments.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether there are no segments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Field value of a level.
    #[inline]
    #[must_use]
    pub fn threshold(&self, level: u32) -> f64 {
        f64::from(level) * self.spacing
    }

    /// Segments belonging to one level.
    pub fn level(&self, level: u32) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.level == level)
    }

    /// Total length of all segments.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Copy with every segment shifted by `offset`.
    ///
    /// Used to move isolines computed on the normalized mesh into the frame
    /// of the centered display mesh.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            segments: self.segments.iter().map(|s| s.translated(offset)).collect(),
            ..*self
        }
    }

    /// Flat `[x0, y0, z0, x1, y1, z1, ...]` endpoint list, two points per
    /// segment, as line-segment renderers consume it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Render buffers are single precision
    pub fn line_positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.segments.len() * 6);
        for s in &self.segments {
            for p in [s.start, s.end] {
                out.extend([p.x as f32, p.y as f32, p.z as f32]);
            }
        }
        out
    }
}
