//! Heat palette for distance coloring.

use mesh_types::VertexColor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a color from channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` literal.
    ///
    /// ```
    /// use mesh_session::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex(0xFF0000), Rgb::new(1.0, 0.0, 0.0));
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // 8-bit channels
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Per-channel blend, `self` at `f = 0` and `other` at `f = 1`.
    #[must_use]
    pub fn lerp(self, other: Self, f: f32) -> Self {
        Self {
            r: f.mul_add(other.r - self.r, self.r),
            g: f.mul_add(other.g - self.g, self.g),
            b: f.mul_add(other.b - self.b, self.b),
        }
    }

    /// Channels as an array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Quantized 8-bit color.
    #[must_use]
    pub fn to_vertex_color(self) -> VertexColor {
        VertexColor::from_unit(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }
}

/// Anchor colors from "near" (white) to "far" (near-black red).
pub const HEAT_PALETTE: [Rgb; 8] = [
    Rgb::from_hex(0xFF_FFFF),
    Rgb::from_hex(0xFF_FFC0),
    Rgb::from_hex(0xFF_EE70),
    Rgb::from_hex(0xFF_CC40),
    Rgb::from_hex(0xFF_9930),
    Rgb::from_hex(0xFF_6622),
    Rgb::from_hex(0xDD_2200),
    Rgb::from_hex(0x99_0000),
];

/// Color of every vertex while no distance field is shown.
pub const ORIGIN_MARKER: Rgb = Rgb::from_hex(0xFF_FF00);

/// Largest input [`color_for`] distinguishes; larger values saturate.
pub const COLOR_CEILING: f64 = 0.99;

/// Heat color for a normalized distance.
///
/// `x` is clamped to `[0, COLOR_CEILING]` and spread over the seven
/// palette intervals, so `0.0` maps to the first anchor and the ceiling to
/// the last anchor exactly. The palette position is therefore
/// `x / COLOR_CEILING * 7` rather than a plain `7 * x`, which would stop
/// short of the last anchor under the clamp. Colors blend linearly between
/// anchors. `NaN` is treated as `0.0`.
///
/// # Example
///
/// ```
/// use mesh_session::{HEAT_PALETTE, color_for};
///
/// assert_eq!(color_for(0.0), HEAT_PALETTE[0]);
/// assert_eq!(color_for(0.99), HEAT_PALETTE[7]);
/// assert_eq!(color_for(3.0), HEAT_PALETTE[7]);
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)] // position in [0, 7]
pub fn color_for(x: f64) -> Rgb {
    let last = HEAT_PALETTE.len() - 1;
    let x = if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, COLOR_CEILING)
    };

    let position = x / COLOR_CEILING * last as f64;
    let idx = position.floor() as usize;
    if idx >= last {
        return HEAT_PALETTE[last];
    }

    let f = (position - idx as f64) as f32;
    HEAT_PALETTE[idx].lerp(HEAT_PALETTE[idx + 1], f)
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;

    #[test]
    fn palette_endpoints() {
        assert_eq!(color_for(0.0), Rgb::WHITE);
        assert_eq!(color_for(-1.0), Rgb::WHITE);
        assert_eq!(color_for(f64::NAN), Rgb::WHITE);
        assert_eq!(color_for(COLOR_CEILING), Rgb::from_hex(0x99_0000));
        assert_eq!(color_for(1.0), HEAT_PALETTE[7]);
    }

    #[test]
    fn anchors_are_hit() {
        for (k, anchor) in HEAT_PALETTE.iter().enumerate().take(7) {
            let x = COLOR_CEILING * k as f64 / 7.0;
            let c = color_for(x);
            assert!((c.r - anchor.r).abs() < 1e-5, "anchor {k}");
            assert!((c.g - anchor.g).abs() < 1e-5, "anchor {k}");
            assert!((c.b - anchor.b).abs() < 1e-5, "anchor {k}");
        }
    }

    #[test]
    fn channels_in_unit_range_and_continuous() {
        let steps = 10_000;
        let mut previous = color_for(0.0);
        for i in 1..=steps {
            let c = color_for(f64::from(i) / f64::from(steps));
            for channel in c.to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
            let jump = (c.r - previous.r)
                .abs()
                .max((c.g - previous.g).abs())
                .max((c.b - previous.b).abs());
            assert!(jump < 0.01, "jump {jump} at step {i}");
            previous = c;
        }
    }

    #[test]
    fn midpoint_blend() {
        let x = COLOR_CEILING * 0.5 / 7.0;
        let c = color_for(x);
        let expected = HEAT_PALETTE[0].lerp(HEAT_PALETTE[1], 0.5);
        assert!((c.b - expected.b).abs() < 1e-5);
        assert!((c.b - (1.0 + 192.0 / 255.0) / 2.0).abs() < 1e-5);
    }

    #[test]
    fn hex_and_quantization() {
        assert_eq!(ORIGIN_MARKER, Rgb::new(1.0, 1.0, 0.0));
        assert_eq!(ORIGIN_MARKER.to_vertex_color(), VertexColor::new(255, 255, 0));
        assert_eq!(HEAT_PALETTE[3].to_vertex_color(), VertexColor::new(0xFF, 0xCC, 0x40));
    }
}
