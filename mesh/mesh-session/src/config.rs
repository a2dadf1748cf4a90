//! Session configuration and presets.
//!
//! - [`SessionConfig::default()`] - accurate heat method, 20 isoline bands
//! - [`SessionConfig::interactive()`] - looser solver tolerance for large meshes
//!
//! # Example
//!
//! ```
//! use mesh_io::PolygonPolicy;
//! use mesh_session::SessionConfig;
//!
//! let config = SessionConfig::default()
//!     .with_level_count(10)
//!     .with_polygon_policy(PolygonPolicy::Windowed);
//! assert_eq!(config.isolines.level_count, 10);
//! ```

use mesh_geodesic::HeatParams;
use mesh_io::{LoadOptions, PolygonPolicy};
use mesh_isoline::IsolineParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::colormap::{ORIGIN_MARKER, Rgb};

/// Configuration of a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// How mesh files are turned into triangles.
    pub load: LoadOptions,

    /// Isoline band count.
    pub isolines: IsolineParams,

    /// Heat method parameters, used by [`Session::heat_method`](crate::Session::heat_method).
    pub heat: HeatParams,

    /// Color of every vertex while no field is shown.
    pub marker_color: Rgb,

    /// Color of vertices no origin reaches.
    pub unresolved_color: Rgb,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            isolines: IsolineParams::default(),
            heat: HeatParams::default(),
            marker_color: ORIGIN_MARKER,
            unresolved_color: Rgb::BLACK,
        }
    }
}

impl SessionConfig {
    /// Settings for responsive picking on large meshes.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            heat: HeatParams::interactive(),
            ..Self::default()
        }
    }

    /// Set the polygon decomposition policy.
    #[must_use]
    pub const fn with_polygon_policy(mut self, policy: PolygonPolicy) -> Self {
        self.load = self.load.with_polygon_policy(policy);
        self
    }

    /// Set the isoline band count.
    #[must_use]
    pub const fn with_level_count(mut self, level_count: u32) -> Self {
        self.isolines = self.isolines.with_level_count(level_count);
        self
    }

    /// Set the heat method parameters.
    #[must_use]
    pub const fn with_heat(mut self, heat: HeatParams) -> Self {
        self.heat = heat;
        self
    }

    /// Set the marker color.
    #[must_use]
    pub const fn with_marker_color(mut self, color: Rgb) -> Self {
        self.marker_color = color;
        self
    }

    /// Set the color of unreached vertices.
    #[must_use]
    pub const fn with_unresolved_color(mut self, color: Rgb) -> Self {
        self.unresolved_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.load.polygon_policy, PolygonPolicy::Fan);
        assert_eq!(config.isolines.level_count, 20);
        assert_eq!(config.marker_color, ORIGIN_MARKER);
        assert_eq!(config.unresolved_color, Rgb::BLACK);
    }

    #[test]
    fn interactive_loosens_tolerance() {
        let config = SessionConfig::interactive();
        assert!(config.heat.tolerance > SessionConfig::default().heat.tolerance);
    }
}
