//! Mesh file loading for the isoline toolkit.
//!
//! This crate turns the bytes of a mesh file into a validated
//! [`IndexedMesh`]:
//!
//! - **OBJ** (Wavefront) - positions, normals, texture coordinates, polygons
//! - **OFF** (Object File Format) - positions and polygons
//! - **STL**, **glTF/GLB**, **PLY** - recognized by extension, rejected
//!   with [`IoError::UnsupportedFormat`]
//!
//! Loading is split in three steps, each usable on its own:
//!
//! 1. [`parse`] produces a [`RawMesh`] with 0-based, unchecked indices
//! 2. [`PolygonPolicy`] decides how polygons become triangles
//! 3. [`RawMesh::into_mesh`] triangulates and validates indices
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**.
//!
//! # Example
//!
//! ```
//! use mesh_io::{LoadOptions, load_bytes};
//! use mesh_types::MeshTopology;
//!
//! let off = b"OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
//! let mesh = load_bytes("square.off", off, &LoadOptions::default()).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.face_count(), 2);
//! ```
//!
//! # Format Detection
//!
//! Dispatch is by extension, case-insensitive. Anything outside the
//! closed [`MeshFormat`] set fails before any bytes are read:
//!
//! ```
//! use mesh_io::{LoadOptions, load_bytes};
//!
//! let err = load_bytes("notes.txt", b"", &LoadOptions::default()).unwrap_err();
//! assert!(err.is_unsupported());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod off;
mod raw;
mod triangulate;

pub use error::{IoError, IoResult};
pub use obj::parse_obj;
pub use off::parse_off;
pub use raw::{FaceCorner, RawMesh};
pub use triangulate::{PolygonPolicy, Triangulation, triangulate};

use std::fmt;
use std::path::Path;

use mesh_types::{IndexedMesh, MeshTopology};
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mesh file formats recognized by extension.
///
/// Only [`MeshFormat::Obj`] and [`MeshFormat::Off`] have parsers; the
/// others are explicit so that they fail with
/// [`IoError::UnsupportedFormat`] instead of silently loading nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeshFormat {
    /// OBJ (Wavefront) format.
    Obj,
    /// OFF (Object File Format).
    Off,
    /// STL (Stereolithography), recognized only.
    Stl,
    /// glTF JSON, recognized only.
    Gltf,
    /// glTF binary container, recognized only.
    Glb,
    /// PLY (Polygon File Format), recognized only.
    Ply,
}

impl MeshFormat {
    /// Every recognized format.
    pub const ALL: [Self; 6] = [
        Self::Obj,
        Self::Off,
        Self::Stl,
        Self::Gltf,
        Self::Glb,
        Self::Ply,
    ];

    /// Detect format from a file extension, case-insensitive.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Detect format from a declared file name such as `"bunny.OBJ"`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for an unknown or missing
    /// extension.
    pub fn from_name(name: &str) -> IoResult<Self> {
        Self::from_path(name).ok_or_else(|| {
            IoError::unsupported(
                Path::new(name)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map_or_else(|| "(no extension)".to_string(), |e| format!(".{e}")),
            )
        })
    }

    fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Off => "off",
            Self::Stl => "stl",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
            Self::Ply => "ply",
        }
    }

    /// Whether a parser exists for this format.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Obj | Self::Off)
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Obj => "OBJ",
            Self::Off => "OFF",
            Self::Stl => "STL",
            Self::Gltf => "glTF",
            Self::Glb => "GLB",
            Self::Ply => "PLY",
        };
        f.write_str(name)
    }
}

/// Options applied when turning a file into a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadOptions {
    /// Polygon decomposition policy.
    pub polygon_policy: PolygonPolicy,
}

impl LoadOptions {
    /// Set the polygon decomposition policy.
    #[must_use]
    pub const fn with_polygon_policy(mut self, policy: PolygonPolicy) -> Self {
        self.polygon_policy = policy;
        self
    }
}

/// Parse file contents of a known format.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats without a parser,
/// [`IoError::Utf8`] for text formats that are not UTF-8, and
/// [`IoError::MalformedFormat`] for invalid content.
pub fn parse(bytes: &[u8], format: MeshFormat) -> IoResult<RawMesh> {
    match format {
        MeshFormat::Obj => parse_obj(std::str::from_utf8(bytes)?),
        MeshFormat::Off => parse_off(std::str::from_utf8(bytes)?),
        MeshFormat::Stl | MeshFormat::Gltf | MeshFormat::Glb | MeshFormat::Ply => {
            Err(IoError::unsupported(format.to_string()))
        }
    }
}

/// Load a mesh from an in-memory payload and its declared file name.
///
/// # Errors
///
/// Returns an error if:
/// - The extension of `name` is unknown or has no parser
/// - The content is invalid for the detected format
pub fn load_bytes(name: &str, bytes: &[u8], options: &LoadOptions) -> IoResult<IndexedMesh> {
    let format = MeshFormat::from_name(name)?;
    let mesh = parse(bytes, format)?.into_mesh(options.polygon_policy)?;

    info!(
        file = name,
        format = %format,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Loaded mesh"
    );

    Ok(mesh)
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use mesh_io::{LoadOptions, load_mesh};
///
/// let mesh = load_mesh("bunny.obj", &LoadOptions::default()).unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P, options: &LoadOptions) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    // Reject the extension before touching the file system.
    MeshFormat::from_name(&name)?;

    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    load_bytes(&name, &bytes, options)
}
