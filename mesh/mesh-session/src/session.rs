//! The session controller.
//!
//! A [`Session`] owns everything tied to one loaded mesh (a *generation*):
//! the normalized mesh, the solver's cached operators, the current
//! distance field, isolines and vertex colors. Generations are replaced
//! wholesale; a failed load or solve never leaves a partial state behind.

use std::fmt;
use std::path::Path;

use mesh_geodesic::{DistanceField, DistanceSolver, HeatMethod, SolveRequest};
use mesh_isoline::{IsolineSet, extract_isolines};
use mesh_types::{IndexedMesh, NormalizedMesh, normalize};
use tracing::{debug, info, warn};

use crate::colormap::{Rgb, color_for};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::origins::OriginSet;

/// A user interaction reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Add a vertex to the origin set.
    PickVertex(u32),
    /// Remove every origin.
    ClearOrigins,
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Mesh centered on the origin.
    pub mesh: &'a IndexedMesh,
    /// One color per vertex.
    pub colors: &'a [Rgb],
    /// Isoline segments in the frame of `mesh`.
    pub isolines: &'a IsolineSet,
    /// Increases by one on every successful load.
    pub generation: u64,
}

impl Frame<'_> {
    /// Colors as a flat `[r, g, b, r, g, b, ...]` buffer.
    #[must_use]
    pub fn color_buffer(&self) -> Vec<f32> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }
}

/// State tied to one loaded mesh.
struct Generation<O> {
    id: u64,
    normalized: NormalizedMesh,
    display: IndexedMesh,
    operators: O,
    field: Option<DistanceField>,
    isolines: IsolineSet,
    colors: Vec<Rgb>,
}

/// Interactive geodesic-distance session over one solver.
///
/// # Example
///
/// ```
/// use mesh_session::{Interaction, Session, SessionConfig};
///
/// let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
///
/// let mut session = Session::heat_method(SessionConfig::default());
/// session.load("square.obj", obj.as_bytes()).unwrap();
/// session.handle_blocking(Interaction::PickVertex(0)).unwrap();
///
/// let frame = session.frame().unwrap();
/// assert_eq!(frame.colors.len(), 4);
/// assert_eq!(session.origins().as_slice(), &[0]);
/// ```
pub struct Session<S: DistanceSolver> {
    config: SessionConfig,
    solver: S,
    origins: OriginSet,
    current: Option<Generation<S::Operators>>,
    loads: u64,
}

impl<S: DistanceSolver + fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("solver", &self.solver)
            .field("origins", &self.origins)
            .field("generation", &self.current.as_ref().map(|g| g.id))
            .finish_non_exhaustive()
    }
}

impl Session<HeatMethod> {
    /// A session solving with the heat method configured by `config.heat`.
    #[must_use]
    pub fn heat_method(config: SessionConfig) -> Self {
        Self::new(HeatMethod::new(config.heat), config)
    }
}

impl<S: DistanceSolver> Session<S> {
    /// Create a session with no mesh loaded.
    #[must_use]
    pub fn new(solver: S, config: SessionConfig) -> Self {
        Self {
            config,
            solver,
            origins: OriginSet::new(),
            current: None,
            loads: 0,
        }
    }

    /// Load a mesh from file contents; the format follows `name`'s extension.
    ///
    /// # Errors
    ///
    /// [`SessionError::Io`] for unsupported or malformed files and
    /// [`SessionError::Geodesic`] when the solver cannot precompute
    /// operators. The previously loaded mesh stays in place.
    pub fn load(&mut self, name: &str, bytes: &[u8]) -> SessionResult<()> {
        let mesh = mesh_io::load_bytes(name, bytes, &self.config.load)?;
        self.load_mesh(mesh)
    }

    /// Load a mesh file from disk.
    ///
    /// # Errors
    ///
    /// Same as [`Session::load`].
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> SessionResult<()> {
        let mesh = mesh_io::load_mesh(path, &self.config.load)?;
        self.load_mesh(mesh)
    }

    /// Install an already triangulated mesh.
    ///
    /// The mesh is normalized and the solver's operators are built before
    /// the previous generation is released. The origin set is cleared and
    /// every vertex gets the marker color.
    ///
    /// # Errors
    ///
    /// [`SessionError::Geodesic`] when operator precompute fails.
    pub fn load_mesh(&mut self, mesh: IndexedMesh) -> SessionResult<()> {
        let normalized = normalize(mesh);
        let operators = self.solver.precompute(&normalized.mesh)?;

        // One live generation at a time.
        drop(self.current.take());
        self.origins.clear();
        self.loads += 1;

        let vertex_count = normalized.mesh.vertices.len();
        let generation = Generation {
            id: self.loads,
            display: normalized.display_mesh(),
            normalized,
            operators,
            field: None,
            isolines: IsolineSet::empty(self.config.isolines.level_count),
            colors: vec![self.config.marker_color; vertex_count],
        };
        info!(
            generation = generation.id,
            vertices = vertex_count,
            faces = generation.display.faces.len(),
            "Mesh loaded"
        );
        self.current = Some(generation);
        Ok(())
    }

    /// Apply one interaction and run the resulting recompute to completion.
    ///
    /// Picking a vertex that is already an origin changes nothing. Taking
    /// `&mut self` keeps a single recompute in flight per session.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoMesh`] when picking without a loaded mesh
    /// - [`SessionError::InvalidVertex`] for a vertex outside the mesh
    /// - [`SessionError::Geodesic`] or [`SessionError::Isoline`] when the
    ///   recompute fails; the pick is rolled back and the previous field,
    ///   isolines and colors stay installed
    pub async fn handle(&mut self, interaction: Interaction) -> SessionResult<()> {
        match interaction {
            Interaction::PickVertex(vertex) => self.pick(vertex).await,
            Interaction::ClearOrigins => {
                self.clear();
                Ok(())
            }
        }
    }

    /// [`Session::handle`] driven to completion on the calling thread.
    ///
    /// # Errors
    ///
    /// Same as [`Session::handle`].
    pub fn handle_blocking(&mut self, interaction: Interaction) -> SessionResult<()> {
        pollster::block_on(self.handle(interaction))
    }

    async fn pick(&mut self, vertex: u32) -> SessionResult<()> {
        let vertex_count = self
            .current
            .as_ref()
            .ok_or(SessionError::NoMesh)?
            .normalized
            .mesh
            .vertices
            .len();
        if vertex as usize >= vertex_count {
            return Err(SessionError::InvalidVertex {
                vertex,
                vertex_count,
            });
        }
        if !self.origins.insert(vertex) {
            debug!(vertex, "Vertex already an origin");
            return Ok(());
        }

        if let Err(err) = self.recompute().await {
            self.origins.remove(vertex);
            warn!(vertex, error = %err, "Recompute failed, keeping previous field");
            return Err(err);
        }
        Ok(())
    }

    async fn recompute(&mut self) -> SessionResult<()> {
        let generation = self.current.as_mut().ok_or(SessionError::NoMesh)?;
        let mesh = &generation.normalized.mesh;

        let request = SolveRequest::new(self.origins.as_slice(), mesh, &generation.operators);
        let field = self.solver.solve(request).await?;
        let isolines = extract_isolines(mesh, field.as_slice(), &self.config.isolines)?
            .translated(&generation.normalized.display_offset());
        let colors = heat_colors(&field, &self.config);

        info!(
            generation = generation.id,
            origins = self.origins.len(),
            resolved = field.resolved_count(),
            max_distance = field.max_distance(),
            segments = isolines.len(),
            "Recomputed distance field"
        );

        generation.field = Some(field);
        generation.isolines = isolines;
        generation.colors = colors;
        Ok(())
    }

    fn clear(&mut self) {
        self.origins.clear();
        if let Some(generation) = self.current.as_mut() {
            generation.field = None;
            generation.isolines = IsolineSet::empty(self.config.isolines.level_count);
            generation.colors.fill(self.config.marker_color);
            debug!(generation = generation.id, "Origins cleared");
        }
    }

    /// Rendering view of the current generation, `None` before the first load.
    #[must_use]
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.current.as_ref().map(|g| Frame {
            mesh: &g.display,
            colors: &g.colors,
            isolines: &g.isolines,
            generation: g.id,
        })
    }

    /// Current origins in pick order.
    #[must_use]
    pub const fn origins(&self) -> &OriginSet {
        &self.origins
    }

    /// Distance field of the current origins, `None` while there are none.
    #[must_use]
    pub fn field(&self) -> Option<&DistanceField> {
        self.current.as_ref().and_then(|g| g.field.as_ref())
    }

    /// The loaded mesh in its normalized, uncentered frame.
    #[must_use]
    pub fn normalized(&self) -> Option<&NormalizedMesh> {
        self.current.as_ref().map(|g| &g.normalized)
    }

    /// The solver's cached operators for the loaded mesh.
    #[must_use]
    pub fn operators(&self) -> Option<&S::Operators> {
        self.current.as_ref().map(|g| &g.operators)
    }

    /// Whether a mesh is loaded.
    #[must_use]
    pub const fn has_mesh(&self) -> bool {
        self.current.is_some()
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The distance solver.
    #[must_use]
    pub const fn solver(&self) -> &S {
        &self.solver
    }
}

/// Heat color per vertex; unreached vertices get the unresolved color.
fn heat_colors(field: &DistanceField, config: &SessionConfig) -> Vec<Rgb> {
    (0..field.len())
        .map(|v| {
            field
                .normalized_value(v)
                .map_or(config.unresolved_color, color_for)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::colormap::{HEAT_PALETTE, ORIGIN_MARKER};

    #[test]
    fn colors_follow_normalized_distance() {
        let field = DistanceField::from_distances(vec![0.0, 0.5, 1.0, f64::NAN]);
        let colors = heat_colors(&field, &SessionConfig::default());
        assert_eq!(colors[0], HEAT_PALETTE[0]);
        assert_eq!(colors[1], color_for(0.5));
        assert_eq!(colors[2], HEAT_PALETTE[7]);
        assert_eq!(colors[3], Rgb::BLACK);
    }

    #[test]
    fn all_zero_field_is_unresolved_colored() {
        let field = DistanceField::from_distances(vec![0.0, 0.0]);
        let config = SessionConfig::default().with_unresolved_color(ORIGIN_MARKER);
        assert_eq!(heat_colors(&field, &config), vec![ORIGIN_MARKER; 2]);
    }

    #[test]
    fn frame_before_load() {
        let session = Session::heat_method(SessionConfig::default());
        assert!(session.frame().is_none());
        assert!(!session.has_mesh());
        assert!(session.field().is_none());
    }

    #[test]
    fn color_buffer_is_flat() {
        let mesh = IndexedMesh::new();
        let isolines = IsolineSet::empty(20);
        let colors = [Rgb::WHITE, ORIGIN_MARKER];
        let frame = Frame {
            mesh: &mesh,
            colors: &colors,
            isolines: &isolines,
            generation: 1,
        };
        assert_eq!(frame.color_buffer(), vec![1.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
    }
}
