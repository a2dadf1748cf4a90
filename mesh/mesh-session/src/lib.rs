//! Interactive geodesic-distance sessions.
//!
//! A [`Session`] ties the pipeline together for a front end:
//!
//! 1. [`Session::load`] parses a mesh file, normalizes the mesh and builds
//!    the solver's operators once.
//! 2. [`Session::handle`] reacts to [`Interaction`]s. Each pick solves the
//!    distance from all origins, extracts isolines and recolors vertices
//!    with the [`HEAT_PALETTE`].
//! 3. [`Session::frame`] hands the result to a renderer.
//!
//! Failed loads and failed solves leave the previous state on screen.
//!
//! # Example
//!
//! ```
//! use mesh_session::{Interaction, ORIGIN_MARKER, Session, SessionConfig};
//!
//! let off = "OFF\n4 2 0\n0 0 0\n2 0 0\n2 2 0\n0 2 0\n3 0 1 2\n3 0 2 3\n";
//! let mut session = Session::heat_method(SessionConfig::default());
//! session.load("plate.off", off.as_bytes()).unwrap();
//!
//! session.handle_blocking(Interaction::PickVertex(0)).unwrap();
//! assert!(session.field().is_some());
//!
//! session.handle_blocking(Interaction::ClearOrigins).unwrap();
//! let frame = session.frame().unwrap();
//! assert!(frame.colors.iter().all(|c| *c == ORIGIN_MARKER));
//! assert!(frame.isolines.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod colormap;
mod config;
mod error;
mod origins;
mod session;

pub use colormap::{COLOR_CEILING, HEAT_PALETTE, ORIGIN_MARKER, Rgb, color_for};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use origins::OriginSet;
pub use session::{Frame, Interaction, Session};
