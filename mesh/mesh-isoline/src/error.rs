//! Error types for isoline extraction.

use thiserror::Error;

/// Result type for isoline operations.
pub type IsolineResult<T> = Result<T, IsolineError>;

/// Errors that can occur during isoline extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsolineError {
    /// The level count must be at least one.
    #[error("invalid level count: {level_count}")]
    InvalidLevelCount {
        /// The rejected value.
        level_count: u32,
    },

    /// The scalar field does not have one value per vertex.
    #[error("scalar field has {field_len} values but the mesh has {vertex_count} vertices")]
    FieldLengthMismatch {
        /// Number of values in the field.
        field_len: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}
