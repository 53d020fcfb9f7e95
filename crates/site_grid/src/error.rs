//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, unusable regions, failing geometry primitives and the
//! empty-grid condition raised when no cell meets the overlap threshold.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by [`Error::EmptyGrid`].
pub const EMPTY_GRID_MESSAGE: &str =
    "grid cannot be drawn; reduce resolution or use a projection in meters";

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error(
        "grid cannot be drawn; reduce resolution or use a projection in meters \
         (no cell of {cells} reaches overlap {threshold})"
    )]
    EmptyGrid { threshold: f64, cells: usize },
}

impl Error {
    /// Returns `true` for errors caused by caller parameters rather than by the geometry.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfig(_) | Error::EmptyGrid { .. })
    }
}
