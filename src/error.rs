//! Error types for Glimmer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlimmerError {
    /// Degenerate configuration or geometry: ray count < 1, zero-length
    /// direction, non-positive radius, kind mismatch on an angle operation.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Operation referenced a deleted or unknown emitter/absorber handle.
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Event channel error: {0}")]
    EventChannel(String),
}

pub type Result<T> = std::result::Result<T, GlimmerError>;
