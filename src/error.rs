//! Domain error types for appgrid
//!
//! Provides structured error types for different domains:
//! - `GestureError` for pointer sequences the reducer cannot accept
//! - `CatalogError` for loading the application list
//! - `AppGridError` as the top-level error type
//!
//! Catalog errors stay inside the scanner, which logs and skips them.

use std::path::PathBuf;
use thiserror::Error;

use crate::scroll::{GesturePhase, PointerKind};

/// Top-level error type for appgrid
#[derive(Debug, Error)]
pub enum AppGridError {
    #[error("Gesture error: {0}")]
    Gesture(#[from] GestureError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Pointer sequences that break the gesture protocol.
///
/// These indicate a dispatch bug; the reducer rejects the event and leaves
/// the scroll record untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("{kind} received while a drag is already active")]
    AlreadyDragging { kind: PointerKind },

    #[error("{kind} received without a preceding start")]
    NotDragging { kind: PointerKind },
}

impl GestureError {
    /// Phase the reducer was in when the event was rejected.
    pub fn phase(&self) -> GesturePhase {
        match self {
            GestureError::AlreadyDragging { .. } => GesturePhase::Dragging,
            GestureError::NotDragging { .. } => GesturePhase::Idle,
        }
    }
}

/// Errors related to loading application entries
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read application directory {0}: {1}")]
    ReadDir(PathBuf, std::io::Error),

    #[error("Failed to read entry {0}: {1}")]
    ReadEntry(PathBuf, std::io::Error),

    #[error("Entry {0} has no [Desktop Entry] section")]
    MissingSection(PathBuf),
}

/// Result type alias for AppGridError
pub type Result<T> = std::result::Result<T, AppGridError>;

/// Result type alias for GestureError
pub type GestureResult<T> = std::result::Result<T, GestureError>;

/// Result type alias for CatalogError
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

impl From<&str> for AppGridError {
    fn from(msg: &str) -> Self {
        AppGridError::Other(msg.to_string())
    }
}
