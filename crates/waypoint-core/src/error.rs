//! Core error types

use thiserror::Error;

/// No route matches the requested location.
///
/// Recoverable: callers map it to their fallback view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No route matches path: {path}")]
pub struct NotFoundError {
    /// The path as originally requested
    pub path: String,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Route table error: {0}")]
    Route(#[from] waypoint_routes::RouteError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
