//! Route table error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Duplicate route for path {path}: '{incoming}' conflicts with '{existing}'")]
    DuplicateRoute {
        path: String,
        existing: String,
        incoming: String,
    },

    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    #[error("Invalid route pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Missing parameter '{param}' for route {route}")]
    MissingParam { route: String, param: String },
}
