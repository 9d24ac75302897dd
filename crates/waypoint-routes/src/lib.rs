//! Waypoint Routes
//!
//! Static table mapping URL paths to views:
//! - Paths match literally and case-sensitively, ignoring one trailing slash
//! - Every route names the view it mounts and, optionally, its layout
//! - Conflicting definitions are rejected at load time unless the table
//!   is built with [`DuplicatePolicy::Override`]

mod error;
mod layout;
mod pattern;
mod route;
mod table;

pub use error::RouteError;
pub use layout::{LayoutClassifier, LayoutTag};
pub use pattern::{normalize_path, RoutePattern, Segment};
pub use route::{RouteDefinition, ViewId};
pub use table::{DuplicatePolicy, RouteMatch, RouteTable};

pub type Result<T> = std::result::Result<T, RouteError>;
