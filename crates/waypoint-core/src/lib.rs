//! Waypoint Core
//!
//! Turns navigation requests into mounted views:
//! 1. Normalize the requested path
//! 2. Look it up in the route table (miss -> `NotFoundError`)
//! 3. Pick the hosting layout
//! 4. Record the transition in the history
//! 5. Notify the render targets with the resolved view and layout
//!
//! The route table is immutable once the [`Router`] is built; the history
//! is the only mutable state and sits behind a single mutex.

mod config;
mod error;
mod location;
mod render;
mod resolver;
mod router;

pub use config::Config;
pub use error::{CoreError, NotFoundError};
pub use location::Location;
pub use render::RenderTarget;
pub use resolver::{NavigationMode, ResolvedTarget, Resolver, SharedHistory};
pub use router::{NavigateOptions, Router};

// Re-export components
pub use waypoint_history::{HistoryManager, NavigationEntry, TraversalState};
pub use waypoint_routes::{
    normalize_path, DuplicatePolicy, LayoutClassifier, LayoutTag, RouteDefinition, RouteError,
    RouteMatch, RoutePattern, RouteTable, ViewId,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
