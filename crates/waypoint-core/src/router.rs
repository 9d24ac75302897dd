//! Router
//!
//! Entry point for navigation requests. Owns the route table, the history
//! and the render targets, and is passed by handle to whoever needs to
//! navigate. Cloning shares state.

use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;

use waypoint_history::{HistoryManager, NavigationEntry, TraversalState};
use waypoint_routes::{LayoutClassifier, RouteTable};

use crate::config::Config;
use crate::error::NotFoundError;
use crate::render::RenderTarget;
use crate::resolver::{NavigationMode, ResolvedTarget, Resolver};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }

    fn mode(&self) -> NavigationMode {
        if self.replace {
            NavigationMode::Replace
        } else {
            NavigationMode::Push
        }
    }
}

#[derive(Clone)]
pub struct Router {
    resolver: Resolver,
    render_targets: Arc<RwLock<Vec<Arc<dyn RenderTarget>>>>,
}

impl Router {
    /// Build a router from configuration.
    ///
    /// Conflicting route definitions abort construction.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let table =
            RouteTable::from_definitions(config.routes.iter().cloned(), config.duplicate_policy)?;
        let router = Self::from_parts(
            table,
            LayoutClassifier::new(config.default_layout),
            config.history_limit,
        );

        tracing::info!(
            routes = router.table().len(),
            default_layout = %config.default_layout,
            "Router initialized"
        );

        Ok(router)
    }

    pub fn from_parts(
        table: RouteTable,
        classifier: LayoutClassifier,
        history_limit: Option<usize>,
    ) -> Self {
        let history = match history_limit {
            Some(limit) => HistoryManager::with_limit(limit),
            None => HistoryManager::new(),
        };

        Self {
            resolver: Resolver::new(Arc::new(table), classifier, Arc::new(Mutex::new(history))),
            render_targets: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a target notified after every successful navigation
    pub fn add_render_target(&self, target: Arc<dyn RenderTarget>) {
        self.render_targets.write().push(target);
    }

    pub fn navigate(
        &self,
        path: &str,
        options: NavigateOptions,
    ) -> std::result::Result<ResolvedTarget, NotFoundError> {
        let target = self.resolver.resolve_with(path, options.mode())?;

        tracing::debug!(
            path = %target.full_path,
            route = %target.route_name,
            replace = options.replace,
            "Navigated"
        );

        self.notify(&target);
        Ok(target)
    }

    pub fn push(&self, path: &str) -> std::result::Result<ResolvedTarget, NotFoundError> {
        self.navigate(path, NavigateOptions::default())
    }

    pub fn replace(&self, path: &str) -> std::result::Result<ResolvedTarget, NotFoundError> {
        self.navigate(path, NavigateOptions::replace())
    }

    /// Navigate to a named route, filling its parameter segments
    pub fn navigate_to_name(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
        options: NavigateOptions,
    ) -> Result<ResolvedTarget> {
        let href = self.table().href_for(name, params)?;
        Ok(self.navigate(&href, options)?)
    }

    pub fn back(&self) -> Option<ResolvedTarget> {
        self.go(-1)
    }

    pub fn forward(&self) -> Option<ResolvedTarget> {
        self.go(1)
    }

    /// Traverse the history by `delta` entries and re-render the landing
    /// entry. No entry is recorded. `None` when out of range.
    pub fn go(&self, delta: isize) -> Option<ResolvedTarget> {
        let entry = self.resolver.history().lock().go(delta)?;
        self.render_entry(&entry)
    }

    /// Handle a browser back/forward signal that landed on `path`.
    ///
    /// Moves the cursor to the closest entry with that location, or records
    /// a new entry when the history holds none.
    pub fn pop_state(&self, path: &str) -> std::result::Result<ResolvedTarget, NotFoundError> {
        let target = self.resolver.match_location(path)?;

        {
            let mut history = self.resolver.history().lock();
            let cursor = history.cursor().unwrap_or(0);
            let closest = history
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.path == target.full_path)
                .min_by_key(|(index, _)| index.abs_diff(cursor))
                .map(|(_, entry)| entry.sequence);

            match closest {
                Some(sequence) => {
                    history.go_to_sequence(sequence);
                }
                None => {
                    tracing::debug!(path = %target.full_path, "Pop state outside known history");
                    history.push(target.full_path.clone(), target.route_name.clone());
                }
            }
        }

        self.notify(&target);
        Ok(target)
    }

    pub fn current(&self) -> Option<NavigationEntry> {
        self.resolver.history().lock().current()
    }

    /// Resolution of the current entry
    pub fn current_target(&self) -> Option<ResolvedTarget> {
        let entry = self.current()?;
        self.resolver.match_location(&entry.path).ok()
    }

    pub fn history_state(&self) -> TraversalState {
        self.resolver.history().lock().state()
    }

    /// Snapshot of the history entries, oldest first
    pub fn history(&self) -> Vec<NavigationEntry> {
        self.resolver.history().lock().entries().to_vec()
    }

    pub fn table(&self) -> &RouteTable {
        self.resolver.table()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    fn render_entry(&self, entry: &NavigationEntry) -> Option<ResolvedTarget> {
        match self.resolver.match_location(&entry.path) {
            Ok(target) => {
                self.notify(&target);
                Some(target)
            }
            Err(err) => {
                tracing::warn!(path = %err.path, "History entry no longer resolves");
                None
            }
        }
    }

    fn notify(&self, target: &ResolvedTarget) {
        let targets = self.render_targets.read().clone();
        for render_target in targets {
            render_target.mount(target);
        }
    }
}
