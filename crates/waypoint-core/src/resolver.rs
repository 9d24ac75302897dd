//! Path resolution
//!
//! ```text
//! requested path -> normalize -> table lookup -> classify layout
//!                -> record history entry -> ResolvedTarget
//! ```

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use waypoint_history::HistoryManager;
use waypoint_routes::{LayoutClassifier, LayoutTag, RouteTable, ViewId};

use crate::error::NotFoundError;
use crate::location::Location;

/// History shared between the resolver and its owner
pub type SharedHistory = Arc<Mutex<HistoryManager>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// Append an entry, discarding forward history
    #[default]
    Push,
    /// Swap the current entry
    Replace,
}

/// Outcome of a successful resolution.
///
/// Carries no timestamps, so resolving the same path twice yields equal
/// targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub view_id: ViewId,
    pub layout: LayoutTag,
    pub route_name: String,
    /// Normalized path
    pub path: String,
    /// Path plus query string
    pub full_path: String,
    /// Values captured by parameter segments
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    /// Fragment without the leading `#`, for in-page anchors
    pub fragment: Option<String>,
}

#[derive(Clone)]
pub struct Resolver {
    table: Arc<RouteTable>,
    classifier: LayoutClassifier,
    history: SharedHistory,
}

impl Resolver {
    pub fn new(
        table: Arc<RouteTable>,
        classifier: LayoutClassifier,
        history: SharedHistory,
    ) -> Self {
        Self {
            table,
            classifier,
            history,
        }
    }

    /// Resolve a path and push it onto the history
    pub fn resolve(&self, requested: &str) -> Result<ResolvedTarget, NotFoundError> {
        self.resolve_with(requested, NavigationMode::Push)
    }

    pub fn resolve_with(
        &self,
        requested: &str,
        mode: NavigationMode,
    ) -> Result<ResolvedTarget, NotFoundError> {
        let target = self.match_location(requested)?;

        let mut history = self.history.lock();
        match mode {
            NavigationMode::Push => {
                history.push(target.full_path.clone(), target.route_name.clone());
            }
            NavigationMode::Replace => {
                history.replace(target.full_path.clone(), target.route_name.clone());
            }
        }

        Ok(target)
    }

    /// Resolve a path without touching the history
    pub fn match_location(&self, requested: &str) -> Result<ResolvedTarget, NotFoundError> {
        let Some(location) = Location::parse(requested) else {
            tracing::warn!(path = %requested, "Not an in-app location");
            return Err(NotFoundError {
                path: requested.to_string(),
            });
        };

        let Some(matched) = self.table.lookup(&location.path) else {
            tracing::warn!(path = %requested, "No route matches");
            return Err(NotFoundError {
                path: requested.to_string(),
            });
        };

        let layout = self.classifier.classify(matched.route);

        tracing::debug!(
            path = %location.path,
            route = %matched.route.name,
            view = %matched.route.view,
            layout = %layout,
            "Resolved route"
        );

        Ok(ResolvedTarget {
            view_id: matched.route.view.clone(),
            layout,
            route_name: matched.route.name.clone(),
            full_path: location.full_path(),
            path: location.path,
            params: matched.params,
            query: location.query,
            fragment: location.fragment,
        })
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn classifier(&self) -> LayoutClassifier {
        self.classifier
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_routes::{DuplicatePolicy, RouteDefinition};

    fn resolver(policy: DuplicatePolicy) -> Resolver {
        let mut table = RouteTable::with_policy(policy);
        table
            .register(RouteDefinition::new("/", "home", "PageHome"))
            .unwrap();
        table
            .register(
                RouteDefinition::new("/login", "login", "PageLogin").with_layout(LayoutTag::Blank),
            )
            .unwrap();
        table
            .register(RouteDefinition::new("/admin", "admin", "PageAdmin"))
            .unwrap();
        table
            .register(RouteDefinition::new("/users/:id", "user", "PageUser"))
            .unwrap();
        table
            .register(RouteDefinition::new("/café", "cafe", "PageCafe"))
            .unwrap();
        table
            .register(RouteDefinition::new("/my notes", "notes", "PageNotes"))
            .unwrap();

        Resolver::new(
            Arc::new(table),
            LayoutClassifier::new(LayoutTag::AppShell),
            Arc::new(Mutex::new(HistoryManager::new())),
        )
    }

    #[test]
    fn test_resolve_records_history() {
        let resolver = resolver(DuplicatePolicy::Reject);

        let target = resolver.resolve("/login").unwrap();
        assert_eq!(target.view_id.as_str(), "PageLogin");
        assert_eq!(target.layout, LayoutTag::Blank);
        assert_eq!(target.route_name, "login");

        let current = resolver.history().lock().current().unwrap();
        assert_eq!(current.path, "/login");
        assert_eq!(current.route_name, "login");
    }

    #[test]
    fn test_layout_default_applies() {
        let resolver = resolver(DuplicatePolicy::Reject);
        let target = resolver.resolve("/admin").unwrap();
        assert_eq!(target.layout, LayoutTag::AppShell);
    }

    #[test]
    fn test_not_found_carries_requested_path() {
        let resolver = resolver(DuplicatePolicy::Reject);

        let err = resolver.resolve("/nowhere/").unwrap_err();
        assert_eq!(err.path, "/nowhere/");
        assert!(resolver.history().lock().is_empty());

        let err = resolver.resolve("admin").unwrap_err();
        assert_eq!(err.path, "admin");
    }

    #[test]
    fn test_trailing_slash_resolves_identically() {
        let resolver = resolver(DuplicatePolicy::Reject);
        assert_eq!(
            resolver.resolve("/admin/").unwrap(),
            resolver.resolve("/admin").unwrap()
        );
        assert_eq!(resolver.resolve("/").unwrap().route_name, "home");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = resolver(DuplicatePolicy::Reject);
        let first = resolver.resolve("/users/42?tab=posts").unwrap();
        let second = resolver.resolve("/users/42?tab=posts").unwrap();
        assert_eq!(first, second);

        assert_eq!(first.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(first.query.get("tab").map(String::as_str), Some("posts"));
        assert_eq!(first.full_path, "/users/42?tab=posts");
        assert_eq!(resolver.history().lock().len(), 2);
    }

    #[test]
    fn test_resolve_non_ascii_and_spaced_paths() {
        let resolver = resolver(DuplicatePolicy::Reject);

        assert_eq!(resolver.resolve("/café").unwrap().view_id.as_str(), "PageCafe");
        assert_eq!(
            resolver.resolve("/caf%C3%A9/").unwrap().view_id.as_str(),
            "PageCafe"
        );
        let notes = resolver.resolve("/my notes").unwrap();
        assert_eq!(notes.route_name, "notes");

        // History keeps the readable form
        assert_eq!(resolver.history().lock().current().unwrap().path, "/my notes");
    }

    #[test]
    fn test_params_are_decoded_like_query() {
        let resolver = resolver(DuplicatePolicy::Reject);
        let target = resolver.resolve("/users/john%20doe?name=john%20doe").unwrap();
        assert_eq!(target.params.get("id").map(String::as_str), Some("john doe"));
        assert_eq!(target.query.get("name").map(String::as_str), Some("john doe"));

        assert!(resolver.resolve("/caf%E9").is_err());
    }

    #[test]
    fn test_fragment_is_carried() {
        let resolver = resolver(DuplicatePolicy::Reject);
        let target = resolver.resolve("/admin#members").unwrap();
        assert_eq!(target.fragment.as_deref(), Some("members"));
        assert_eq!(target.full_path, "/admin");
    }

    #[test]
    fn test_replace_mode() {
        let resolver = resolver(DuplicatePolicy::Reject);
        resolver.resolve("/").unwrap();
        resolver
            .resolve_with("/login", NavigationMode::Replace)
            .unwrap();

        let history = resolver.history().lock();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().unwrap().path, "/login");
    }

    #[test]
    fn test_match_location_has_no_side_effect() {
        let resolver = resolver(DuplicatePolicy::Reject);
        resolver.match_location("/admin").unwrap();
        assert!(resolver.history().lock().is_empty());
    }
}
