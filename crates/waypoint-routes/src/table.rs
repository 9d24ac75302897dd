//! Route table
//!
//! Loaded once at startup, then shared read-only. Conflicts between
//! definitions are settled at registration time by the table's
//! [`DuplicatePolicy`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::RouteError;
use crate::pattern::{normalize_path, RoutePattern};
use crate::route::RouteDefinition;
use crate::Result;

/// What happens when a definition conflicts with an earlier one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail registration with `DuplicateRoute` / `DuplicateName`
    #[default]
    Reject,
    /// Last registered wins; conflicting earlier entries are removed and
    /// the new definition takes the earliest removed slot in match order
    Override,
}

#[derive(Debug, Clone)]
struct Entry {
    route: RouteDefinition,
    pattern: RoutePattern,
}

/// A successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDefinition,
    /// Values captured by parameter segments
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// Registration order
    entries: Vec<Entry>,
    /// Conflict key -> entry index
    by_key: HashMap<String, usize>,
    /// Route name -> entry index
    by_name: HashMap<String, usize>,
    policy: DuplicatePolicy,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a table from definitions, stopping at the first conflict
    pub fn from_definitions<I>(routes: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut table = Self::with_policy(policy);
        for route in routes {
            table.register(route)?;
        }

        tracing::info!(routes = table.len(), policy = ?policy, "Route table loaded");

        Ok(table)
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a route definition
    pub fn register(&mut self, route: RouteDefinition) -> Result<()> {
        let pattern = RoutePattern::parse(&route.path)?;
        let key = pattern.conflict_key();

        let path_conflict = self.by_key.get(&key).copied();
        let name_conflict = self.by_name.get(&route.name).copied();
        let mut slot = None;

        match self.policy {
            DuplicatePolicy::Reject => {
                if let Some(index) = path_conflict {
                    return Err(RouteError::DuplicateRoute {
                        path: pattern.to_string(),
                        existing: self.entries[index].route.name.clone(),
                        incoming: route.name,
                    });
                }
                if name_conflict.is_some() {
                    return Err(RouteError::DuplicateName(route.name));
                }
            }
            DuplicatePolicy::Override => {
                let mut shadowed: Vec<usize> =
                    path_conflict.into_iter().chain(name_conflict).collect();
                shadowed.sort_unstable();
                shadowed.dedup();

                if let Some(&first) = shadowed.first() {
                    slot = Some(first);
                    // Highest index first so earlier indices stay valid
                    for &index in shadowed.iter().rev() {
                        let old = self.entries.remove(index);
                        tracing::warn!(
                            path = %old.pattern,
                            route = %old.route.name,
                            incoming = %route.name,
                            "Route shadowed by later registration"
                        );
                    }
                }
            }
        }

        tracing::debug!(
            path = %pattern,
            route = %route.name,
            view = %route.view,
            "Registered route"
        );

        match slot {
            Some(index) => {
                self.entries.insert(index, Entry { route, pattern });
                self.reindex();
            }
            None => {
                let index = self.entries.len();
                self.by_key.insert(key, index);
                self.by_name.insert(route.name.clone(), index);
                self.entries.push(Entry { route, pattern });
            }
        }

        Ok(())
    }

    /// Find the route for a concrete path.
    ///
    /// Static routes win over parameter routes; parameter routes are tried
    /// in registration order.
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = normalize_path(path);

        if let Some(&index) = self.by_key.get(path) {
            let entry = &self.entries[index];
            if entry.pattern.is_static() {
                return Some(RouteMatch {
                    route: &entry.route,
                    params: BTreeMap::new(),
                });
            }
        }

        self.entries
            .iter()
            .filter(|entry| !entry.pattern.is_static())
            .find_map(|entry| {
                entry.pattern.matches(path).map(|params| RouteMatch {
                    route: &entry.route,
                    params,
                })
            })
    }

    /// Get a route by name
    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.by_name.get(name).map(|&index| &self.entries[index].route)
    }

    /// Build the concrete path of a named route
    pub fn href_for(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String> {
        let entry = self
            .by_name
            .get(name)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        entry
            .pattern
            .interpolate(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param: param.to_string(),
            })
    }

    /// All routes in registration order
    pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.entries.iter().map(|entry| &entry.route)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reindex(&mut self) {
        self.by_key.clear();
        self.by_name.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            self.by_key.insert(entry.pattern.conflict_key(), index);
            self.by_name.insert(entry.route.name.clone(), index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutTag;

    fn app_routes() -> Vec<RouteDefinition> {
        vec![
            RouteDefinition::new("/", "home", "PageHome"),
            RouteDefinition::new("/login", "login", "PageLogin").with_layout(LayoutTag::Blank),
            RouteDefinition::new("/register", "register", "PageRegister")
                .with_layout(LayoutTag::Blank),
            RouteDefinition::new("/profile", "profile", "PageProfile"),
            RouteDefinition::new("/graph", "graph", "PageGraph"),
            RouteDefinition::new("/admin", "admin", "PageAdmin"),
            RouteDefinition::new("/admin", "admin", "PageAdminView"),
            RouteDefinition::new("/admin/users", "admin-users", "PageAdminUsers"),
        ]
    }

    #[test]
    fn test_reject_duplicate_path() {
        let result = RouteTable::from_definitions(app_routes(), DuplicatePolicy::Reject);
        match result {
            Err(RouteError::DuplicateRoute { path, existing, incoming }) => {
                assert_eq!(path, "/admin");
                assert_eq!(existing, "admin");
                assert_eq!(incoming, "admin");
            }
            other => panic!("Expected DuplicateRoute, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_duplicate_name() {
        let mut table = RouteTable::new();
        table
            .register(RouteDefinition::new("/admin", "admin", "PageAdmin"))
            .unwrap();

        let err = table
            .register(RouteDefinition::new("/admin/view", "admin", "PageAdminView"))
            .unwrap_err();
        assert_eq!(err, RouteError::DuplicateName("admin".to_string()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_trailing_slash_conflicts() {
        let mut table = RouteTable::new();
        table
            .register(RouteDefinition::new("/graph", "graph", "PageGraph"))
            .unwrap();
        assert!(table
            .register(RouteDefinition::new("/graph/", "graph-2", "PageGraph"))
            .is_err());
    }

    #[test]
    fn test_override_last_registered_wins() {
        let table = RouteTable::from_definitions(app_routes(), DuplicatePolicy::Override).unwrap();
        assert_eq!(table.len(), 7);

        let matched = table.lookup("/admin").unwrap();
        assert_eq!(matched.route.view.as_str(), "PageAdminView");
        assert_eq!(table.get("admin").unwrap().view.as_str(), "PageAdminView");
    }

    #[test]
    fn test_override_by_name_removes_old_path() {
        let mut table = RouteTable::with_policy(DuplicatePolicy::Override);
        table
            .register(RouteDefinition::new("/admin", "admin", "PageAdmin"))
            .unwrap();
        table
            .register(RouteDefinition::new("/admin/view", "admin", "PageAdminView"))
            .unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.lookup("/admin").is_none());
        assert_eq!(
            table.lookup("/admin/view").unwrap().route.view.as_str(),
            "PageAdminView"
        );
    }

    #[test]
    fn test_override_keeps_match_order() {
        let mut table = RouteTable::with_policy(DuplicatePolicy::Override);
        table
            .register(RouteDefinition::new("/:section/users", "section-users", "PageSectionUsers"))
            .unwrap();
        table
            .register(RouteDefinition::new("/admin/:tab", "admin-tab", "PageAdminTab"))
            .unwrap();

        // Both patterns match; the earlier registration wins
        assert_eq!(table.lookup("/admin/users").unwrap().route.name, "section-users");

        table
            .register(RouteDefinition::new("/:area/users", "section-users", "PageAreaUsers"))
            .unwrap();

        assert_eq!(table.len(), 2);
        let matched = table.lookup("/admin/users").unwrap();
        assert_eq!(matched.route.view.as_str(), "PageAreaUsers");
        assert_eq!(matched.params.get("area").map(String::as_str), Some("admin"));
        let names: Vec<&str> = table.routes().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["section-users", "admin-tab"]);
    }

    #[test]
    fn test_lookup_normalizes() {
        let table = RouteTable::from_definitions(app_routes(), DuplicatePolicy::Override).unwrap();

        let with_slash = table.lookup("/admin/users/").unwrap();
        let without = table.lookup("/admin/users").unwrap();
        assert_eq!(with_slash, without);
        assert_eq!(table.lookup("/").unwrap().route.name, "home");

        assert!(table.lookup("/Admin").is_none());
        assert!(table.lookup("/missing").is_none());
    }

    #[test]
    fn test_static_wins_over_param() {
        let mut table = RouteTable::new();
        table
            .register(RouteDefinition::new("/admin/:section", "admin-section", "PageAdminSection"))
            .unwrap();
        table
            .register(RouteDefinition::new("/admin/users", "admin-users", "PageAdminUsers"))
            .unwrap();

        assert_eq!(table.lookup("/admin/users").unwrap().route.name, "admin-users");

        let matched = table.lookup("/admin/audit").unwrap();
        assert_eq!(matched.route.name, "admin-section");
        assert_eq!(matched.params.get("section").map(String::as_str), Some("audit"));

        // Parameter names do not distinguish patterns
        assert!(table
            .register(RouteDefinition::new("/admin/:tab", "admin-tab", "PageAdminTab"))
            .is_err());
    }

    #[test]
    fn test_href_for() {
        let mut table = RouteTable::new();
        table
            .register(RouteDefinition::new("/users/:id", "user", "PageUser"))
            .unwrap();

        let mut params = BTreeMap::new();
        assert!(matches!(
            table.href_for("user", &params),
            Err(RouteError::MissingParam { .. })
        ));

        params.insert("id".to_string(), "42".to_string());
        assert_eq!(table.href_for("user", &params).unwrap(), "/users/42");

        assert_eq!(
            table.href_for("nope", &params),
            Err(RouteError::UnknownRoute("nope".to_string()))
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut table = RouteTable::new();
        let err = table
            .register(RouteDefinition::new("login", "login", "PageLogin"))
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
        assert!(table.is_empty());
    }
}
