//! Route definitions

use serde::{Deserialize, Serialize};

use crate::layout::LayoutTag;

/// Opaque reference to a view owned by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Path pattern, e.g. `/admin/users`
    pub path: String,
    /// Unique symbolic name
    pub name: String,
    /// View mounted when the route matches
    pub view: ViewId,
    /// Hosting layout; the classifier default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutTag>,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: view.into(),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutTag) -> Self {
        self.layout = Some(layout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_layout() {
        let route: RouteDefinition =
            serde_json::from_str(r#"{"path": "/graph", "name": "graph", "view": "PageGraph"}"#)
                .unwrap();
        assert_eq!(route.view.as_str(), "PageGraph");
        assert!(route.layout.is_none());
    }

    #[test]
    fn test_deserialize_with_layout() {
        let route: RouteDefinition = serde_json::from_str(
            r#"{"path": "/login", "name": "login", "view": "PageLogin", "layout": "blank"}"#,
        )
        .unwrap();
        assert_eq!(route.layout, Some(LayoutTag::Blank));
    }
}
