//! Layout classification
//!
//! Every resolved route is hosted by exactly one layout:
//! ```text
//! Blank     bare page, no navigation chrome (login, register)
//! AppShell  page wrapped in the application chrome
//! ```

use serde::{Deserialize, Serialize};

use crate::route::RouteDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutTag {
    /// No surrounding chrome
    #[serde(rename = "blank")]
    Blank,
    /// Wrapped in navigation sidebars and header
    #[default]
    #[serde(rename = "app", alias = "app-shell")]
    AppShell,
}

impl LayoutTag {
    /// Returns true if the view is mounted inside the application chrome
    pub fn is_chrome_wrapped(&self) -> bool {
        matches!(self, LayoutTag::AppShell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutTag::Blank => "blank",
            LayoutTag::AppShell => "app",
        }
    }
}

impl std::fmt::Display for LayoutTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LayoutTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blank" => Ok(LayoutTag::Blank),
            "app" | "app-shell" | "appshell" => Ok(LayoutTag::AppShell),
            _ => Err(format!("Unknown layout: {}", s)),
        }
    }
}

/// Picks the layout hosting a route.
///
/// Pure function of the route definition and the configured default, so a
/// route always lands in the same layout for a given table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutClassifier {
    default: LayoutTag,
}

impl LayoutClassifier {
    pub fn new(default: LayoutTag) -> Self {
        Self { default }
    }

    pub fn default_layout(&self) -> LayoutTag {
        self.default
    }

    pub fn classify(&self, route: &RouteDefinition) -> LayoutTag {
        route.layout.unwrap_or(self.default)
    }
}
