//! Router configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use waypoint_routes::{DuplicatePolicy, LayoutTag, RouteDefinition};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout for routes that do not name one
    pub default_layout: LayoutTag,
    /// How conflicting route definitions are handled
    pub duplicate_policy: DuplicatePolicy,
    /// Maximum retained history entries; `None` keeps everything
    pub history_limit: Option<usize>,
    /// Route definitions in registration order
    pub routes: Vec<RouteDefinition>,
}

impl Config {
    pub fn new(routes: Vec<RouteDefinition>) -> Self {
        Self {
            routes,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "Loading router configuration");
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == Some(0) {
            return Err(CoreError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_layout: LayoutTag::AppShell,
            duplicate_policy: DuplicatePolicy::Reject,
            history_limit: Some(100),
            routes: Vec::new(),
        }
    }
}
