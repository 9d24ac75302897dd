//! Path normalization and route patterns
//!
//! Paths are compared literally and case-sensitively. A single trailing
//! slash is ignored, except for the root path `/`.
//!
//! Patterns are made of static segments and named parameters:
//! ```text
//! /admin/users      static
//! /users/:id        one parameter segment
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RouteError;
use crate::Result;

/// Strip a single trailing slash, leaving the root path untouched.
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Iterate the segments of a normalized path. The root path has none.
fn segments_of(path: &str) -> impl Iterator<Item = &str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    (!rest.is_empty())
        .then(|| rest.split('/'))
        .into_iter()
        .flatten()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// Normalized pattern text
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'".to_string()));
        }
        if pattern.contains(|c: char| c == '?' || c == '#') {
            return Err(invalid("must not contain a query or fragment".to_string()));
        }

        let source = normalize_path(pattern).to_string();
        let mut segments = Vec::new();

        for part in segments_of(&source) {
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter name cannot be empty".to_string())),
                Some(name) => {
                    let repeated = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if repeated {
                        return Err(invalid(format!("parameter '{}' appears twice", name)));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self { source, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Static(_)))
    }

    /// Key used to detect conflicting patterns.
    ///
    /// Parameter names are erased, so `/users/:id` and `/users/:uid`
    /// share a key. A static pattern's key is its normalized path.
    pub fn conflict_key(&self) -> String {
        if self.is_static() {
            return self.source.clone();
        }

        let mut key = String::with_capacity(self.source.len());
        for segment in &self.segments {
            key.push('/');
            match segment {
                Segment::Static(text) => key.push_str(text),
                Segment::Param(_) => key.push(':'),
            }
        }
        key
    }

    /// Match a concrete path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        let mut parts = segments_of(normalize_path(path));

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Static(text) if text == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }

    /// Build a concrete path. On failure, returns the name of the first
    /// parameter missing from `params`.
    pub fn interpolate<'a>(
        &'a self,
        params: &BTreeMap<String, String>,
    ) -> std::result::Result<String, &'a str> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::with_capacity(self.source.len());
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => path.push_str(value),
                    _ => return Err(name.as_str()),
                },
            }
        }
        Ok(path)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
