//! Requested location parsing
//!
//! Requests are resolved against a fixed in-app origin, so dot segments
//! collapse. Anything that would leave the origin is not an in-app location.
//!
//! Path segments are percent-decoded after parsing, so they compare equal
//! to route patterns written in plain text (`/café`, `/my notes`). A
//! segment that decodes to invalid UTF-8 or to a `/` is rejected.

use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use url::Url;

use waypoint_routes::normalize_path;

const APP_ORIGIN: &str = "http://waypoint.invalid/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Normalized, decoded path
    pub path: String,
    /// Decoded query pairs; on repeated keys the last value wins
    pub query: BTreeMap<String, String>,
    /// Decoded fragment, without the leading `#`
    pub fragment: Option<String>,
    raw_query: Option<String>,
}

impl Location {
    pub fn parse(requested: &str) -> Option<Self> {
        let requested = requested.trim();
        if !requested.starts_with('/') || requested.starts_with("//") {
            return None;
        }

        let base = Url::parse(APP_ORIGIN).ok()?;
        let url = base.join(requested).ok()?;
        if url.origin() != base.origin() {
            return None;
        }

        let path = decode_path(url.path())?;
        let query = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        let fragment = url
            .fragment()
            .map(|fragment| percent_decode_str(fragment).decode_utf8_lossy().into_owned());

        Some(Self {
            path: normalize_path(&path).to_string(),
            query,
            fragment,
            raw_query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    /// Path plus query string, without the fragment.
    ///
    /// A literal `%`, `?` or `#` in the path is escaped so the result parses
    /// back to the same location.
    pub fn full_path(&self) -> String {
        let path = self
            .path
            .replace('%', "%25")
            .replace('?', "%3F")
            .replace('#', "%23");
        match &self.raw_query {
            Some(query) => format!("{}?{}", path, query),
            None => path,
        }
    }
}

fn decode_path(encoded: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in encoded.split('/') {
        let decoded = percent_decode_str(segment).decode_utf8().ok()?;
        if decoded.contains('/') {
            return None;
        }
        segments.push(decoded.into_owned());
    }
    Some(segments.join("/"))
}
