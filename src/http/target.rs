//! Target URL extraction.
//!
//! The forwarding route carries an absolute URL in its wildcard segment,
//! e.g. `/proxy/https://example.com/file.txt`. Clients, browsers and
//! intermediaries tend to mangle the scheme on the way in: the colon gets
//! dropped (`https//example.com`) or the double slash gets merged
//! (`https:/example.com`). Both are repaired before parsing.

use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::ForwardError;

const SCHEMES: [&str; 2] = ["https", "http"];

/// Restore a mangled `http`/`https` scheme prefix.
///
/// Input that does not start with a known scheme is returned unchanged
/// (minus a single leading `/`) so the URL parser can reject it.
pub fn repair_scheme(raw: &str) -> String {
    let raw = raw.strip_prefix('/').unwrap_or(raw);

    for scheme in SCHEMES {
        let Some(head) = raw.get(..scheme.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(scheme) {
            continue;
        }

        let rest = &raw[scheme.len()..];
        let rest = rest.strip_prefix(':').unwrap_or(rest);
        if !rest.starts_with('/') {
            continue;
        }

        return format!("{scheme}://{}", rest.trim_start_matches('/'));
    }

    raw.to_string()
}

/// An absolute http(s) URL to forward a request to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    /// Build the target from the wildcard path segment and, optionally, the
    /// inbound query string.
    pub fn parse(raw: &str, query: Option<&str>) -> Result<Self, ForwardError> {
        let repaired = repair_scheme(raw);
        let mut url =
            Url::parse(&repaired).map_err(|e| ForwardError::invalid_target(&repaired, e))?;

        if !SCHEMES.contains(&url.scheme()) {
            return Err(ForwardError::invalid_target(
                repaired,
                format!("unsupported scheme `{}`", url.scheme()),
            ));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ForwardError::invalid_target(repaired, "missing host"));
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let merged = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{existing}&{query}"),
                _ => query.to_string(),
            };
            url.set_query(Some(&merged));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Download name for this target: the percent-decoded last path
    /// segment, ignoring trailing slashes. `fallback` is used when that
    /// segment is empty or `.`.
    pub fn file_name(&self, fallback: &str) -> String {
        let segment = self
            .0
            .path()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        if decoded.is_empty() || decoded == "." || decoded == ".." {
            return fallback.to_string();
        }

        // A decoded %2F must not turn the name into a path.
        decoded
            .chars()
            .map(|c| match c {
                '/' | '\\' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
