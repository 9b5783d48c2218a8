//! API base derivation and resource URL assembly.
//!
//! Weblate's router percent-decodes the request path once before matching,
//! so a `/` inside a categorized component slug has to travel as `%252F` to
//! arrive at the router as `%2F` rather than as a path separator.

use url::Url;

use crate::error::ApiError;

const DEFAULT_API_PATH: &str = "/api";

/// One path segment of a resource URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Fixed route text such as `projects` or `file`, inserted verbatim.
    Literal(&'a str),
    /// A server-assigned identifier; `/` inside it is double-encoded.
    Slug(&'a str),
}

/// Derive the canonical API base (`scheme://host[:port][/path]`) from a
/// user-supplied host URL.
///
/// The port is kept only when it differs from the scheme default. An empty
/// path (or a bare `/`) resolves to `/api`.
pub fn build_api_base(host_url: &str) -> Result<String, ApiError> {
    let invalid = |reason: &str| ApiError::InvalidHost {
        host: host_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(host_url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    let host = parsed.host_str().ok_or_else(|| invalid("missing host"))?;

    let mut base = format!("{}://{}", parsed.scheme(), host);
    // `Url::port` is `None` when the port equals the scheme default.
    if let Some(port) = parsed.port() {
        base.push_str(&format!(":{port}"));
    }

    let path = parsed.path().trim_end_matches('/');
    if path.is_empty() {
        base.push_str(DEFAULT_API_PATH);
    } else {
        base.push_str(path);
    }
    Ok(base)
}

/// Escape a slug for insertion into a path: `/` becomes `%2F`, then every
/// `%` is escaped again so the slash survives one round of server decoding.
pub fn encode_slug(slug: &str) -> String {
    slug.replace('/', "%2F").replace('%', "%25")
}

/// Join `segments` under `base` with a trailing `/`, as every Weblate
/// resource route expects.
pub fn build_resource_url(base: &str, segments: &[Segment<'_>]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        match segment {
            Segment::Literal(text) => url.push_str(text),
            Segment::Slug(slug) => url.push_str(&encode_slug(slug)),
        }
    }
    url.push('/');
    url
}

/// Append form-urlencoded query parameters, skipping absent values.
pub fn with_query(url: String, params: &[(&str, Option<String>)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if !any {
        return url;
    }
    format!("{url}?{}", serializer.finish())
}
