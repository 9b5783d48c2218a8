//! Error types for the Weblate client.
//!
//! # Design
//! One variant per outcome a caller may want to branch on. Status codes the
//! server documents (400, 401, 403, 404, 429) get dedicated variants; every
//! other non-success status lands in `UnexpectedStatus` with the raw body.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for gateway operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// A single failed parameter check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors returned by the request gateway and the actions built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The host is not an absolute `http`/`https` URL.
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    /// One or more parameters failed validation; no request was sent.
    #[error("invalid parameters: {}", join_violations(.0))]
    InvalidParameter(Vec<Violation>),

    /// 400: the server rejected the request payload.
    #[error("bad request (400): {body}")]
    BadRequest { body: serde_json::Value },

    /// 401: the API token is missing or invalid.
    #[error("authentication failed (401): invalid API token")]
    Authentication,

    /// 403: the token lacks permission on the project or component.
    #[error("access forbidden (403): check project/component permissions")]
    Forbidden,

    /// 404: unknown project, component, or language.
    #[error("not found (404): project, component, or language not found")]
    NotFound,

    /// 429: the server is throttling this token.
    #[error("rate limited (429): too many requests")]
    RateLimited,

    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Network-level failure before a status code was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// A structured endpoint returned a body that is not JSON.
    #[error("failed to parse JSON response: {0}")]
    JsonParse(String),

    /// Reading the source file or writing the output file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Status code carried by HTTP-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } => Some(400),
            ApiError::Authentication => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
