//! Synchronous client core for the Weblate REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A [`Transport`] executes the
//! round-trip; [`actions`] glue validation, one request, and progress
//! logging together for each supported operation.
//!
//! # Design
//! - `WeblateClient` is stateless: it holds the derived API base and token.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and every mapping is testable without a server.
//! - Component slugs containing `/` are double-encoded (`%252F`).
//! - Response mapping is shared: status codes become typed `ApiError`s, list
//!   payloads are normalized, and missing record fields fall back to
//!   defaults instead of failing.

pub mod actions;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod identity;
pub mod logging;
pub mod multipart;
pub mod params;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{PageQuery, WeblateClient};
pub use error::{ApiError, ApiResult, Violation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::Validate;
pub use transport::{Transport, UreqTransport};
pub use types::{
    AddTranslationsResult, LanguageSummary, ProjectPage, ProjectSummary, UploadFields,
    UploadOutcome, UploadRequest,
};
