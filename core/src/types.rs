//! Flattened views over Weblate JSON records.
//!
//! # Design
//! The server payloads are wide and change between Weblate releases, so the
//! client keeps only the fields callers use and defaults the identifying
//! ones (`name`, `slug`, `code`) instead of failing when they are missing.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A JSON object as returned by the server.
pub type JsonObject = Map<String, Value>;

/// Normalized list response: bare arrays and paginated envelopes both end up
/// here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordList {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<JsonObject>,
}

/// One project from `GET /api/projects/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub slug: String,
    pub web_url: Option<String>,
    pub url: Option<String>,
    pub source_language: Option<String>,
    pub languages_count: Option<u64>,
    pub components_count: Option<u64>,
}

impl ProjectSummary {
    pub fn from_record(record: &JsonObject) -> Self {
        Self {
            name: str_field(record, "name").unwrap_or_else(|| "Unknown".to_string()),
            slug: str_field(record, "slug").unwrap_or_else(|| "unknown".to_string()),
            web_url: str_field(record, "web_url"),
            url: str_field(record, "url"),
            source_language: source_language(record),
            languages_count: u64_field(record, "languages_count"),
            components_count: u64_field(record, "components_count"),
        }
    }
}

/// A page of projects with the server's pagination links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ProjectSummary>,
}

impl From<RecordList> for ProjectPage {
    fn from(list: RecordList) -> Self {
        Self {
            count: list.count,
            next: list.next,
            previous: list.previous,
            results: list.results.iter().map(ProjectSummary::from_record).collect(),
        }
    }
}

/// One language from `GET /api/projects/{slug}/languages/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSummary {
    pub name: String,
    pub code: String,
    pub direction: Option<String>,
    pub plural: Option<Value>,
    pub web_url: Option<String>,
    pub url: Option<String>,
}

impl LanguageSummary {
    pub fn from_record(record: &JsonObject) -> Self {
        Self {
            name: str_field(record, "name")
                .or_else(|| str_field(record, "english_name"))
                .unwrap_or_else(|| "Unknown".to_string()),
            code: str_field(record, "code").unwrap_or_else(|| "Unknown".to_string()),
            direction: str_field(record, "direction"),
            plural: record.get("plural").filter(|v| !v.is_null()).cloned(),
            web_url: str_field(record, "web_url"),
            url: str_field(record, "url"),
        }
    }
}

/// Result of a file upload, read leniently from the server's JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// The server's `result` flag; `true` when the server omits it.
    pub success: bool,
    pub accepted: Option<u64>,
    pub skipped: Option<u64>,
    pub not_found: Option<u64>,
    pub total: Option<u64>,
    pub count: Option<u64>,
    pub raw: JsonObject,
}

impl UploadOutcome {
    pub fn from_object(raw: JsonObject) -> Self {
        Self {
            success: raw.get("result").and_then(Value::as_bool).unwrap_or(true),
            accepted: u64_field(&raw, "accepted"),
            skipped: u64_field(&raw, "skipped"),
            not_found: u64_field(&raw, "not_found"),
            total: u64_field(&raw, "total"),
            count: u64_field(&raw, "count"),
            raw,
        }
    }
}

/// Result of the `add_translations` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddTranslationsResult {
    pub success: bool,
    pub message: String,
}

impl AddTranslationsResult {
    pub fn from_success(success: bool) -> Self {
        let message = if success {
            "Translations added successfully"
        } else {
            "Failed to add translations"
        };
        Self {
            success,
            message: message.to_string(),
        }
    }
}

/// Optional form fields sent alongside an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFields {
    pub method: Option<String>,
    pub conflicts: Option<String>,
    pub email: Option<String>,
    pub author: Option<String>,
    pub fuzzy: Option<String>,
}

impl UploadFields {
    /// Values in wire order, paired with their form names.
    pub fn ordered(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("method", self.method.as_deref()),
            ("conflicts", self.conflicts.as_deref()),
            ("email", self.email.as_deref()),
            ("author", self.author.as_deref()),
            ("fuzzy", self.fuzzy.as_deref()),
        ]
    }
}

/// A file read from disk, ready to be framed as a multipart body.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_path: PathBuf,
    pub file_bytes: Vec<u8>,
    pub fields: UploadFields,
}

impl UploadRequest {
    pub fn read(file_path: impl AsRef<Path>, fields: UploadFields) -> Result<Self, ApiError> {
        let file_path = file_path.as_ref().to_path_buf();
        let file_bytes = std::fs::read(&file_path).map_err(|e| ApiError::io(&file_path, e))?;
        Ok(Self {
            file_path,
            file_bytes,
            fields,
        })
    }

    /// Name sent in the `filename` attribute of the file part.
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string())
    }
}

fn str_field(record: &JsonObject, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u64_field(record: &JsonObject, key: &str) -> Option<u64> {
    record.get(key).and_then(Value::as_u64)
}

// Older servers send the source language as a code, newer ones as an object.
fn source_language(record: &JsonObject) -> Option<String> {
    match record.get("source_language")? {
        Value::String(code) => Some(code.clone()),
        Value::Object(lang) => str_field(lang, "code"),
        _ => None,
    }
}
