//! Action parameters and their validation.
//!
//! # Design
//! Validation is a plain function returning every violation at once, run
//! before any request is built. Nothing here touches the network, so the
//! checks can be exercised without a server.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

use crate::client::PageQuery;
use crate::error::{ApiError, Violation};
use crate::types::UploadFields;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 200;
pub const DEFAULT_LANGUAGE: &str = "en_devel";
pub const DEFAULT_METHOD: &str = "translate";
pub const DEFAULT_CONFLICTS: &str = "ignore";

/// Parameter checks shared by every action.
pub trait Validate {
    /// Every failed check, in field order. Empty means valid.
    fn violations(&self) -> Vec<Violation>;

    fn validate(&self) -> Result<(), ApiError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ApiError::InvalidParameter(violations))
        }
    }
}

/// Server address and credentials.
#[derive(Debug)]
pub struct Connection {
    pub host: String,
    pub api_token: SecretString,
}

impl Connection {
    pub fn new(host: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_token: SecretString::new(api_token.into()),
        }
    }
}

impl Validate for Connection {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if self.host.is_empty() {
            out.push(Violation::new("host", "Host cannot be empty"));
        } else if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            out.push(Violation::new("host", "Host must start with http:// or https://"));
        }
        if self.api_token.expose_secret().is_empty() {
            out.push(Violation::new("api_token", "API token cannot be empty"));
        }
        out
    }
}

/// `list_projects` parameters.
#[derive(Debug)]
pub struct ProjectsParams {
    pub connection: Connection,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub show_details: bool,
}

impl ProjectsParams {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            page: Some(DEFAULT_PAGE),
            page_size: Some(DEFAULT_PAGE_SIZE),
            show_details: false,
        }
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

impl Validate for ProjectsParams {
    fn violations(&self) -> Vec<Violation> {
        let mut out = self.connection.violations();
        if self.page == Some(0) {
            out.push(Violation::new("page", "page must be greater than 0"));
        }
        match self.page_size {
            Some(0) => out.push(Violation::new("page_size", "page_size must be greater than 0")),
            Some(size) if size > MAX_PAGE_SIZE => out.push(Violation::new(
                "page_size",
                format!("page_size cannot be greater than {MAX_PAGE_SIZE}"),
            )),
            _ => {}
        }
        out
    }
}

/// `list_project_languages` parameters.
#[derive(Debug)]
pub struct LanguagesParams {
    pub connection: Connection,
    pub project_slug: String,
    pub show_details: bool,
}

impl Validate for LanguagesParams {
    fn violations(&self) -> Vec<Violation> {
        let mut out = self.connection.violations();
        require(&mut out, "project_slug", "Project slug", &self.project_slug);
        out
    }
}

/// `upload_translation_file` parameters.
#[derive(Debug)]
pub struct TranslationUploadParams {
    pub connection: Connection,
    pub project_slug: String,
    pub component_slug: String,
    pub language: String,
    pub src_file_path: PathBuf,
    pub fields: UploadFields,
}

impl TranslationUploadParams {
    /// Parameters with the default language, method, and conflict policy.
    pub fn new(
        connection: Connection,
        project_slug: impl Into<String>,
        component_slug: impl Into<String>,
        src_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            connection,
            project_slug: project_slug.into(),
            component_slug: component_slug.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            src_file_path: src_file_path.into(),
            fields: UploadFields {
                method: Some(DEFAULT_METHOD.to_string()),
                conflicts: Some(DEFAULT_CONFLICTS.to_string()),
                ..Default::default()
            },
        }
    }
}

impl Validate for TranslationUploadParams {
    fn violations(&self) -> Vec<Violation> {
        let mut out = self.connection.violations();
        require(&mut out, "project_slug", "Project slug", &self.project_slug);
        require(&mut out, "component_slug", "Component slug", &self.component_slug);
        require(&mut out, "language", "Language", &self.language);
        check_source_file(&mut out, &self.src_file_path);
        out
    }
}

/// `add_translations` parameters: an upload with every option defaulted.
#[derive(Debug)]
pub struct AddTranslationsParams {
    pub connection: Connection,
    pub project_slug: String,
    pub component_slug: String,
    pub src_file_path: PathBuf,
}

impl From<AddTranslationsParams> for TranslationUploadParams {
    fn from(params: AddTranslationsParams) -> Self {
        TranslationUploadParams::new(
            params.connection,
            params.project_slug,
            params.component_slug,
            params.src_file_path,
        )
    }
}

/// `upload_component_file` (base file) parameters.
#[derive(Debug)]
pub struct ComponentUploadParams {
    pub connection: Connection,
    pub project_slug: String,
    pub component_slug: String,
    pub src_file_path: PathBuf,
    pub fields: UploadFields,
}

impl Validate for ComponentUploadParams {
    fn violations(&self) -> Vec<Violation> {
        let mut out = self.connection.violations();
        require(&mut out, "project_slug", "Project slug", &self.project_slug);
        require(&mut out, "component_slug", "Component slug", &self.component_slug);
        check_source_file(&mut out, &self.src_file_path);
        out
    }
}

/// `download_component_file` parameters.
#[derive(Debug)]
pub struct DownloadParams {
    pub connection: Connection,
    pub project_slug: String,
    pub component_slug: String,
    pub format: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl Validate for DownloadParams {
    fn violations(&self) -> Vec<Violation> {
        let mut out = self.connection.violations();
        require(&mut out, "project_slug", "Project slug", &self.project_slug);
        require(&mut out, "component_slug", "Component slug", &self.component_slug);
        if self.format.as_deref() == Some("") {
            out.push(Violation::new("format", "Format cannot be empty"));
        }
        if self.output_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            out.push(Violation::new("output_path", "Output path cannot be empty"));
        }
        out
    }
}

fn require(out: &mut Vec<Violation>, field: &'static str, label: &str, value: &str) {
    if value.is_empty() {
        out.push(Violation::new(field, format!("{label} cannot be empty")));
    }
}

fn check_source_file(out: &mut Vec<Violation>, path: &std::path::Path) {
    if path.as_os_str().is_empty() {
        out.push(Violation::new("src_file_path", "Source file path cannot be empty"));
    } else if !path.exists() {
        out.push(Violation::new(
            "src_file_path",
            format!("Source file does not exist: {}", path.display()),
        ));
    }
}
