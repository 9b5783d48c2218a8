//! The action set: one validated request per call, with progress logging.
//!
//! # Design
//! Each action validates its parameters, builds a `WeblateClient`, runs
//! exactly one request through the supplied `Transport`, and logs a
//! human-readable line for every step. Failures are logged and returned;
//! nothing is retried.

use std::fs;

use secrecy::{ExposeSecret, SecretString};

use crate::client::WeblateClient;
use crate::error::{ApiError, ApiResult};
use crate::params::{
    AddTranslationsParams, ComponentUploadParams, Connection, DownloadParams, LanguagesParams,
    ProjectsParams, TranslationUploadParams, Validate,
};
use crate::transport::Transport;
use crate::types::{
    AddTranslationsResult, LanguageSummary, ProjectPage, ProjectSummary, UploadOutcome,
    UploadRequest,
};

/// Fetch one page of projects.
pub fn list_projects<T: Transport>(
    transport: T,
    params: &ProjectsParams,
) -> ApiResult<ProjectPage> {
    params
        .validate()
        .inspect_err(|e| tracing::error!("{e}"))?;
    let client = connect(&params.connection)?;
    tracing::info!("Fetching projects list...");

    let request = client.build_list_projects(params.page_query());
    tracing::info!("API URL: {}", request.url);
    let page = transport
        .execute(&request)
        .and_then(|response| client.parse_list_projects(response))
        .inspect_err(|e| tracing::error!("Failed to fetch projects: {e}"))?;

    tracing::info!("Successfully fetched projects list");
    tracing::info!("Found projects: {}", page.results.len());
    if params.show_details {
        log_projects(&page.results);
    }
    Ok(page)
}

/// Fetch the languages a project is translated into.
pub fn list_project_languages<T: Transport>(
    transport: T,
    params: &LanguagesParams,
) -> ApiResult<Vec<LanguageSummary>> {
    params
        .validate()
        .inspect_err(|e| tracing::error!("{e}"))?;
    let client = connect(&params.connection)?;
    tracing::info!("Fetching languages for project: {}", params.project_slug);

    let request = client.build_project_languages(&params.project_slug);
    tracing::info!("API URL: {}", request.url);
    let languages = transport
        .execute(&request)
        .and_then(|response| client.parse_project_languages(response))
        .inspect_err(|e| tracing::error!("Failed to fetch project languages: {e}"))?;

    tracing::info!("Successfully fetched project languages");
    tracing::info!("Found languages: {}", languages.len());
    if params.show_details {
        log_languages(&languages);
    }
    Ok(languages)
}

/// Upload a translation file for one language of a component.
///
/// Returns the server's `result` flag.
pub fn upload_translation_file<T: Transport>(
    transport: T,
    params: &TranslationUploadParams,
) -> ApiResult<bool> {
    params
        .validate()
        .inspect_err(|e| tracing::error!("{e}"))?;
    let client = connect(&params.connection)?;
    tracing::info!(
        "Uploading file for project: {}, component: {}, language: {}",
        params.project_slug,
        params.component_slug,
        params.language
    );
    tracing::info!("Source file: {}", params.src_file_path.display());

    let upload = UploadRequest::read(&params.src_file_path, params.fields.clone())
        .inspect_err(|e| tracing::error!("Failed to read source file: {e}"))?;
    log_author(&upload);

    let request = client.build_upload_translation(
        &params.project_slug,
        &params.component_slug,
        &params.language,
        &upload,
    );
    tracing::info!("API URL: {}", request.url);
    let outcome = transport
        .execute(&request)
        .and_then(|response| client.parse_upload(response))
        .inspect_err(|e| tracing::error!("Failed to upload file: {e}"))?;

    log_upload_outcome(&outcome);
    Ok(outcome.success)
}

/// Upload translations with the default language, method, and conflict
/// policy.
pub fn add_translations<T: Transport>(
    transport: T,
    params: AddTranslationsParams,
) -> ApiResult<AddTranslationsResult> {
    tracing::info!("Adding translations for project: {}", params.project_slug);
    let upload = TranslationUploadParams::from(params);
    let success = upload_translation_file(transport, &upload)?;
    Ok(AddTranslationsResult::from_success(success))
}

/// Upload a new base (source) file for a component.
pub fn upload_component_file<T: Transport>(
    transport: T,
    params: &ComponentUploadParams,
) -> ApiResult<bool> {
    params
        .validate()
        .inspect_err(|e| tracing::error!("{e}"))?;
    let client = connect(&params.connection)?;
    tracing::info!(
        "Uploading base file for project: {}, component: {}",
        params.project_slug,
        params.component_slug
    );
    tracing::info!("Source file: {}", params.src_file_path.display());

    let upload = UploadRequest::read(&params.src_file_path, params.fields.clone())
        .inspect_err(|e| tracing::error!("Failed to read source file: {e}"))?;
    log_author(&upload);

    let request =
        client.build_upload_component_file(&params.project_slug, &params.component_slug, &upload);
    tracing::info!("API URL: {}", request.url);
    let outcome = transport
        .execute(&request)
        .and_then(|response| client.parse_upload(response))
        .inspect_err(|e| tracing::error!("Failed to upload base file: {e}"))?;

    log_upload_outcome(&outcome);
    Ok(outcome.success)
}

/// Download a component's files, optionally writing them to `output_path`.
pub fn download_component_file<T: Transport>(
    transport: T,
    params: &DownloadParams,
) -> ApiResult<Vec<u8>> {
    params
        .validate()
        .inspect_err(|e| tracing::error!("{e}"))?;
    let client = connect(&params.connection)?;
    tracing::info!(
        "Downloading file for project: {}, component: {}",
        params.project_slug,
        params.component_slug
    );

    let request = client.build_download_component_file(
        &params.project_slug,
        &params.component_slug,
        params.format.as_deref(),
    );
    tracing::info!("API URL: {}", request.url);
    let content = transport
        .execute(&request)
        .and_then(|response| client.parse_download(response))
        .inspect_err(|e| tracing::error!("Failed to download file: {e}"))?;

    match &params.output_path {
        Some(path) => {
            fs::write(path, &content)
                .map_err(|e| ApiError::io(path, e))
                .inspect_err(|e| tracing::error!("Failed to save file: {e}"))?;
            tracing::info!("File successfully downloaded to: {}", path.display());
            tracing::info!("File size: {} bytes", content.len());
        }
        None => {
            tracing::info!("File content retrieved successfully");
            tracing::info!("Content length: {} bytes", content.len());
        }
    }
    Ok(content)
}

fn connect(connection: &Connection) -> ApiResult<WeblateClient> {
    tracing::info!("Connecting to Weblate: {}", connection.host);
    let token = SecretString::new(connection.api_token.expose_secret().clone());
    let client =
        WeblateClient::new(&connection.host, token).inspect_err(|e| tracing::error!("{e}"))?;
    tracing::debug!("API base: {}", client.api_base());
    Ok(client)
}

fn log_author(upload: &UploadRequest) {
    if let Some(email) = upload.fields.email.as_deref().filter(|e| !e.is_empty()) {
        tracing::info!("Author email: {email}");
    }
    if let Some(author) = upload.fields.author.as_deref().filter(|a| !a.is_empty()) {
        tracing::info!("Author name: {author}");
    }
}

fn log_upload_outcome(outcome: &UploadOutcome) {
    if outcome.success {
        tracing::info!("File uploaded successfully");
    } else {
        tracing::warn!("Server reported the upload as unsuccessful");
    }
    tracing::info!(
        accepted = ?outcome.accepted,
        skipped = ?outcome.skipped,
        not_found = ?outcome.not_found,
        total = ?outcome.total,
        "Upload result: {}",
        serde_json::Value::Object(outcome.raw.clone())
    );
}

fn log_projects(projects: &[ProjectSummary]) {
    if projects.is_empty() {
        tracing::info!("No projects found");
        return;
    }
    tracing::info!("Project details:");
    for (index, project) in projects.iter().enumerate() {
        tracing::info!("{}. {} ({})", index + 1, project.name, project.slug);
        if let Some(url) = &project.web_url {
            tracing::info!("   URL: {url}");
        }
        if let Some(count) = project.languages_count {
            tracing::info!("   Languages: {count}");
        }
        if let Some(count) = project.components_count {
            tracing::info!("   Components: {count}");
        }
    }
}

fn log_languages(languages: &[LanguageSummary]) {
    if languages.is_empty() {
        tracing::info!("No languages found for this project");
        return;
    }
    tracing::info!("Language details:");
    for (index, language) in languages.iter().enumerate() {
        tracing::info!("{}. {} ({})", index + 1, language.name, language.code);
        if let Some(direction) = &language.direction {
            tracing::info!("   Direction: {direction}");
        }
        if let Some(plural) = &language.plural {
            tracing::info!("   Plural: {plural}");
        }
    }
}
