//! `weblate upload`, `weblate add-translations`, and `weblate base-upload`.

use anyhow::{bail, Context, Result};
use serde_json::json;
use weblate_core::actions;
use weblate_core::identity::apply_git_identity;
use weblate_core::params::{AddTranslationsParams, ComponentUploadParams, TranslationUploadParams};
use weblate_core::UploadFields;

use super::print_json;
use crate::cli::settings::Settings;
use crate::cli::{Authorship, BaseUploadArgs, Target, UploadArgs};

/// Form fields for an upload, with author details filled from git when unset.
fn upload_fields(
    method: Option<String>,
    conflicts: Option<String>,
    authorship: Authorship,
) -> UploadFields {
    let mut fields = UploadFields {
        method,
        conflicts,
        email: authorship.email,
        author: authorship.author,
        fuzzy: authorship.fuzzy,
    };
    apply_git_identity(&mut fields);
    fields
}

pub fn run_upload(settings: &Settings, args: UploadArgs) -> Result<()> {
    let fields = upload_fields(Some(args.method), Some(args.conflicts), args.authorship);

    let params = TranslationUploadParams {
        connection: settings.connection(),
        project_slug: args.target.project,
        component_slug: args.target.component,
        language: args.language,
        src_file_path: args.target.src_file,
        fields,
    };
    let success = actions::upload_translation_file(settings.transport(), &params)
        .with_context(|| format!("uploading {}", params.src_file_path.display()))?;
    print_json(&json!({ "success": success }))?;
    ensure_accepted(success)
}

pub fn run_add_translations(settings: &Settings, target: Target) -> Result<()> {
    let params = AddTranslationsParams {
        connection: settings.connection(),
        project_slug: target.project,
        component_slug: target.component,
        src_file_path: target.src_file,
    };
    let result =
        actions::add_translations(settings.transport(), params).context("adding translations")?;
    print_json(&result)?;
    ensure_accepted(result.success)
}

pub fn run_base_upload(settings: &Settings, args: BaseUploadArgs) -> Result<()> {
    let params = ComponentUploadParams {
        connection: settings.connection(),
        project_slug: args.target.project,
        component_slug: args.target.component,
        src_file_path: args.target.src_file,
        fields: upload_fields(args.method, args.conflicts, args.authorship),
    };
    let success = actions::upload_component_file(settings.transport(), &params)
        .with_context(|| format!("uploading base file {}", params.src_file_path.display()))?;
    print_json(&json!({ "success": success }))?;
    ensure_accepted(success)
}

fn ensure_accepted(success: bool) -> Result<()> {
    if !success {
        bail!("server reported the upload as unsuccessful");
    }
    Ok(())
}
