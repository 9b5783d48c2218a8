//! `weblate projects` and `weblate languages`.

use anyhow::{Context, Result};
use weblate_core::actions;
use weblate_core::params::{LanguagesParams, ProjectsParams};

use super::print_json;
use crate::cli::settings::Settings;

pub fn run_projects(
    settings: &Settings,
    page: Option<u32>,
    page_size: Option<u32>,
    show_details: bool,
) -> Result<()> {
    let mut params = ProjectsParams::new(settings.connection());
    params.page = page.or(params.page);
    params.page_size = page_size.or(params.page_size);
    params.show_details = show_details;

    let projects =
        actions::list_projects(settings.transport(), &params).context("listing projects")?;
    print_json(&projects)
}

pub fn run_languages(settings: &Settings, project: String, show_details: bool) -> Result<()> {
    let params = LanguagesParams {
        connection: settings.connection(),
        project_slug: project,
        show_details,
    };
    let languages = actions::list_project_languages(settings.transport(), &params)
        .with_context(|| format!("listing languages of {}", params.project_slug))?;
    print_json(&languages)
}
