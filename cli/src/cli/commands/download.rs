//! `weblate download` – fetch component files to a path or stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use weblate_core::actions;
use weblate_core::params::DownloadParams;

use crate::cli::settings::Settings;

pub fn run_download(
    settings: &Settings,
    project: String,
    component: String,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let params = DownloadParams {
        connection: settings.connection(),
        project_slug: project,
        component_slug: component,
        format,
        output_path: output,
    };
    let content = actions::download_component_file(settings.transport(), &params)
        .with_context(|| format!("downloading {}/{}", params.project_slug, params.component_slug))?;

    // With --output the action has already written the file.
    if params.output_path.is_none() {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&content).context("writing to stdout")?;
        stdout.flush()?;
    }
    Ok(())
}
