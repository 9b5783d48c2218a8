//! CLI for the Weblate request gateway.

mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use weblate_core::params::{DEFAULT_CONFLICTS, DEFAULT_LANGUAGE, DEFAULT_METHOD};

use commands::{
    run_add_translations, run_base_upload, run_download, run_languages, run_projects, run_upload,
};
use settings::Settings;

/// Top-level CLI. Connection flags apply to every subcommand.
#[derive(Parser)]
#[command(name = "weblate")]
#[command(about = "Talk to a Weblate server: list, upload, and download translations", long_about = None)]
pub struct Cli {
    /// Server URL, e.g. https://hosted.weblate.org.
    #[arg(long, env = "WEBLATE_HOST", global = true)]
    pub host: Option<String>,

    /// API token (see your Weblate profile).
    #[arg(long, env = "WEBLATE_API_TOKEN", global = true, hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Config file (default: $XDG_CONFIG_HOME/weblate/config.toml).
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level progress output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List projects, one page at a time.
    Projects {
        #[arg(long, env = "WEBLATE_PAGE")]
        page: Option<u32>,
        /// Entries per page (at most 200).
        #[arg(long, env = "WEBLATE_PAGE_SIZE")]
        page_size: Option<u32>,
        /// Log a line per project.
        #[arg(long, env = "WEBLATE_SHOW_DETAILS")]
        show_details: bool,
    },

    /// List the languages of a project.
    Languages {
        #[arg(long, env = "WEBLATE_PROJECT_SLUG")]
        project: String,
        /// Log a line per language.
        #[arg(long, env = "WEBLATE_SHOW_DETAILS")]
        show_details: bool,
    },

    /// Upload a translation file for one language.
    Upload(UploadArgs),

    /// Upload translations with default language, method, and conflicts.
    AddTranslations {
        #[command(flatten)]
        target: Target,
    },

    /// Replace a component's base (source) file.
    BaseUpload(BaseUploadArgs),

    /// Download a component's files.
    Download {
        #[arg(long, env = "WEBLATE_PROJECT_SLUG")]
        project: String,
        /// Categorized slugs use `/`, e.g. `ios/localizable-strings`.
        #[arg(long, env = "WEBLATE_COMPONENT_SLUG")]
        component: String,
        /// Server-side conversion, e.g. `zip` or `zip:po`.
        #[arg(long, env = "WEBLATE_FILE_FORMAT")]
        format: Option<String>,
        /// Write here instead of stdout.
        #[arg(short, long, env = "WEBLATE_OUTPUT_PATH")]
        output: Option<PathBuf>,
    },
}

/// Project, component, and the local file to send.
#[derive(Debug, Args)]
pub struct Target {
    #[arg(long, env = "WEBLATE_PROJECT_SLUG")]
    pub project: String,
    #[arg(long, env = "WEBLATE_COMPONENT_SLUG")]
    pub component: String,
    #[arg(long, env = "WEBLATE_SRC_FILE_PATH")]
    pub src_file: PathBuf,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[command(flatten)]
    pub target: Target,
    #[arg(long, env = "WEBLATE_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,
    #[arg(long, env = "WEBLATE_UPLOAD_METHOD", default_value = DEFAULT_METHOD)]
    pub method: String,
    #[arg(long, env = "WEBLATE_CONFLICTS", default_value = DEFAULT_CONFLICTS)]
    pub conflicts: String,
    #[command(flatten)]
    pub authorship: Authorship,
}

/// Base file upload; every form field is optional.
#[derive(Debug, Args)]
pub struct BaseUploadArgs {
    #[command(flatten)]
    pub target: Target,
    #[arg(long, env = "WEBLATE_UPLOAD_METHOD")]
    pub method: Option<String>,
    #[arg(long, env = "WEBLATE_CONFLICTS")]
    pub conflicts: Option<String>,
    #[command(flatten)]
    pub authorship: Authorship,
}

/// Author and fuzzy-handling fields shared by both upload commands.
#[derive(Debug, Args)]
pub struct Authorship {
    /// Defaults to `git config user.email`.
    #[arg(long, env = "WEBLATE_AUTHOR_EMAIL")]
    pub email: Option<String>,
    /// Defaults to `git config user.name`.
    #[arg(long, env = "WEBLATE_AUTHOR_NAME")]
    pub author: Option<String>,
    /// Fuzzy string handling, e.g. `process` or `approve`.
    #[arg(long, env = "WEBLATE_FUZZY")]
    pub fuzzy: Option<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let settings = Settings::resolve(
            self.host,
            self.api_token,
            self.timeout,
            self.config.as_deref(),
        )?;
        tracing::debug!("request timeout: {:?}", settings.timeout);

        match self.command {
            CliCommand::Projects {
                page,
                page_size,
                show_details,
            } => run_projects(&settings, page, page_size, show_details)?,
            CliCommand::Languages {
                project,
                show_details,
            } => run_languages(&settings, project, show_details)?,
            CliCommand::Upload(args) => run_upload(&settings, args)?,
            CliCommand::AddTranslations { target } => run_add_translations(&settings, target)?,
            CliCommand::BaseUpload(args) => run_base_upload(&settings, args)?,
            CliCommand::Download {
                project,
                component,
                format,
                output,
            } => run_download(&settings, project, component, format, output)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
