//! CLI command handlers, one file per command family.

mod download;
mod list;
mod upload;

pub use download::run_download;
pub use list::{run_languages, run_projects};
pub use upload::{run_add_translations, run_base_upload, run_upload};

use anyhow::Result;
use serde::Serialize;

/// Print a result to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
