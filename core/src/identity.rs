//! Upload author defaults read from the local git configuration.

use std::process::Command;

use crate::types::UploadFields;

/// Fill unset `email` and `author` from `git config user.email` / `user.name`.
pub fn apply_git_identity(fields: &mut UploadFields) {
    fill_identity(fields, |key| git_config(Command::new("git"), key));
}

fn fill_identity(fields: &mut UploadFields, lookup: impl Fn(&str) -> Option<String>) {
    if fields.email.is_none() {
        fields.email = lookup("user.email");
    }
    if fields.author.is_none() {
        fields.author = lookup("user.name");
    }
}

fn git_config(mut git: Command, key: &str) -> Option<String> {
    let output = match git.args(["config", key]).output() {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!("git unavailable for {key}: {e}");
            return None;
        }
    };
    if !output.status.success() {
        return None;
    }
    non_empty(&String::from_utf8_lossy(&output.stdout))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_trimmed_and_blank_is_none() {
        assert_eq!(non_empty("jane@example.com\n"), Some("jane@example.com".to_string()));
        assert_eq!(non_empty("  \n"), None);
        assert_eq!(non_empty(""), None);
    }

    #[test]
    fn explicit_values_win_over_git() {
        let mut fields = UploadFields {
            email: Some("set@example.com".into()),
            author: Some("Set Author".into()),
            ..Default::default()
        };
        fill_identity(&mut fields, |key| Some(format!("git {key}")));
        assert_eq!(fields.email.as_deref(), Some("set@example.com"));
        assert_eq!(fields.author.as_deref(), Some("Set Author"));
    }

    #[test]
    fn unset_values_come_from_lookup() {
        let mut fields = UploadFields {
            author: Some("Set Author".into()),
            ..Default::default()
        };
        fill_identity(&mut fields, |key| match key {
            "user.email" => Some("git@example.com".into()),
            _ => Some("Git Author".into()),
        });
        assert_eq!(fields.email.as_deref(), Some("git@example.com"));
        assert_eq!(fields.author.as_deref(), Some("Set Author"));

        let mut fields = UploadFields::default();
        fill_identity(&mut fields, |_| None);
        assert!(fields.email.is_none());
        assert!(fields.author.is_none());
    }

    /// `git` confined to a throwaway global config outside any repository.
    fn isolated_git(dir: &std::path::Path, global: &std::path::Path) -> Command {
        let mut git = Command::new("git");
        git.current_dir(dir)
            .env("GIT_CONFIG_GLOBAL", global)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_CEILING_DIRECTORIES", dir);
        git
    }

    #[test]
    fn reads_identity_from_git_config() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("gitconfig");
        std::fs::write(
            &global,
            "[user]\n\temail = jane@example.com\n\tname = Jane Doe\n",
        )
        .unwrap();

        let mut fields = UploadFields::default();
        fill_identity(&mut fields, |key| {
            git_config(isolated_git(dir.path(), &global), key)
        });
        assert_eq!(fields.email.as_deref(), Some("jane@example.com"));
        assert_eq!(fields.author.as_deref(), Some("Jane Doe"));

        let empty = dir.path().join("empty-gitconfig");
        std::fs::write(&empty, "").unwrap();
        assert_eq!(git_config(isolated_git(dir.path(), &empty), "user.email"), None);
    }
}
