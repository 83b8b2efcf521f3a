//! Lookup of the Git pre-commit hook file.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use log::debug;

use crate::error::{Error, Result};

const HOOKS_PATH_KEY: &str = "core.hooksPath";

/// Determines the absolute path of the repository's pre-commit hook file.
///
/// Mirrors `git rev-parse --git-path hooks/pre-commit`: the repository is
/// opened from `git_dir` (the value of `$GIT_DIR`, if any) or discovered
/// upwards from `working_dir`, `core.hooksPath` is honored, and linked
/// worktrees share the hooks of their main repository.
///
/// # Arguments
/// * `working_dir` - Absolute directory the lookup starts from
/// * `git_dir` - Explicit Git directory; relative values are taken relative to `working_dir`
///
/// # Errors
/// * `Error::GitError` if no repository can be found or its config cannot be read
pub fn pre_commit_hook_path(working_dir: &Path, git_dir: Option<&Path>) -> Result<PathBuf> {
    let repo = match git_dir {
        Some(git_dir) => Repository::open(working_dir.join(git_dir))?,
        None => Repository::discover(working_dir)?,
    };
    debug!("Using Git repository at {}", repo.path().display());

    let hooks_dir = match repo.config()?.get_path(HOOKS_PATH_KEY) {
        Ok(hooks_path) if hooks_path.is_absolute() => hooks_path,
        Ok(hooks_path) => repo.workdir().unwrap_or_else(|| repo.path()).join(hooks_path),
        Err(e) if e.code() == ErrorCode::NotFound => repo.commondir().join("hooks"),
        Err(e) => return Err(e.into()),
    };

    let hook_path = working_dir.join(hooks_dir).join("pre-commit");

    if !hook_path.is_absolute() {
        return Err(Error::Internal(format!(
            "Git pre-commit hook path {} is not absolute",
            hook_path.display()
        )));
    }

    debug!("Git pre-commit hook path is {}", hook_path.display());
    Ok(hook_path)
}
