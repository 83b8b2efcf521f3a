//! Rendering and installation of the ktlint pre-commit hook.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use semver::Version;

use crate::classpath::{join_classpath, Platform};
use crate::constants::GENERATED_HOOK_MARKER;
use crate::error::{Error, Result};
use crate::ktlint::{self, CodeStyle, Coordinates, ErrorLimit, LintOptions, ProjectType};
use crate::prompt::Prompter;
use crate::template::TemplateEngine;

/// Everything the hook template needs to know.
#[derive(Debug, Clone)]
pub struct HookParameters<'a> {
    pub ktlint_version: &'a Version,
    pub options: &'a LintOptions,
    /// Resolved jar files; must not be empty
    pub classpath: &'a [PathBuf],
    pub main_class: &'a str,
    /// Command printed by the hook when it needs to be reinstalled
    pub installation_command: &'a str,
    pub platform: Platform,
}

/// State of the file at the hook path before installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingHook {
    Missing,
    /// A hook previously written by this tool
    Generated,
    /// A hook written by someone else
    Foreign,
}

/// Renders `template` into the hook script for `params`.
///
/// # Errors
/// * `Error::ConfigError` if the options are not valid for the ktlint version
/// * `Error::TemplateError` / `Error::BindingError` if the template is broken
/// * `Error::Internal` if the classpath is empty
pub fn render_hook_script(params: &HookParameters, template: &str) -> Result<String> {
    if params.classpath.is_empty() {
        return Err(Error::Internal("Resolved ktlint classpath is empty".to_string()));
    }

    let coordinates = Coordinates::for_version(params.ktlint_version);
    let args = ktlint::cli_args(params.ktlint_version, params.options)?;
    let jars: Vec<String> = params
        .classpath
        .iter()
        .map(|jar| jar.display().to_string())
        .collect();

    let engine = TemplateEngine::builder()
        .generated_date_time("GENERATED_DATETIME")?
        .comment_text("HOOK_SETTINGS", settings_summary(params, &coordinates))?
        .quoted_string("KTLINT_VERSION", params.ktlint_version.to_string())?
        .quoted_string("KTLINT_COORDINATES", coordinates.to_string())?
        .quoted_string("KTLINT_CLASSPATH", join_classpath(params.classpath, params.platform))?
        .args("KTLINT_CLASSPATH_JARS", jars)?
        .quoted_string("KTLINT_MAIN_CLASS_NAME", params.main_class)?
        .quoted_string("HOOK_INSTALLATION_COMMAND", params.installation_command)?
        .args("KTLINT_ARGS", args)?
        .build();

    engine.process_string(template)
}

fn settings_summary(params: &HookParameters, coordinates: &Coordinates) -> String {
    let code_style = match (&params.options.code_style, params.options.project_type) {
        (CodeStyle::Specific(name), _) => name.clone(),
        (CodeStyle::Default, ProjectType::Android) => "android (legacy project flag)".to_string(),
        (CodeStyle::Default, ProjectType::Other) => "default".to_string(),
    };
    let error_limit = match params.options.error_limit {
        ErrorLimit::None => "none".to_string(),
        ErrorLimit::Max(n) => n.to_string(),
    };
    let experimental = if params.options.experimental {
        "enabled"
    } else {
        "disabled"
    };

    format!(
        "ktlint: {coordinates}\n\
         Code style: {code_style}\n\
         Error limit: {error_limit}\n\
         Experimental rules: {experimental}"
    )
}

/// Returns true if `content` is a hook script generated by this tool.
pub fn is_generated_hook(content: &str) -> bool {
    content.lines().any(|line| line.trim() == GENERATED_HOOK_MARKER)
}

pub fn inspect_existing_hook(hook_path: &Path) -> Result<ExistingHook> {
    if !hook_path.exists() {
        return Ok(ExistingHook::Missing);
    }

    // hooks are usually shell scripts, but binaries are allowed too
    let content = fs::read(hook_path).map_err(Error::IoError)?;
    if is_generated_hook(&String::from_utf8_lossy(&content)) {
        Ok(ExistingHook::Generated)
    } else {
        Ok(ExistingHook::Foreign)
    }
}

/// Makes sure the hook at `hook_path` may be (over)written.
///
/// Missing and previously generated hooks are always replaced. A foreign hook
/// is only replaced with `force` or after the user confirmed it.
///
/// # Errors
/// * `Error::HookError` if the user declines or cannot be asked
pub fn ensure_overwritable(prompt: &dyn Prompter, hook_path: &Path, force: bool) -> Result<()> {
    match inspect_existing_hook(hook_path)? {
        ExistingHook::Missing | ExistingHook::Generated => Ok(()),
        ExistingHook::Foreign if force => {
            warn!("Overwriting existing pre-commit hook {}", hook_path.display());
            Ok(())
        }
        ExistingHook::Foreign => {
            let question = format!(
                "A pre-commit hook not generated by ktlint-hook exists at {}. Overwrite it?",
                hook_path.display()
            );
            if prompt.confirm(&question, false)? {
                Ok(())
            } else {
                Err(Error::HookError(format!(
                    "Refusing to overwrite existing pre-commit hook {}",
                    hook_path.display()
                )))
            }
        }
    }
}

/// Writes `script` to `hook_path` and marks it executable.
pub fn install_hook(hook_path: &Path, script: &str) -> Result<()> {
    if let Some(parent) = hook_path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }

    debug!("Writing {} bytes to {}", script.len(), hook_path.display());
    fs::write(hook_path, script).map_err(Error::IoError)?;
    set_executable(hook_path)?;

    info!("Installed ktlint pre-commit hook at {}", hook_path.display());
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path).map_err(Error::IoError)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).map_err(Error::IoError)
}

#[cfg(not(unix))]
fn set_executable(path: &Path) -> Result<()> {
    debug!("No executable bit to set for {} on this platform", path.display());
    Ok(())
}
