//! Configuration handling for ktlint-hook.
//! Settings come from an optional configuration file (JSON or YAML) and from
//! command line overrides; both are merged and validated into a [`Configuration`].

use std::path::{Path, PathBuf};

use log::debug;
use semver::Version;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ktlint::{CodeStyle, ErrorLimit, LintOptions, ProjectType, MIN_SUPPORTED_VERSION};

/// Unvalidated settings as written in a configuration file or given on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// ktlint version, e.g. `1.0.1`
    pub version: Option<String>,
    pub code_style: Option<String>,
    /// Deprecated since ktlint 0.49.0; prefer `code_style`
    pub android: Option<bool>,
    pub limit: Option<i64>,
    pub experimental: Option<bool>,
    /// Jar files making up the ktlint classpath
    pub classpath: Option<Vec<PathBuf>>,
    pub main_class: Option<String>,
}

impl RawConfig {
    /// Layers `overrides` on top of `self`; every value set in `overrides` wins.
    pub fn merge(self, overrides: RawConfig) -> RawConfig {
        RawConfig {
            version: overrides.version.or(self.version),
            code_style: overrides.code_style.or(self.code_style),
            android: overrides.android.or(self.android),
            limit: overrides.limit.or(self.limit),
            experimental: overrides.experimental.or(self.experimental),
            classpath: overrides.classpath.or(self.classpath),
            main_class: overrides.main_class.or(self.main_class),
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub ktlint_version: Version,
    pub options: LintOptions,
    pub classpath: Vec<PathBuf>,
    /// Explicit main class; read from the jar manifests when unset
    pub main_class: Option<String>,
}

impl TryFrom<RawConfig> for Configuration {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let version = raw
            .version
            .ok_or_else(|| Error::ConfigError("No ktlint version was configured".to_string()))?;
        let ktlint_version = parse_version(&version)?;
        if ktlint_version < MIN_SUPPORTED_VERSION {
            return Err(Error::ConfigError(format!(
                "Configured ktlint version ({ktlint_version}) is lower than \
                 the minimum supported ktlint version ({MIN_SUPPORTED_VERSION})"
            )));
        }

        let code_style = match raw.code_style {
            Some(name) => CodeStyle::Specific(name),
            None => CodeStyle::Default,
        };

        let error_limit = match raw.limit {
            None => ErrorLimit::None,
            Some(limit) if limit < 0 => {
                return Err(Error::ConfigError(format!(
                    "Error limit must be set to a non-negative integer (got {limit})"
                )))
            }
            Some(limit) => ErrorLimit::Max(u32::try_from(limit).map_err(|_| {
                Error::ConfigError(format!(
                    "Error limit {limit} is too large; the maximum is {}",
                    u32::MAX
                ))
            })?),
        };

        let project_type = if raw.android.unwrap_or(false) {
            ProjectType::Android
        } else {
            ProjectType::Other
        };

        Ok(Configuration {
            ktlint_version,
            options: LintOptions {
                code_style,
                error_limit,
                experimental: raw.experimental.unwrap_or(false),
                project_type,
            },
            classpath: raw.classpath.unwrap_or_default(),
            main_class: raw.main_class,
        })
    }
}

/// Parses a ktlint version string.
///
/// # Errors
/// * `Error::ConfigError` if the string is not a semantic version. A leading
///   `v` (as in release tags) gets a dedicated hint.
pub fn parse_version(version: &str) -> Result<Version> {
    if let Ok(parsed) = Version::parse(version) {
        return Ok(parsed);
    }

    if let Some(without_v) = version.strip_prefix('v') {
        if Version::parse(without_v).is_ok() {
            return Err(Error::ConfigError(format!(
                "String \"{version}\" is not a valid semantic version.\n\
                 Remove the leading 'v' character and use \"{without_v}\" instead"
            )));
        }
    }

    Err(Error::ConfigError(format!(
        "String \"{version}\" is not a valid semantic version.\n\
         Ensure that the version was correctly copied from https://github.com/pinterest/ktlint/releases"
    )))
}

/// Returns the first configuration file from `config_files` that exists in `dir`.
pub fn find_config_file<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files
        .iter()
        .map(|file| dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
///   for the expected schema
pub fn parse_config(content: &str) -> Result<RawConfig> {
    if content.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads a configuration file.
///
/// Relative classpath entries are resolved against the directory of the file.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<RawConfig> {
    let config_path = config_path.as_ref();
    debug!("Loading configuration from {}", config_path.display());

    let content = std::fs::read_to_string(config_path).map_err(Error::IoError)?;
    let mut config = parse_config(&content)?;

    if let (Some(base), Some(classpath)) = (config_path.parent(), config.classpath.as_mut()) {
        for entry in classpath.iter_mut() {
            if entry.is_relative() {
                *entry = base.join(&*entry);
            }
        }
    }

    Ok(config)
}

/// Builds the validated configuration from an optional file and command line overrides.
pub fn get_config(file: Option<&Path>, overrides: RawConfig) -> Result<Configuration> {
    let from_file = match file {
        Some(path) => load_config(path)?,
        None => {
            debug!("No configuration file found, using command line values only");
            RawConfig::default()
        }
    };

    Configuration::try_from(from_file.merge(overrides))
}
