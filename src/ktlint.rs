//! Version-dependent knowledge about ktlint itself: which command line flags
//! a release understands and under which Maven coordinates it is published.

use std::fmt;

use log::debug;
use semver::Version;

use crate::error::{Error, Result};

/// Oldest release the generated hook works with (`--patterns-from-stdin`).
pub const MIN_SUPPORTED_VERSION: Version = Version::new(0, 48, 0);

/// First release that accepts `--code-style` (and deprecates `--android`).
pub const CODE_STYLE_OPTION_VERSION: Version = Version::new(0, 49, 0);

/// First release published as `com.pinterest.ktlint:ktlint-cli`.
pub const NEW_COORDINATES_VERSION: Version = Version::new(1, 0, 0);

const OLD_GROUP: &str = "com.pinterest";
const OLD_ARTIFACT: &str = "ktlint";
const NEW_GROUP: &str = "com.pinterest.ktlint";
const NEW_ARTIFACT: &str = "ktlint-cli";

const ANDROID_CODE_STYLE: &str = "android_studio";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CodeStyle {
    /// Let ktlint (or `.editorconfig`) decide.
    #[default]
    Default,
    Specific(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorLimit {
    #[default]
    None,
    Max(u32),
}

/// Legacy project flag; `Android` maps to `--android` or the Android Studio code style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectType {
    #[default]
    Other,
    Android,
}

/// Options that influence the ktlint invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    pub code_style: CodeStyle,
    pub error_limit: ErrorLimit,
    pub experimental: bool,
    pub project_type: ProjectType,
}

/// Maven coordinates of a ktlint release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub group: &'static str,
    pub artifact: &'static str,
    pub version: Version,
}

impl Coordinates {
    /// Selects the coordinate scheme that `version` was published under.
    pub fn for_version(version: &Version) -> Self {
        let (group, artifact) = if *version >= NEW_COORDINATES_VERSION {
            (NEW_GROUP, NEW_ARTIFACT)
        } else {
            (OLD_GROUP, OLD_ARTIFACT)
        };

        Self {
            group,
            artifact,
            version: version.clone(),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Builds the ktlint arguments for `options`, adjusted to what `version` supports.
///
/// # Errors
/// * `Error::ConfigError` if the Android flag and an explicit code style are both set,
///   or if an explicit code style is requested from a release without `--code-style`
pub fn cli_args(version: &Version, options: &LintOptions) -> Result<Vec<String>> {
    let mut args = Vec::new();

    if let Some(code_style_arg) = code_style_arg(version, &options.code_style, options.project_type)? {
        args.push(code_style_arg);
    }

    if let ErrorLimit::Max(n) = options.error_limit {
        args.push(format!("--limit={n}"));
    }

    if options.experimental {
        args.push("--experimental".to_string());
    }

    debug!("ktlint {version} arguments: {args:?}");
    Ok(args)
}

fn code_style_arg(
    version: &Version,
    code_style: &CodeStyle,
    project_type: ProjectType,
) -> Result<Option<String>> {
    let supports_code_style = *version >= CODE_STYLE_OPTION_VERSION;

    match (project_type, code_style) {
        (ProjectType::Android, CodeStyle::Specific(name)) => Err(Error::ConfigError(format!(
            "Both the Android project flag and the code style \"{name}\" are configured; \
             remove the Android flag and keep only the code style"
        ))),
        (ProjectType::Android, CodeStyle::Default) if supports_code_style => {
            Ok(Some(format!("--code-style={ANDROID_CODE_STYLE}")))
        }
        (ProjectType::Android, CodeStyle::Default) => Ok(Some("--android".to_string())),
        (ProjectType::Other, CodeStyle::Specific(name)) if supports_code_style => {
            Ok(Some(format!("--code-style={name}")))
        }
        (ProjectType::Other, CodeStyle::Specific(name)) => Err(Error::ConfigError(format!(
            "Code style \"{name}\" requires ktlint {CODE_STYLE_OPTION_VERSION} or newer \
             (configured version is {version})"
        ))),
        (ProjectType::Other, CodeStyle::Default) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(version: &str) -> Version {
        Version::parse(version).unwrap()
    }

    #[test]
    fn test_coordinates_display() {
        assert_eq!(
            Coordinates::for_version(&v("0.50.0")).to_string(),
            "com.pinterest:ktlint:0.50.0"
        );
        assert_eq!(
            Coordinates::for_version(&v("1.2.1")).to_string(),
            "com.pinterest.ktlint:ktlint-cli:1.2.1"
        );
    }

    #[test]
    fn test_prerelease_of_first_new_version_uses_old_scheme() {
        let coordinates = Coordinates::for_version(&v("1.0.0-rc.1"));
        assert_eq!(coordinates.group, "com.pinterest");
        assert_eq!(coordinates.artifact, "ktlint");
    }

    #[test]
    fn test_default_options_produce_no_args() {
        assert!(cli_args(&v("1.0.0"), &LintOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_argument_order() {
        let options = LintOptions {
            code_style: CodeStyle::Specific("ktlint_official".to_string()),
            error_limit: ErrorLimit::Max(0),
            experimental: true,
            project_type: ProjectType::Other,
        };

        assert_eq!(
            cli_args(&v("1.0.0"), &options).unwrap(),
            ["--code-style=ktlint_official", "--limit=0", "--experimental"]
        );
    }
}
