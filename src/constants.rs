//! Common constants used throughout ktlint-hook.

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["ktlint-hook.json", "ktlint-hook.yml", "ktlint-hook.yaml"];

/// Where internal errors should be reported
pub const ISSUE_TRACKER_URL: &str = "https://github.com/mfederczuk/ktlint-hook/issues";

/// Manifest entry of a jar file, relative to the archive root
pub const JAR_MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Program name; first word of the reinstall command embedded into the script
pub const INSTALLATION_COMMAND: &str = "ktlint-hook";

/// Line every generated hook script carries; used to tell generated hooks from hand-written ones
pub const GENERATED_HOOK_MARKER: &str = "# generated by ktlint-hook";

/// Shell template of the pre-commit hook
pub const PRE_COMMIT_TEMPLATE: &str = include_str!("../templates/pre-commit.template.sh");
