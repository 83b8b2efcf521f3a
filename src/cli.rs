//! Command-line interface implementation for ktlint-hook.
//! Provides argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::RawConfig;
use crate::constants::INSTALLATION_COMMAND;
use crate::template::quote_for_sh;

/// Command-line arguments structure for ktlint-hook.
///
/// Without a subcommand the pre-commit hook is installed.
#[derive(Parser, Debug)]
#[command(author, version, about = "ktlint-hook: installs a ktlint Git pre-commit hook", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// ktlint version to run, e.g. 1.0.1
    #[arg(long, global = true, value_name = "VERSION")]
    pub ktlint_version: Option<String>,

    /// ktlint code style (requires ktlint 0.49.0 or newer)
    #[arg(long, global = true, value_name = "NAME")]
    pub code_style: Option<String>,

    /// Treat the project as an Android project.
    /// Deprecated since ktlint 0.49.0 in favor of --code-style=android_studio
    #[arg(long, global = true)]
    pub android: bool,

    /// Maximum number of errors to report
    #[arg(long, global = true, value_name = "N", allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Enable ktlint's experimental rules
    #[arg(long, global = true)]
    pub experimental: bool,

    /// Jar file of the ktlint classpath (repeatable)
    #[arg(long = "classpath", global = true, value_name = "JAR")]
    pub classpath: Vec<PathBuf>,

    /// Main class of the ktlint jar (default: read from the jar manifests)
    #[arg(long, global = true, value_name = "CLASS")]
    pub main_class: Option<String>,

    /// Configuration file (default: ktlint-hook.json, .yml or .yaml in the current directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the rendered hook script instead of installing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the Maven coordinates of the configured ktlint version and exit
    #[arg(long)]
    pub print_coordinates: bool,

    /// Overwrite an existing pre-commit hook without asking
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Format the Kotlin files of a directory with ktlint
    Format {
        /// Directory containing the Kotlin sources
        input_dir: PathBuf,

        /// Directory the formatted files are written to (default: the input directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl Args {
    /// Settings given on the command line; unset flags leave file values alone.
    pub fn overrides(&self) -> RawConfig {
        RawConfig {
            version: self.ktlint_version.clone(),
            code_style: self.code_style.clone(),
            android: self.android.then_some(true),
            limit: self.limit,
            experimental: self.experimental.then_some(true),
            classpath: (!self.classpath.is_empty()).then(|| self.classpath.clone()),
            main_class: self.main_class.clone(),
        }
    }

    /// Shell command line that installs the hook again with the same settings.
    ///
    /// Relative paths are made absolute against `working_dir`; flags that only
    /// affect a single run (`--dry-run`, `--force`, ...) are left out.
    pub fn reinstall_command(&self, working_dir: &Path) -> String {
        let mut words = vec![INSTALLATION_COMMAND.to_string()];

        if let Some(config) = &self.config {
            words.push(format!("--config={}", working_dir.join(config).display()));
        }
        if let Some(version) = &self.ktlint_version {
            words.push(format!("--ktlint-version={version}"));
        }
        if let Some(code_style) = &self.code_style {
            words.push(format!("--code-style={code_style}"));
        }
        if self.android {
            words.push("--android".to_string());
        }
        if let Some(limit) = self.limit {
            words.push(format!("--limit={limit}"));
        }
        if self.experimental {
            words.push("--experimental".to_string());
        }
        for jar in &self.classpath {
            words.push(format!("--classpath={}", working_dir.join(jar).display()));
        }
        if let Some(main_class) = &self.main_class {
            words.push(format!("--main-class={main_class}"));
        }

        words
            .iter()
            .map(|word| shell_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// quotes only where the shell would otherwise split or expand
fn shell_word(word: &str) -> String {
    let is_plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));

    if is_plain {
        word.to_string()
    } else {
        quote_for_sh(word)
    }
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
