//! ktlint-hook installs a Git pre-commit hook that runs ktlint on staged Kotlin files.
//! It renders a POSIX shell template with a small typed template engine and
//! selects the ktlint flags and Maven coordinates matching the configured version.
//! The same configuration drives a one-off formatting run over a source directory.

/// Resolution of the ktlint classpath
pub mod classpath;

/// Command-line interface module
pub mod cli;

/// Configuration loading, merging and validation
/// Supports JSON and YAML formats (ktlint-hook.json, ktlint-hook.yml, ktlint-hook.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Formatting of Kotlin sources with ktlint
pub mod format;

/// Lookup of the Git pre-commit hook path
pub mod git;

/// Rendering and installation of the pre-commit hook
pub mod hook;

/// Version-dependent ktlint flags and coordinates
pub mod ktlint;

/// Logger setup
pub mod logger;

/// User interaction
pub mod prompt;

/// Shell script template engine
pub mod template;
