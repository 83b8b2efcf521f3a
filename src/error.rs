//! Error handling for ktlint-hook.
//! Defines the error taxonomy and result alias used throughout the crate.

use std::io;
use thiserror::Error;

use crate::constants::ISSUE_TRACKER_URL;

/// Errors that can occur while configuring, rendering or installing the hook.
///
/// Template and binding errors come from the template engine, configuration
/// errors from user input, and `Internal` marks conditions that point to a
/// defect in this tool rather than a mistake by the user.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// A placeholder in a template is malformed (invalid name or unknown type)
    #[error("Template error: {0}")]
    TemplateError(String),

    /// A placeholder could not be bound to a value supplier
    #[error("Binding error: {0}")]
    BindingError(String),

    /// Invalid or conflicting user configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The ktlint classpath could not be resolved
    #[error("Resolution error: {0}")]
    ResolutionError(String),

    /// Failure while inspecting the Git repository
    #[error("Git error: {0}")]
    GitError(#[from] git2::Error),

    /// Failure while installing the hook script
    #[error("Hook error: {0}")]
    HookError(String),

    /// ktlint could not be launched or failed while formatting
    #[error("Formatting error: {0}")]
    FormatError(String),

    /// Something that should never happen
    #[error("{}", internal_error_msg(.0))]
    Internal(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Appends the "please report this" sentence to an internal error message.
///
/// A message ending in `...` is completed with "this is an internal error",
/// any other message gets it as a separate sentence on a new line.
pub fn internal_error_msg(msg: &str) -> String {
    let report_sentence = format!("Please report it at {ISSUE_TRACKER_URL}");

    match msg.strip_suffix("...") {
        Some(head) => format!("{head}this is an internal error. {report_sentence}"),
        None => format!(
            "{}.\nThis is an internal error. {report_sentence}",
            msg.trim_end_matches('.')
        ),
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
