use std::io;

use ktlint_hook::constants::ISSUE_TRACKER_URL;
use ktlint_hook::error::{internal_error_msg, Error};

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config");

    let err = Error::TemplateError("unknown placeholder type".to_string());
    assert_eq!(err.to_string(), "Template error: unknown placeholder type");

    let err = Error::BindingError("no supplier".to_string());
    assert_eq!(err.to_string(), "Binding error: no supplier");

    let err = Error::FormatError("ktlint failed (exit status: 1)".to_string());
    assert_eq!(err.to_string(), "Formatting error: ktlint failed (exit status: 1)");
}

#[test]
fn test_internal_error_message() {
    assert_eq!(
        internal_error_msg("Classpath is empty"),
        format!("Classpath is empty.\nThis is an internal error. Please report it at {ISSUE_TRACKER_URL}")
    );
    assert_eq!(
        internal_error_msg("Hook path is relative, ..."),
        format!("Hook path is relative, this is an internal error. Please report it at {ISSUE_TRACKER_URL}")
    );
}

#[test]
fn test_internal_error_display() {
    let err = Error::Internal("Resolved ktlint classpath is empty".to_string());
    let message = err.to_string();

    assert!(message.starts_with("Resolved ktlint classpath is empty.\n"));
    assert!(message.ends_with(ISSUE_TRACKER_URL));
}
