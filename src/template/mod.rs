//! Line-oriented shell script template engine.
//!
//! Templates contain placeholders of the form `//NAME::TYPE//`, where `TYPE`
//! is one of `quoted_string`, `args` or `comment_text`. Every placeholder is
//! replaced by the value of the supplier registered under `NAME`, quoted so
//! that the generated script can be executed without further escaping.

use std::sync::LazyLock;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

pub mod builder;
pub mod placeholder;

pub use builder::{TemplateEngineBuilder, ValueSupplier};
pub use placeholder::{Placeholder, PlaceholderName, PlaceholderType};

static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//([A-Za-z0-9_]+)::([A-Za-z0-9_]+)//").expect("placeholder pattern is valid")
});

/// Renders templates against an immutable table of value suppliers.
#[derive(Debug)]
pub struct TemplateEngine {
    suppliers: IndexMap<PlaceholderName, ValueSupplier>,
}

impl TemplateEngine {
    pub fn builder() -> TemplateEngineBuilder {
        TemplateEngineBuilder::new()
    }

    pub(crate) fn new(suppliers: IndexMap<PlaceholderName, ValueSupplier>) -> Self {
        Self { suppliers }
    }

    /// Renders `template`, stamping comment placeholders with the current time.
    ///
    /// # Errors
    /// * `Error::TemplateError` for a malformed name or an unknown type
    /// * `Error::BindingError` if no supplier (or one of the wrong kind) is registered
    pub fn process_string(&self, template: &str) -> Result<String> {
        self.process_string_at(template, &Local::now())
    }

    /// Renders `template` with an explicit generation timestamp.
    ///
    /// Lines are split on `\n` and joined again with `\n`, so a template
    /// without placeholders comes back byte for byte, trailing newline included.
    pub fn process_string_at(
        &self,
        template: &str,
        generated_at: &DateTime<Local>,
    ) -> Result<String> {
        debug!(
            "Processing template ({} suppliers registered, generated at {})",
            self.suppliers.len(),
            generated_at.to_rfc3339()
        );

        let lines = template
            .split('\n')
            .map(|line| self.process_line(line, generated_at))
            .collect::<Result<Vec<_>>>()?;

        Ok(lines.join("\n"))
    }

    fn process_line(&self, line: &str, generated_at: &DateTime<Local>) -> Result<String> {
        let indent = leading_whitespace(line);

        let mut processed = String::with_capacity(line.len());
        let mut last_end = 0;

        for captures in PLACEHOLDER_PATTERN.captures_iter(line) {
            let whole = captures.get_match();
            let (_, [name, type_identifier]) = captures.extract();

            let placeholder = Placeholder::from_raw(name, type_identifier)?;

            processed.push_str(&line[last_end..whole.start()]);
            processed.push_str(&self.expand(&placeholder, indent, generated_at)?);
            last_end = whole.end();
        }

        processed.push_str(&line[last_end..]);
        Ok(processed)
    }

    fn expand(
        &self,
        placeholder: &Placeholder,
        indent: &str,
        generated_at: &DateTime<Local>,
    ) -> Result<String> {
        let supplier = self.suppliers.get(&placeholder.name).ok_or_else(|| {
            Error::BindingError(format!(
                "No replacement registered for placeholder with name \"{}\"",
                placeholder.name
            ))
        })?;

        let value = match (placeholder.ty, supplier) {
            (PlaceholderType::QuotedString, ValueSupplier::QuotedString(get_string)) => {
                quote_for_sh(&get_string())
            }
            (PlaceholderType::Args, ValueSupplier::Args(get_args)) => get_args()
                .iter()
                .map(|arg| quote_for_sh(arg))
                .collect::<Vec<_>>()
                .join(&format!(" \\\n{indent}")),
            (PlaceholderType::CommentText, ValueSupplier::CommentText(get_text)) => {
                get_text(generated_at).replace('\n', &format!("\n{indent}# "))
            }
            (requested, registered) => {
                return Err(Error::BindingError(format!(
                    "Registered replacement for placeholder with name \"{}\" is of type {}, \
                     but the template requests {}",
                    placeholder.name,
                    registered.placeholder_type(),
                    requested
                )))
            }
        };

        Ok(value)
    }
}

/// Quotes `value` as exactly one POSIX shell word.
///
/// The value is wrapped in single quotes; embedded single quotes are written
/// as `'\''` (close the quote, escaped quote, reopen).
pub fn quote_for_sh(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    quoted.push_str(&value.replace('\'', r"'\''"));
    quoted.push('\'');
    quoted
}

// `^\s*`
fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_for_sh() {
        assert_eq!(quote_for_sh(""), "''");
        assert_eq!(quote_for_sh("plain"), "'plain'");
        assert_eq!(quote_for_sh("it's"), r"'it'\''s'");
        assert_eq!(quote_for_sh("$HOME *"), "'$HOME *'");
    }

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace("\t  foo  "), "\t  ");
        assert_eq!(leading_whitespace("foo"), "");
        assert_eq!(leading_whitespace("   "), "   ");
        assert_eq!(leading_whitespace(""), "");
    }
}
