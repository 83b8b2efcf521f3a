use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("placeholder name pattern is valid"));

/// Validated placeholder name, e.g. `KTLINT_VERSION`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceholderName(String);

impl PlaceholderName {
    pub fn is_valid(name: &str) -> bool {
        NAME_PATTERN.is_match(name)
    }

    pub fn parse(name: &str) -> Result<Self> {
        if !Self::is_valid(name) {
            return Err(Error::TemplateError(format!(
                "Placeholder name \"{name}\" is invalid; names must match [A-Z][A-Z0-9_]*"
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceholderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of value a placeholder expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderType {
    QuotedString,
    Args,
    CommentText,
}

impl PlaceholderType {
    const ALL: [PlaceholderType; 3] = [Self::QuotedString, Self::Args, Self::CommentText];

    /// The identifier used after `::` in a template.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::QuotedString => "quoted_string",
            Self::Args => "args",
            Self::CommentText => "comment_text",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.identifier() == identifier)
    }
}

impl fmt::Display for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// A substitution site found in a template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: PlaceholderName,
    pub ty: PlaceholderType,
}

impl Placeholder {
    /// Builds a placeholder from the raw name and type captured from a template.
    pub fn from_raw(name: &str, type_identifier: &str) -> Result<Self> {
        let name = PlaceholderName::parse(name)?;

        let ty = PlaceholderType::from_identifier(type_identifier).ok_or_else(|| {
            Error::TemplateError(format!(
                "Placeholder type with identifier \"{type_identifier}\" does not exist"
            ))
        })?;

        Ok(Self { name, ty })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_name_validation() {
        assert!(PlaceholderName::is_valid("KTLINT_VERSION"));
        assert!(PlaceholderName::is_valid("A"));
        assert!(PlaceholderName::is_valid("X2_"));
        assert!(!PlaceholderName::is_valid(""));
        assert!(!PlaceholderName::is_valid("_LEADING"));
        assert!(!PlaceholderName::is_valid("2FAST"));
        assert!(!PlaceholderName::is_valid("lower"));
        assert!(!PlaceholderName::is_valid("WITH SPACE"));
    }

    #[test]
    fn test_placeholder_type_identifiers() {
        for ty in PlaceholderType::ALL {
            assert_eq!(PlaceholderType::from_identifier(ty.identifier()), Some(ty));
        }
        assert_eq!(PlaceholderType::from_identifier("QUOTED_STRING"), None);
        assert_eq!(PlaceholderType::from_identifier("comment"), None);
    }

    #[test]
    fn test_from_raw_errors() {
        assert!(matches!(
            Placeholder::from_raw("foo", "args"),
            Err(Error::TemplateError(_))
        ));
        assert!(matches!(
            Placeholder::from_raw("FOO", "bogus"),
            Err(Error::TemplateError(_))
        ));
    }
}
