use std::fmt;

use chrono::{DateTime, Local};
use indexmap::IndexMap;

use crate::error::Result;
use crate::template::placeholder::{PlaceholderName, PlaceholderType};
use crate::template::TemplateEngine;

/// Deferred producer of the value substituted for one placeholder.
///
/// Each variant can only satisfy placeholders of the matching
/// [`PlaceholderType`].
pub enum ValueSupplier {
    /// A single value, emitted as one shell-quoted word.
    QuotedString(Box<dyn Fn() -> String>),
    /// Ordered values, each shell-quoted, joined with line continuations.
    Args(Box<dyn Fn() -> Vec<String>>),
    /// Text emitted inside a shell comment; receives the render's timestamp.
    CommentText(Box<dyn Fn(&DateTime<Local>) -> String>),
}

impl ValueSupplier {
    pub fn placeholder_type(&self) -> PlaceholderType {
        match self {
            ValueSupplier::QuotedString(_) => PlaceholderType::QuotedString,
            ValueSupplier::Args(_) => PlaceholderType::Args,
            ValueSupplier::CommentText(_) => PlaceholderType::CommentText,
        }
    }
}

impl fmt::Debug for ValueSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueSupplier::{:?}", self.placeholder_type())
    }
}

/// Collects value suppliers and builds a [`TemplateEngine`].
///
/// Every registration validates the placeholder name. Registering a name a
/// second time replaces the earlier supplier.
///
/// # Example
/// ```
/// use ktlint_hook::template::TemplateEngine;
///
/// let engine = TemplateEngine::builder()
///     .quoted_string("GREETING", "it's me")?
///     .args("FLAGS", ["--limit=3", "--experimental"])?
///     .build();
///
/// let script = engine.process_string("echo //GREETING::quoted_string//")?;
/// assert_eq!(script, r"echo 'it'\''s me'");
/// # Ok::<(), ktlint_hook::error::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TemplateEngineBuilder {
    suppliers: IndexMap<PlaceholderName, ValueSupplier>,
}

impl TemplateEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `supplier` for the placeholder called `name`.
    pub fn supplier(mut self, name: &str, supplier: ValueSupplier) -> Result<Self> {
        let name = PlaceholderName::parse(name)?;
        self.suppliers.insert(name, supplier);
        Ok(self)
    }

    pub fn quoted_string(self, name: &str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        self.quoted_string_with(name, move || value.clone())
    }

    pub fn quoted_string_with<F>(self, name: &str, supplier: F) -> Result<Self>
    where
        F: Fn() -> String + 'static,
    {
        self.supplier(name, ValueSupplier::QuotedString(Box::new(supplier)))
    }

    pub fn args<I, S>(self, name: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.args_with(name, move || args.clone())
    }

    pub fn args_with<F>(self, name: &str, supplier: F) -> Result<Self>
    where
        F: Fn() -> Vec<String> + 'static,
    {
        self.supplier(name, ValueSupplier::Args(Box::new(supplier)))
    }

    pub fn comment_text(self, name: &str, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        self.comment_text_with(name, move |_| text.clone())
    }

    pub fn comment_text_with<F>(self, name: &str, supplier: F) -> Result<Self>
    where
        F: Fn(&DateTime<Local>) -> String + 'static,
    {
        self.supplier(name, ValueSupplier::CommentText(Box::new(supplier)))
    }

    /// Registers a comment placeholder that expands to the render timestamp (RFC 3339).
    pub fn generated_date_time(self, name: &str) -> Result<Self> {
        self.comment_text_with(name, |generated_at| generated_at.to_rfc3339())
    }

    pub fn build(self) -> TemplateEngine {
        TemplateEngine::new(self.suppliers)
    }
}
