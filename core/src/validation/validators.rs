// Shared required/format rule helpers editors compose
//
// These produce the canonical default messages that override detection in
// the property validator keys on.

use crate::validation::editor::{RawValidationError, ValueEditor};
use crate::validation::messages::{MessageCatalog, MessageKey};
use regex::Regex;
use tracing::warn;

/// The "required" rule: null values and empty strings/arrays fail, with
/// distinct default messages for the two cases.
pub struct RequiredValidator<'a> {
    catalog: &'a dyn MessageCatalog,
}

impl<'a> RequiredValidator<'a> {
    pub fn new(catalog: &'a dyn MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn validate(&self, value: &serde_json::Value) -> Vec<RawValidationError> {
        match value {
            serde_json::Value::Null => vec![RawValidationError::new(
                self.catalog.message(MessageKey::RequiredNull),
            )],
            serde_json::Value::String(s) if s.trim().is_empty() => vec![RawValidationError::new(
                self.catalog.message(MessageKey::RequiredEmpty),
            )],
            serde_json::Value::Array(items) if items.is_empty() => vec![RawValidationError::new(
                self.catalog.message(MessageKey::RequiredEmpty),
            )],
            _ => Vec::new(),
        }
    }
}

/// The "format" rule: a non-empty string value must match the declared
/// pattern. Non-string values are not format-checked.
pub struct RegexValidator<'a> {
    catalog: &'a dyn MessageCatalog,
}

impl<'a> RegexValidator<'a> {
    pub fn new(catalog: &'a dyn MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn validate(&self, value: &serde_json::Value, pattern: &str) -> Vec<RawValidationError> {
        let text = match value {
            serde_json::Value::String(s) if !s.is_empty() => s,
            // Absent values are the required rule's concern.
            _ => return Vec::new(),
        };

        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                // Configuration fault: fail open for this rule.
                warn!(pattern = %pattern, error = %e, "Invalid validation pattern, skipping format check");
                return Vec::new();
            }
        };

        if regex.is_match(text) {
            Vec::new()
        } else {
            vec![RawValidationError::new(
                self.catalog.message(MessageKey::PatternMismatch),
            )]
        }
    }
}

/// Reference editor composing the required and format rules. The wider
/// editor catalog (rich text, pickers, uploads) is host-provided.
pub struct PlainTextEditor<C: MessageCatalog> {
    catalog: C,
}

impl<C: MessageCatalog> PlainTextEditor<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }
}

impl<C: MessageCatalog> ValueEditor for PlainTextEditor<C> {
    fn validate(
        &self,
        value: &serde_json::Value,
        required: bool,
        pattern: Option<&str>,
    ) -> Vec<RawValidationError> {
        let mut errors = Vec::new();

        if required {
            errors.extend(RequiredValidator::new(&self.catalog).validate(value));
        }

        if let Some(pattern) = pattern.filter(|p| !p.trim().is_empty()) {
            errors.extend(RegexValidator::new(&self.catalog).validate(value, pattern));
        }

        errors
    }
}
