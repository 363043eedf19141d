// Field-scoped error accumulation for one validation pass

use crate::errors::ValidationErrorBody;
use crate::models::PropertyPath;
use serde::Serialize;
use std::collections::BTreeMap;

/// One field-scoped validation error. Non-fatal: remaining fields are still
/// checked after it is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyError {
    pub path: PropertyPath,
    pub message: String,
}

/// Accumulates field-scoped errors for a single submission.
///
/// Owned by the pipeline for the duration of one request and discarded with
/// the response. Duplicates are tolerated, not deduplicated: pluggable
/// editors are free to raise multiple distinct errors per field.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    errors: Vec<PropertyError>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: PropertyPath, message: impl Into<String>) {
        self.errors.push(PropertyError {
            path,
            message: message.into(),
        });
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = PropertyError>) {
        self.errors.extend(errors);
    }

    /// The aggregated result is valid iff this is true after all stages run.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[PropertyError] {
        &self.errors
    }

    /// Group messages by field path for presentation. Insertion order within
    /// a path is preserved; duplicate messages survive grouping.
    pub fn grouped(&self) -> BTreeMap<String, Vec<&str>> {
        let mut grouped: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for error in &self.errors {
            grouped
                .entry(error.path.to_string())
                .or_default()
                .push(error.message.as_str());
        }
        grouped
    }

    pub fn into_errors(self) -> Vec<PropertyError> {
        self.errors
    }

    /// Render as a structured 4xx-style response body.
    pub fn to_body(&self) -> ValidationErrorBody {
        let details = serde_json::to_value(self.grouped()).unwrap_or(serde_json::Value::Null);
        ValidationErrorBody::new("VALIDATION_ERROR", "Validation failed").with_details(details)
    }
}
