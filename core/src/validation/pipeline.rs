// Multi-stage validation of a submitted content edit
//
// Stage order is fixed: entity existence, then field presence, then
// per-field value validation. The first two are structural hard stops;
// the third collects everything it finds.

use crate::errors::{FatalValidationError, ValidationErrorBody};
use crate::models::{FieldDescriptor, SubmittedEdit};
use crate::validation::aggregator::ErrorAggregator;
use crate::validation::editor::EditorRegistry;
use crate::validation::messages::MessageCatalog;
use crate::validation::property::PropertyValueValidator;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The stored entity being edited. Beyond its known property aliases it is
/// opaque to validation.
pub trait PersistedContent: Send + Sync {
    fn id(&self) -> Uuid;
    fn property_aliases(&self) -> Vec<String>;

    fn has_property(&self, alias: &str) -> bool {
        self.property_aliases().iter().any(|a| a == alias)
    }
}

/// Resolves an edit's target identifier to the persisted entity.
pub trait ContentResolver: Send + Sync {
    fn resolve(&self, id: Uuid) -> Option<Arc<dyn PersistedContent>>;
}

/// Aggregated outcome of one validation pass.
#[derive(Debug)]
pub enum ValidationReport {
    /// Structural failure; no field validation ran past the failing stage.
    Fatal(FatalValidationError),
    /// Field-level outcome; valid iff the aggregator is empty.
    Fields(ErrorAggregator),
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        match self {
            ValidationReport::Fatal(_) => false,
            ValidationReport::Fields(errors) => errors.is_empty(),
        }
    }

    pub fn to_body(&self) -> Option<ValidationErrorBody> {
        match self {
            ValidationReport::Fatal(err) => Some(err.clone().into()),
            ValidationReport::Fields(errors) if !errors.is_empty() => Some(errors.to_body()),
            ValidationReport::Fields(_) => None,
        }
    }
}

/// Orchestrates the validation stages over one submitted edit. Created once
/// at startup over read-only registries; all per-request state lives in the
/// report.
pub struct ValidationPipeline {
    resolver: Arc<dyn ContentResolver>,
    editors: Arc<dyn EditorRegistry>,
    property_validator: PropertyValueValidator,
}

impl ValidationPipeline {
    pub fn new(
        resolver: Arc<dyn ContentResolver>,
        editors: Arc<dyn EditorRegistry>,
        catalog: &dyn MessageCatalog,
    ) -> Self {
        Self {
            resolver,
            editors,
            property_validator: PropertyValueValidator::new(catalog),
        }
    }

    /// Stage 1: the referenced entity must exist. Hard stop otherwise.
    pub fn resolve_existing(
        &self,
        edit: &SubmittedEdit,
    ) -> Result<Arc<dyn PersistedContent>, FatalValidationError> {
        self.resolver
            .resolve(edit.content_id)
            .ok_or(FatalValidationError::ContentNotFound {
                id: edit.content_id,
            })
    }

    /// Stage 2: every submitted alias must exist on the persisted entity.
    /// Stops at the first missing alias rather than collecting all of them.
    pub fn check_property_presence(
        &self,
        edit: &SubmittedEdit,
        content: &dyn PersistedContent,
    ) -> Result<(), FatalValidationError> {
        for property in &edit.properties {
            if !content.has_property(&property.alias) {
                return Err(FatalValidationError::PropertyNotFound {
                    alias: property.alias.clone(),
                });
            }
        }
        Ok(())
    }

    /// Stage 3: delegate each submitted field to its editor's validator and
    /// collect the outcomes. Returns the aggregated validity.
    pub fn validate_property_values(
        &self,
        edit: &SubmittedEdit,
        descriptors: &[FieldDescriptor],
        errors: &mut ErrorAggregator,
    ) -> bool {
        for descriptor in descriptors {
            let editor = match self.editors.resolve(&descriptor.editor_alias) {
                Some(editor) => editor,
                None => {
                    // Configuration gap: skip the field rather than block
                    // the whole submission.
                    warn!(
                        alias = %descriptor.alias,
                        editor_alias = %descriptor.editor_alias,
                        "No editor found for field, skipping validation"
                    );
                    continue;
                }
            };

            let property = match edit.property(&descriptor.alias) {
                Some(property) => property,
                // Field intentionally omitted by the client (e.g. read-only).
                None => continue,
            };

            errors.extend(self.property_validator.validate(property, editor.as_ref()));
        }

        errors.is_empty()
    }

    /// Run all stages over one edit.
    pub fn validate(
        &self,
        edit: &SubmittedEdit,
        descriptors: &[FieldDescriptor],
    ) -> ValidationReport {
        let content = match self.resolve_existing(edit) {
            Ok(content) => content,
            Err(fatal) => return ValidationReport::Fatal(fatal),
        };

        if let Err(fatal) = self.check_property_presence(edit, content.as_ref()) {
            return ValidationReport::Fatal(fatal);
        }

        let mut errors = ErrorAggregator::new();
        let valid = self.validate_property_values(edit, descriptors, &mut errors);
        debug!(
            content_id = %edit.content_id,
            valid,
            error_count = errors.len(),
            "Edit validation completed"
        );

        ValidationReport::Fields(errors)
    }
}
