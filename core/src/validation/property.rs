// Per-property validation with deployment message overrides

use crate::models::SubmittedProperty;
use crate::validation::aggregator::PropertyError;
use crate::validation::editor::ValueEditor;
use crate::validation::messages::{DefaultMessages, MessageCatalog};

fn non_blank(message: &Option<String>) -> Option<&str> {
    message.as_deref().map(str::trim).filter(|m| !m.is_empty())
}

/// Validates one submitted property value through its governing editor and
/// rewrites default messages with deployment-supplied overrides.
pub struct PropertyValueValidator {
    defaults: DefaultMessages,
}

impl PropertyValueValidator {
    /// Snapshot the default-message sets from the catalog. Done once per
    /// validator; override detection compares against this snapshot.
    pub fn new(catalog: &dyn MessageCatalog) -> Self {
        Self {
            defaults: DefaultMessages::resolve(catalog),
        }
    }

    /// Run the editor's validator and emit (possibly rewritten) errors keyed
    /// by the property's path.
    pub fn validate(
        &self,
        property: &SubmittedProperty,
        editor: &dyn ValueEditor,
    ) -> Vec<PropertyError> {
        let raw_errors = editor.validate(
            &property.value,
            property.required,
            property.pattern.as_deref(),
        );

        let path = property.path();
        raw_errors
            .into_iter()
            .map(|raw| {
                let mut message = raw.message;

                // Both substitutions are independent; a raw error matching
                // both default sets gets rewritten twice, format last.
                if property.required {
                    if let Some(override_message) = non_blank(&property.required_message) {
                        if self.defaults.is_required_default(&message) {
                            message = override_message.to_string();
                        }
                    }
                }

                if non_blank(&property.pattern).is_some() {
                    if let Some(override_message) = non_blank(&property.pattern_message) {
                        if self.defaults.is_format_default(&message) {
                            message = override_message.to_string();
                        }
                    }
                }

                PropertyError {
                    path: path.clone(),
                    message,
                }
            })
            .collect()
    }
}
