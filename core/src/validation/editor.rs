// Pluggable editor seam
//
// The catalog of editor implementations lives outside this core; fields
// reference editors by alias and resolution failure is an explicit absence,
// not a runtime type query.

use std::collections::HashMap;
use std::sync::Arc;

/// An error as returned by an editor's validator, carrying the editor's
/// default message before any deployment overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValidationError {
    pub message: String,
}

impl RawValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validator capability of a pluggable editor.
pub trait ValueEditor: Send + Sync {
    /// Validate a raw submitted value against the field's declared rules.
    /// Returns one error per violated rule, using default messages.
    fn validate(
        &self,
        value: &serde_json::Value,
        required: bool,
        pattern: Option<&str>,
    ) -> Vec<RawValidationError>;
}

/// Maps editor aliases to validator capabilities. Read-only at request time;
/// loading and refresh lifecycle is owned by the host.
pub trait EditorRegistry: Send + Sync {
    fn resolve(&self, editor_alias: &str) -> Option<Arc<dyn ValueEditor>>;
}

/// In-memory registry built once at startup.
#[derive(Default)]
pub struct StaticEditorRegistry {
    editors: HashMap<String, Arc<dyn ValueEditor>>,
}

impl StaticEditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, editor_alias: impl Into<String>, editor: Arc<dyn ValueEditor>) {
        self.editors.insert(editor_alias.into(), editor);
    }

    pub fn with_editor(
        mut self,
        editor_alias: impl Into<String>,
        editor: Arc<dyn ValueEditor>,
    ) -> Self {
        self.register(editor_alias, editor);
        self
    }
}

impl EditorRegistry for StaticEditorRegistry {
    fn resolve(&self, editor_alias: &str) -> Option<Arc<dyn ValueEditor>> {
        self.editors.get(editor_alias).cloned()
    }
}
