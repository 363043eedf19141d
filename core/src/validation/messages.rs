// Canonical default validation messages and the localization seam
//
// Override detection depends on recognizing "this is still the default
// message", so the default sets are snapshotted once per validation call and
// compared case-insensitively against what editors return.

/// Keys for the canonical default messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    RequiredNull,
    RequiredEmpty,
    PatternMismatch,
}

/// Localization lookup for the canonical defaults. Deployment-specific
/// catalogs may translate them; the comparison stays case-insensitive.
pub trait MessageCatalog: Send + Sync {
    fn message(&self, key: MessageKey) -> String;
}

/// Built-in English catalog.
#[derive(Debug, Default, Clone)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn message(&self, key: MessageKey) -> String {
        match key {
            MessageKey::RequiredNull => "Value cannot be null".to_string(),
            MessageKey::RequiredEmpty => "Value cannot be empty".to_string(),
            MessageKey::PatternMismatch => {
                "Value is invalid, it does not match the correct pattern".to_string()
            }
        }
    }
}

/// The two default-message sets, fixed at call time.
#[derive(Debug, Clone)]
pub struct DefaultMessages {
    /// "required" set: distinct messages for null and empty values.
    pub required: [String; 2],
    /// "format" set: one message for pattern mismatch.
    pub format: String,
}

impl DefaultMessages {
    pub fn resolve(catalog: &dyn MessageCatalog) -> Self {
        Self {
            required: [
                catalog.message(MessageKey::RequiredNull),
                catalog.message(MessageKey::RequiredEmpty),
            ],
            format: catalog.message(MessageKey::PatternMismatch),
        }
    }

    /// Whether `message` is one of the required defaults, ignoring case.
    pub fn is_required_default(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        self.required
            .iter()
            .any(|default| default.to_lowercase() == lowered)
    }

    /// Whether `message` is the format default, ignoring case.
    pub fn is_format_default(&self, message: &str) -> bool {
        message.to_lowercase() == self.format.to_lowercase()
    }
}
