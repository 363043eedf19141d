// Validation pipeline for submitted content edits

pub mod aggregator;
pub mod editor;
pub mod messages;
pub mod pipeline;
pub mod property;
pub mod validators;

pub use aggregator::{ErrorAggregator, PropertyError};
pub use editor::{EditorRegistry, RawValidationError, StaticEditorRegistry, ValueEditor};
pub use messages::{DefaultMessages, EnglishCatalog, MessageCatalog, MessageKey};
pub use pipeline::{
    ContentResolver, PersistedContent, ValidationPipeline, ValidationReport,
};
pub use property::PropertyValueValidator;
