use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Submitted edit payload
// ============================================================================

/// A posted content edit: the target entity plus the submitted property
/// entries, in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedEdit {
    pub content_id: Uuid,
    pub properties: Vec<SubmittedProperty>,
}

impl SubmittedEdit {
    /// Look up the submitted entry for an alias, if the client sent one.
    pub fn property(&self, alias: &str) -> Option<&SubmittedProperty> {
        self.properties.iter().find(|p| p.alias == alias)
    }
}

/// One submitted property value with its declared validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedProperty {
    pub alias: String,
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Deployment-supplied replacement for the default required messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Deployment-supplied replacement for the default format message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
}

impl SubmittedProperty {
    pub fn path(&self) -> PropertyPath {
        PropertyPath {
            alias: self.alias.clone(),
            culture: self.culture.clone(),
            segment: self.segment.clone(),
        }
    }
}

/// The key a field-scoped error is reported under: alias plus the culture
/// and segment variant it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyPath {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl PropertyPath {
    pub fn new(
        alias: impl Into<String>,
        culture: Option<String>,
        segment: Option<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            culture,
            segment,
        }
    }

    /// Invariant alias-only path for fields without culture variants.
    pub fn invariant(alias: impl Into<String>) -> Self {
        Self::new(alias, None, None)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias)?;
        if let Some(culture) = &self.culture {
            write!(f, "_{}", culture)?;
        }
        if let Some(segment) = &self.segment {
            write!(f, "_{}", segment)?;
        }
        Ok(())
    }
}

// ============================================================================
// Field configuration
// ============================================================================

/// Per-alias configuration resolved from the content type: which pluggable
/// editor governs the field, and that editor's configuration blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub alias: String,
    pub editor_alias: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

// ============================================================================
// Scheduled publish outcomes
// ============================================================================

/// Classification reported by the external publish operation for one entity.
/// Used here only as a grouping key for per-run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    Success,
    Failed,
    Cancelled,
    AwaitingRelease,
}

impl fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PublishStatus::Success => "success",
            PublishStatus::Failed => "failed",
            PublishStatus::Cancelled => "cancelled",
            PublishStatus::AwaitingRelease => "awaiting_release",
        };
        f.write_str(s)
    }
}

/// One (entity, status) pair from a scheduled publish run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    pub content_id: Uuid,
    pub status: PublishStatus,
}
