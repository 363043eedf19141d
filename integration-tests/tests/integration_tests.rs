// End-to-end tests wiring the validation pipeline and the gated publishing
// task against in-memory collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pressroom_core::errors::PublishError;
use pressroom_core::models::{
    FieldDescriptor, PublishResult, PublishStatus, SubmittedEdit, SubmittedProperty,
};
use pressroom_core::runtime::{
    NodeRuntimeState, RuntimeContext, RuntimeLevel, ServerRole, SuspensionGate,
};
use pressroom_core::scheduler::{ScheduledPublishTask, ScheduledPublisher, TaskRunner};
use pressroom_core::validation::validators::PlainTextEditor;
use pressroom_core::validation::{
    ContentResolver, EnglishCatalog, PersistedContent, StaticEditorRegistry, ValidationPipeline,
    ValidationReport,
};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// In-memory collaborators
// ============================================================================

struct InMemoryContent {
    id: Uuid,
    aliases: Vec<String>,
}

impl PersistedContent for InMemoryContent {
    fn id(&self) -> Uuid {
        self.id
    }

    fn property_aliases(&self) -> Vec<String> {
        self.aliases.clone()
    }
}

#[derive(Default)]
struct InMemoryResolver {
    content: HashMap<Uuid, Arc<dyn PersistedContent>>,
}

impl InMemoryResolver {
    fn insert(&mut self, id: Uuid, aliases: &[&str]) {
        self.content.insert(
            id,
            Arc::new(InMemoryContent {
                id,
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            }),
        );
    }
}

impl ContentResolver for InMemoryResolver {
    fn resolve(&self, id: Uuid) -> Option<Arc<dyn PersistedContent>> {
        self.content.get(&id).cloned()
    }
}

fn build_pipeline(resolver: InMemoryResolver) -> ValidationPipeline {
    let registry = StaticEditorRegistry::new().with_editor(
        "Pressroom.PlainText",
        Arc::new(PlainTextEditor::new(EnglishCatalog)),
    );
    ValidationPipeline::new(Arc::new(resolver), Arc::new(registry), &EnglishCatalog)
}

fn text_descriptor(alias: &str) -> FieldDescriptor {
    FieldDescriptor {
        alias: alias.to_string(),
        editor_alias: "Pressroom.PlainText".to_string(),
        config: serde_json::json!({}),
    }
}

fn property(alias: &str, value: serde_json::Value) -> SubmittedProperty {
    SubmittedProperty {
        alias: alias.to_string(),
        value,
        culture: None,
        segment: None,
        required: false,
        required_message: None,
        pattern: None,
        pattern_message: None,
    }
}

// ============================================================================
// Validation pipeline end to end
// ============================================================================

#[test]
fn invalid_submission_round_trips_to_a_structured_body() {
    let id = Uuid::new_v4();
    let mut resolver = InMemoryResolver::default();
    resolver.insert(id, &["title", "slug"]);
    let pipeline = build_pipeline(resolver);

    let mut title = property("title", serde_json::Value::Null);
    title.required = true;
    title.required_message = Some("A title is required".to_string());
    let mut slug = property("slug", serde_json::json!("Not A Slug"));
    slug.pattern = Some(r"^[a-z0-9-]+$".to_string());
    slug.pattern_message = Some("Lowercase letters, digits and dashes only".to_string());

    let edit = SubmittedEdit {
        content_id: id,
        properties: vec![title, slug],
    };
    let descriptors = vec![text_descriptor("title"), text_descriptor("slug")];

    let report = pipeline.validate(&edit, &descriptors);
    assert!(!report.is_valid());

    let body = report.to_body().expect("invalid report must have a body");
    assert_eq!(body.code, "VALIDATION_ERROR");
    let details = body.details.unwrap();
    assert_eq!(details["title"][0], "A title is required");
    assert_eq!(
        details["slug"][0],
        "Lowercase letters, digits and dashes only"
    );
}

#[test]
fn corrected_resubmission_passes() {
    let id = Uuid::new_v4();
    let mut resolver = InMemoryResolver::default();
    resolver.insert(id, &["title", "slug"]);
    let pipeline = build_pipeline(resolver);

    let mut title = property("title", serde_json::json!("Launch notes"));
    title.required = true;
    let mut slug = property("slug", serde_json::json!("launch-notes"));
    slug.pattern = Some(r"^[a-z0-9-]+$".to_string());

    let edit = SubmittedEdit {
        content_id: id,
        properties: vec![title, slug],
    };
    let descriptors = vec![text_descriptor("title"), text_descriptor("slug")];

    let report = pipeline.validate(&edit, &descriptors);
    assert!(report.is_valid());
    assert!(report.to_body().is_none());
}

#[test]
fn unknown_target_is_a_not_found_signal_not_a_field_error() {
    let pipeline = build_pipeline(InMemoryResolver::default());

    let edit = SubmittedEdit {
        content_id: Uuid::new_v4(),
        properties: vec![property("title", serde_json::json!("hello"))],
    };

    let report = pipeline.validate(&edit, &[text_descriptor("title")]);
    match report {
        ValidationReport::Fatal(_) => {}
        other => panic!("expected fatal report, got {:?}", other),
    }
}

// ============================================================================
// Idempotence property
// ============================================================================

fn arb_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        Just(serde_json::json!("")),
        "[a-zA-Z ]{0,12}".prop_map(|s| serde_json::json!(s)),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
    ]
}

fn arb_property(alias: String) -> impl Strategy<Value = SubmittedProperty> {
    (arb_value(), any::<bool>(), any::<bool>()).prop_map(move |(value, required, patterned)| {
        SubmittedProperty {
            alias: alias.clone(),
            value,
            culture: None,
            segment: None,
            required,
            required_message: Some("Required override".to_string()),
            pattern: patterned.then(|| r"^[a-z]+$".to_string()),
            pattern_message: Some("Pattern override".to_string()),
        }
    })
}

proptest! {
    // Re-running validation over unchanged inputs and registries yields an
    // identical error set.
    #[test]
    fn validation_is_idempotent(
        props in proptest::collection::vec(
            (0usize..4usize).prop_flat_map(|i| arb_property(format!("field{}", i))),
            0..4
        )
    ) {
        let id = Uuid::new_v4();
        let mut resolver = InMemoryResolver::default();
        resolver.insert(id, &["field0", "field1", "field2", "field3"]);
        let pipeline = build_pipeline(resolver);

        let edit = SubmittedEdit { content_id: id, properties: props };
        let descriptors: Vec<_> = (0..4)
            .map(|i| text_descriptor(&format!("field{}", i)))
            .collect();

        let first = pipeline.validate(&edit, &descriptors);
        let second = pipeline.validate(&edit, &descriptors);

        prop_assert_eq!(first.is_valid(), second.is_valid());
        match (first, second) {
            (ValidationReport::Fields(a), ValidationReport::Fields(b)) => {
                prop_assert_eq!(a.errors(), b.errors());
            }
            (ValidationReport::Fatal(a), ValidationReport::Fatal(b)) => {
                prop_assert_eq!(a, b);
            }
            _ => prop_assert!(false, "reports disagreed on failure kind"),
        }
    }
}

// ============================================================================
// Scheduler wiring
// ============================================================================

struct SharedContext {
    designated: AtomicBool,
    suspension: SuspensionGate,
}

impl RuntimeContext for SharedContext {
    fn state(&self) -> NodeRuntimeState {
        NodeRuntimeState {
            role: ServerRole::Primary,
            is_designated_node: self.designated.load(Ordering::SeqCst),
            level: RuntimeLevel::Run,
        }
    }

    fn is_suspended(&self) -> bool {
        self.suspension.is_suspended()
    }
}

struct CountingPublisher {
    calls: AtomicUsize,
}

#[async_trait]
impl ScheduledPublisher for CountingPublisher {
    async fn publish_due(
        &self,
        _as_of: DateTime<Utc>,
    ) -> Result<Vec<PublishResult>, PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![PublishResult {
            content_id: Uuid::new_v4(),
            status: PublishStatus::Success,
        }])
    }
}

#[tokio::test]
async fn runner_retires_publish_task_when_ownership_is_lost() {
    let context = Arc::new(SharedContext {
        designated: AtomicBool::new(true),
        suspension: SuspensionGate::new(),
    });
    let publisher = Arc::new(CountingPublisher {
        calls: AtomicUsize::new(0),
    });
    let task = Arc::new(ScheduledPublishTask::new(
        context.clone(),
        publisher.clone(),
    ));

    let runner = TaskRunner::new();
    let handle = runner.register(task, Duration::from_millis(1), Duration::from_millis(5));

    // Let a few publishing ticks land, then demote the node.
    tokio::time::sleep(Duration::from_millis(30)).await;
    context.designated.store(false, Ordering::SeqCst);

    // The loop must observe the demotion and retire on its own.
    handle.await.unwrap();
    assert!(publisher.calls.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn suspension_pauses_publishing_without_retiring_the_task() {
    let context = Arc::new(SharedContext {
        designated: AtomicBool::new(true),
        suspension: SuspensionGate::new(),
    });
    context.suspension.suspend();

    let publisher = Arc::new(CountingPublisher {
        calls: AtomicUsize::new(0),
    });
    let task = Arc::new(ScheduledPublishTask::new(
        context.clone(),
        publisher.clone(),
    ));

    let runner = TaskRunner::new();
    let handle = runner.register(task, Duration::from_millis(1), Duration::from_millis(5));

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);

    // Resume: the same instance picks publishing back up.
    context.suspension.resume();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(publisher.calls.load(Ordering::SeqCst) >= 1);

    runner.stop();
    handle.await.unwrap();
}
