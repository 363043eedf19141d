// Gated recurring scheduled work

pub mod publish_task;
pub mod runner;

pub use publish_task::{GateDecision, ScheduledPublishTask, ScheduledPublisher, SkipReason};
pub use runner::{RecurringTask, TaskRunner};
