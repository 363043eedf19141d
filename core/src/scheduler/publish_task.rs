// Scheduled content publishing, gated on node role and readiness
//
// The gate is recomputed from a live runtime snapshot on every tick; no
// decision survives a tick. Only loss of designated-node status retires the
// task instance -- role, suspension, and boot level fluctuate during normal
// cluster operation and keep the task scheduled.

use crate::errors::PublishError;
use crate::models::{PublishResult, PublishStatus};
use crate::runtime::{NodeRuntimeState, RuntimeContext, RuntimeLevel, ServerRole};
use crate::scheduler::runner::RecurringTask;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// The external publish operation. Safe to call when nothing is due.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduledPublisher: Send + Sync {
    /// Publish everything due as of `as_of`, reporting one classification
    /// per touched entity.
    async fn publish_due(&self, as_of: DateTime<Utc>)
        -> Result<Vec<PublishResult>, PublishError>;
}

/// Why a tick declined to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Suspended,
    PassiveRole,
    NotDesignatedNode,
    NotRunning,
}

/// Tri-state gating outcome for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    SkipAndRepeat(SkipReason),
    SkipAndStop(SkipReason),
}

/// Recurring task that runs scheduled publishing on the designated node.
/// Created once at process start and polled until it retires or the process
/// shuts down.
pub struct ScheduledPublishTask {
    context: Arc<dyn RuntimeContext>,
    publisher: Arc<dyn ScheduledPublisher>,
}

impl ScheduledPublishTask {
    pub fn new(context: Arc<dyn RuntimeContext>, publisher: Arc<dyn ScheduledPublisher>) -> Self {
        Self { context, publisher }
    }

    /// Evaluate the ordered guards over a fresh snapshot. First applicable
    /// wins.
    pub fn evaluate_gate(state: NodeRuntimeState, suspended: bool) -> GateDecision {
        if suspended {
            return GateDecision::SkipAndRepeat(SkipReason::Suspended);
        }

        match state.role {
            ServerRole::Replica | ServerRole::Unknown => {
                return GateDecision::SkipAndRepeat(SkipReason::PassiveRole);
            }
            ServerRole::Primary => {}
        }

        if !state.is_designated_node {
            // Structural demotion: this instance yields scheduled work for
            // good. A fresh instance is registered if ownership returns.
            return GateDecision::SkipAndStop(SkipReason::NotDesignatedNode);
        }

        if state.level != RuntimeLevel::Run {
            return GateDecision::SkipAndRepeat(SkipReason::NotRunning);
        }

        GateDecision::Proceed
    }

    async fn run_publish(&self, now: DateTime<Utc>) {
        match self.publisher.publish_due(now).await {
            Ok(results) => {
                if results.is_empty() {
                    debug!("No content due for scheduled publishing");
                    return;
                }

                let mut by_status: HashMap<PublishStatus, usize> = HashMap::new();
                for result in &results {
                    *by_status.entry(result.status).or_insert(0) += 1;
                }

                for (status, count) in by_status {
                    info!(
                        status = %status,
                        count,
                        "Scheduled publishing result"
                    );
                    counter!(
                        "scheduled_publish_results_total",
                        "status" => status.to_string()
                    )
                    .increment(count as u64);
                }
            }
            Err(e) => {
                // Faults stay inside the tick boundary; the task keeps its
                // schedule.
                error!(error = %e, "Failed to perform scheduled publishing");
            }
        }
    }
}

#[async_trait]
impl RecurringTask for ScheduledPublishTask {
    fn name(&self) -> &str {
        "scheduled-publishing"
    }

    #[instrument(skip(self), fields(task = %self.name()))]
    async fn tick(&self, now: DateTime<Utc>) -> bool {
        let state = self.context.state();
        let suspended = self.context.is_suspended();

        match Self::evaluate_gate(state, suspended) {
            GateDecision::SkipAndRepeat(reason) => {
                debug!(?reason, "Skipping scheduled publishing this tick");
                true
            }
            GateDecision::SkipAndStop(reason) => {
                info!(
                    ?reason,
                    "Node no longer owns scheduled work, unscheduling publishing task"
                );
                false
            }
            GateDecision::Proceed => {
                self.run_publish(now).await;
                true
            }
        }
    }
}
