// Node runtime snapshots consulted by gated scheduled work
//
// The hosting runtime owns role election, boot progression, and the
// suspension flag; this module only defines the read-only view handed to
// each tick. Nothing here is cached across ticks.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// A node's position in the deployment topology, independent of whether it
/// owns node-exclusive scheduled work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerRole {
    Primary,
    Replica,
    Unknown,
}

/// Coarse lifecycle stage of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeLevel {
    Booting,
    Installing,
    Upgrading,
    Run,
}

/// Snapshot of the node's runtime state, taken fresh for every gating
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRuntimeState {
    pub role: ServerRole,
    /// Whether this process currently owns node-exclusive scheduled work.
    pub is_designated_node: bool,
    pub level: RuntimeLevel,
}

/// Read-only view of the hosting runtime, injected into each tick.
pub trait RuntimeContext: Send + Sync {
    /// Current runtime state. Implementations must return a live snapshot,
    /// not a value captured at registration time.
    fn state(&self) -> NodeRuntimeState;

    /// Whether scheduled work is administratively suspended. Consulted
    /// before any role or readiness checks.
    fn is_suspended(&self) -> bool;
}

/// Process-wide suspension toggle for hosts without their own flag plumbing.
///
/// The hosting runtime flips it around maintenance windows; tasks only read
/// it through [`RuntimeContext::is_suspended`].
#[derive(Debug, Default)]
pub struct SuspensionGate {
    suspended: AtomicBool,
}

impl SuspensionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suspend(&self) {
        self.suspended.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.suspended.store(false, Ordering::SeqCst);
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }
}
