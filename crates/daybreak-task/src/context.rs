use std::sync::Arc;

use daybreak_cloud::{InstanceApi, LogArchive, Notifier};
use daybreak_common::{Clock, SessionLog};

/// Everything one invocation needs, constructed once in `main` and passed
/// down by reference. No global or lazily-built collaborators.
pub struct TaskContext {
    pub task_name: String,
    pub api: Arc<dyn InstanceApi>,
    /// Absent when no archive sink is configured; escalation then falls
    /// back to referencing the log destination in the notification.
    pub archive: Option<Arc<dyn LogArchive>>,
    pub notifier: Arc<dyn Notifier>,
    pub log: Arc<SessionLog>,
    pub clock: Arc<dyn Clock>,
}
