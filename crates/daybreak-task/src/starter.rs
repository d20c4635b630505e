use daybreak_cloud::InstanceApi;
use daybreak_common::{InstanceRef, SessionLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    Failed,
}

/// Attempt one stopped→running transition. Provider-level failure is caught
/// here, logged with the instance id, and returned as an outcome value —
/// the batch loop must see it, never a propagated error. Whatever the
/// provider reports (including rejecting an already-running instance) is
/// surfaced as-is.
pub async fn start_instance(
    api: &dyn InstanceApi,
    log: &SessionLog,
    instance: &InstanceRef,
) -> StartOutcome {
    log.info(&format!("Starting instance {}", instance.id));

    match api.request_start(&instance.id).await {
        Ok(()) => StartOutcome::Started,
        Err(err) => {
            log.error(
                &format!("Failed to start instance {}: {err:#}", instance.id),
                true,
            );
            StartOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybreak_cloud::MemoryInstanceApi;
    use daybreak_common::InstanceState;

    #[tokio::test]
    async fn success_reports_started() {
        let api = MemoryInstanceApi::new();
        api.add_instance("i-1", InstanceState::Stopped, &[]).await;
        let log = SessionLog::new();

        let outcome =
            start_instance(&api, &log, &InstanceRef::new("i-1", InstanceState::Stopped)).await;
        assert_eq!(outcome, StartOutcome::Started);
        assert_eq!(api.state_of("i-1").await, Some(InstanceState::Running));
        assert!(log.read_current().contains("Starting instance i-1"));
    }

    #[tokio::test]
    async fn provider_failure_becomes_outcome_not_error() {
        let api = MemoryInstanceApi::new();
        api.add_instance("i-1", InstanceState::Stopped, &[]).await;
        api.fail_start("i-1").await;
        let log = SessionLog::new();

        let outcome =
            start_instance(&api, &log, &InstanceRef::new("i-1", InstanceState::Stopped)).await;
        assert_eq!(outcome, StartOutcome::Failed);
        assert!(log.read_current().contains("Failed to start instance i-1"));
    }

    #[tokio::test]
    async fn already_running_is_not_masked() {
        let api = MemoryInstanceApi::new();
        api.add_instance("i-1", InstanceState::Running, &[]).await;
        let log = SessionLog::new();

        let outcome =
            start_instance(&api, &log, &InstanceRef::new("i-1", InstanceState::Running)).await;
        assert_eq!(outcome, StartOutcome::Failed);
        assert!(log.read_current().contains("invalid state transition"));
    }
}
