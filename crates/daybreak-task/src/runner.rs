use tracing::info;

use daybreak_common::{BatchOutcome, TaskError};

use crate::context::TaskContext;
use crate::selector::select_due_instances;
use crate::starter::{start_instance, StartOutcome};

/// Drives one batch: select once, then attempt every match.
pub struct BatchRunner<'a> {
    ctx: &'a TaskContext,
}

impl<'a> BatchRunner<'a> {
    pub fn new(ctx: &'a TaskContext) -> Self {
        Self { ctx }
    }

    /// Attempts every selected instance even after failures — no
    /// short-circuit. A non-empty failure set becomes one aggregate
    /// `TaskError::Partial` after the loop; an empty selection is success.
    pub async fn run(&self) -> Result<(), TaskError> {
        let hour = self.ctx.clock.hour_tag();
        info!(%hour, "selecting instances scheduled for this hour");

        let instances = select_due_instances(self.ctx.api.as_ref(), &hour).await?;
        if instances.is_empty() {
            self.ctx.log.info("No instances to start.");
            return Ok(());
        }

        let mut outcome = BatchOutcome::new();
        for instance in &instances {
            match start_instance(self.ctx.api.as_ref(), &self.ctx.log, instance).await {
                StartOutcome::Started => outcome.record_success(&instance.id),
                StartOutcome::Failed => outcome.record_failure(&instance.id),
            }
        }

        info!(
            attempted = outcome.attempted.len(),
            failed = outcome.failed.len(),
            "batch complete"
        );

        if outcome.has_failures() {
            return Err(TaskError::Partial {
                failed: outcome.failed_in_order(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use daybreak_cloud::{MemoryInstanceApi, MemoryNotifier};
    use daybreak_common::{FixedClock, InstanceState, SessionLog};

    use super::*;
    use crate::selector::SCHEDULE_TAG;

    fn ctx_at_hour(api: MemoryInstanceApi, hour: u32) -> TaskContext {
        TaskContext {
            task_name: "scheduled-start".to_string(),
            api: Arc::new(api),
            archive: None,
            notifier: Arc::new(MemoryNotifier::new()),
            log: Arc::new(SessionLog::new()),
            clock: Arc::new(FixedClock::at(
                Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn empty_selection_returns_ok_and_logs() {
        let api = MemoryInstanceApi::new();
        let ctx = ctx_at_hour(api, 9);
        ctx.log.set_destination("run");

        BatchRunner::new(&ctx).run().await.unwrap();
        assert!(ctx.log.read_current().contains("No instances to start."));
    }

    #[tokio::test]
    async fn all_success_returns_ok() {
        let api = MemoryInstanceApi::new();
        api.add_instance("i-1", InstanceState::Stopped, &[(SCHEDULE_TAG, "14")])
            .await;
        api.add_instance("i-2", InstanceState::Stopped, &[(SCHEDULE_TAG, "14")])
            .await;
        let ctx = ctx_at_hour(api, 14);

        BatchRunner::new(&ctx).run().await.unwrap();
    }

    #[tokio::test]
    async fn every_instance_attempted_despite_failures() {
        let api = MemoryInstanceApi::new();
        for id in ["i-1", "i-2", "i-3"] {
            api.add_instance(id, InstanceState::Stopped, &[(SCHEDULE_TAG, "03")])
                .await;
        }
        api.fail_start("i-2").await;

        let api_handle = api.clone();
        let ctx = ctx_at_hour(api, 3);

        let err = BatchRunner::new(&ctx).run().await.unwrap_err();
        assert_eq!(
            api_handle.start_calls().await,
            vec!["i-1".to_string(), "i-2".to_string(), "i-3".to_string()]
        );
        match err {
            TaskError::Partial { failed } => assert_eq!(failed, vec!["i-2".to_string()]),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_failure_skips_the_loop() {
        let api = MemoryInstanceApi::new();
        api.fail_listing("transport down").await;

        let api_handle = api.clone();
        let ctx = ctx_at_hour(api, 14);

        let err = BatchRunner::new(&ctx).run().await.unwrap_err();
        assert!(matches!(err, TaskError::Listing(_)));
        assert!(api_handle.start_calls().await.is_empty());
    }
}
