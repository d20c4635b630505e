use tracing::error;

use daybreak_common::{SessionLog, Severity, TaskError, IDLE_DESTINATION};

use crate::context::TaskContext;
use crate::runner::BatchRunner;

/// Retargets the session log for one invocation and parks it back at the
/// idle destination on drop, whatever path the invocation took.
struct DestinationGuard<'a> {
    log: &'a SessionLog,
}

impl<'a> DestinationGuard<'a> {
    fn activate(log: &'a SessionLog, name: &str) -> Self {
        log.set_destination(name);
        Self { log }
    }
}

impl Drop for DestinationGuard<'_> {
    fn drop(&mut self) {
        self.log.set_destination(IDLE_DESTINATION);
    }
}

/// Invocation entry point: run the batch, escalate any failure.
///
/// The log identifier is derived from the invocation start time in epoch
/// milliseconds and keys both the session log and the archive path, so an
/// alert can be correlated to its log artifact.
pub async fn run_invocation(ctx: &TaskContext) -> Result<(), TaskError> {
    let started_ms = ctx.clock.epoch_ms();
    let log_id = format!("{}-{}", ctx.task_name, started_ms);
    let _guard = DestinationGuard::activate(&ctx.log, &log_id);

    match BatchRunner::new(ctx).run().await {
        Ok(()) => Ok(()),
        Err(err) => Err(escalate(ctx, &log_id, err).await),
    }
}

/// Diagnostic capture plus notification, then the original error again.
/// Archival failure replaces it as the terminal error; every failure class
/// (partial or total) gets the same treatment.
async fn escalate(ctx: &TaskContext, log_id: &str, err: TaskError) -> TaskError {
    error!(kind = err.kind(), "escalating failed invocation");
    ctx.log
        .error(&format!("Fatal error during task run: {err}"), true);

    let reference = match &ctx.archive {
        Some(archive) => {
            let content = ctx.log.read_current();
            let path = format!("{}/{}.log", ctx.task_name, log_id);
            if let Err(archive_err) = archive.archive(&path, &content).await {
                return TaskError::Archival(archive_err);
            }
            format!("archived log {path}")
        }
        None => format!("log destination {log_id}"),
    };

    let message = format!(
        "{} task error notification; reference {reference}",
        ctx.task_name
    );
    if let Err(notify_err) = ctx.notifier.notify(Severity::Error, &message).await {
        return TaskError::Other(notify_err.context("notification delivery failed"));
    }

    err
}
