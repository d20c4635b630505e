mod args;
mod context;
mod escalate;
mod runner;
mod selector;
mod starter;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use daybreak_cloud::{FsLogArchive, HttpInstanceApi, LogArchive, WebhookNotifier};
use daybreak_common::{telemetry, SessionLog, SystemClock};

use crate::args::Args;
use crate::context::TaskContext;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let tracer = telemetry::init_tracing(
        &args.task_name,
        args.otlp_endpoint.as_deref(),
        args.otlp_token.as_deref(),
    );

    info!(task = %args.task_name, "daybreak-task starting...");

    let ctx = TaskContext {
        task_name: args.task_name.clone(),
        api: Arc::new(HttpInstanceApi::new(
            &args.provider_endpoint,
            args.provider_token.clone(),
        )),
        archive: args
            .archive_root
            .as_ref()
            .map(|root| Arc::new(FsLogArchive::new(root)) as Arc<dyn LogArchive>),
        notifier: Arc::new(WebhookNotifier::new(&args.notify_url)),
        log: Arc::new(SessionLog::new()),
        clock: Arc::new(SystemClock),
    };

    let result = escalate::run_invocation(&ctx).await;

    if let Some(tracer) = tracer {
        let _ = tracer.shutdown();
    }

    // A failed invocation exits non-zero so the host runtime records it.
    result?;
    Ok(())
}
