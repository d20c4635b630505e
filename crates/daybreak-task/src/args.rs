use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Base URL of the provider's instance API.
    #[arg(long, env = "DAYBREAK_PROVIDER_ENDPOINT")]
    pub provider_endpoint: String,

    /// Bearer token for the provider API.
    #[arg(long, env = "DAYBREAK_PROVIDER_TOKEN")]
    pub provider_token: Option<String>,

    /// Webhook URL for operator notifications.
    #[arg(long, env = "DAYBREAK_NOTIFY_URL")]
    pub notify_url: String,

    /// Directory session logs are archived under on failure.
    /// Archival falls back to a plain notification when unset.
    #[arg(long, env = "DAYBREAK_ARCHIVE_ROOT")]
    pub archive_root: Option<PathBuf>,

    #[arg(long, default_value = "scheduled-start")]
    pub task_name: String,

    /// OTLP endpoint for span export (e.g. "http://127.0.0.1:4318").
    #[arg(long, env = "DAYBREAK_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Bearer token for OTLP export.
    #[arg(long, env = "DAYBREAK_OTLP_TOKEN")]
    pub otlp_token: Option<String>,
}
