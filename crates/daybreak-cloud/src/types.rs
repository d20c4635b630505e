use anyhow::Result;
use async_trait::async_trait;

use daybreak_common::{FilterTerm, InstanceRef, Severity};

/// Instance listing and control, as exposed by the cloud provider.
#[async_trait]
pub trait InstanceApi: Send + Sync {
    /// List instances matching every term of the conjunction filter.
    /// An empty result is a normal outcome, not an error.
    async fn list(&self, filters: &[FilterTerm]) -> Result<Vec<InstanceRef>>;

    /// Request a stopped→running transition for one instance. Fails with
    /// whatever the provider reports (invalid state, throttling, denial).
    async fn request_start(&self, id: &str) -> Result<()>;
}

/// Write-once sink for diagnostic log captures.
#[async_trait]
pub trait LogArchive: Send + Sync {
    async fn archive(&self, path: &str, content: &str) -> Result<()>;
}

/// Operator notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, severity: Severity, message: &str) -> Result<()>;
}
