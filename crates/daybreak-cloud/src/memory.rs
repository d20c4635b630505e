use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use daybreak_common::{FilterTerm, InstanceRef, InstanceState, Severity};

use crate::types::{InstanceApi, LogArchive, Notifier};

/// In-process instance API for tests. Evaluates conjunction filters over a
/// fixed fleet and arbitrates start requests the way a provider would:
/// only stopped instances may transition to running.
#[derive(Debug, Clone, Default)]
pub struct MemoryInstanceApi {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    instances: Vec<MemoryInstance>,
    start_calls: Vec<String>,
    fail_start: HashSet<String>,
    listing_error: Option<String>,
}

#[derive(Debug, Clone)]
struct MemoryInstance {
    id: String,
    state: InstanceState,
    tags: HashMap<String, String>,
}

impl MemoryInstanceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_instance(&self, id: &str, state: InstanceState, tags: &[(&str, &str)]) {
        let mut inner = self.inner.write().await;
        inner.instances.push(MemoryInstance {
            id: id.to_string(),
            state,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }

    /// Make every subsequent `list` call fail with `msg`.
    pub async fn fail_listing(&self, msg: &str) {
        self.inner.write().await.listing_error = Some(msg.to_string());
    }

    /// Make `request_start` fail for this instance.
    pub async fn fail_start(&self, id: &str) {
        self.inner.write().await.fail_start.insert(id.to_string());
    }

    /// Every id `request_start` was called with, in call order.
    pub async fn start_calls(&self) -> Vec<String> {
        self.inner.read().await.start_calls.clone()
    }

    pub async fn state_of(&self, id: &str) -> Option<InstanceState> {
        let inner = self.inner.read().await;
        inner
            .instances
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.state)
    }
}

fn matches(instance: &MemoryInstance, term: &FilterTerm) -> bool {
    if term.field == "instance-state-name" {
        return term.values.iter().any(|v| v == instance.state.as_str());
    }
    if let Some(key) = term.field.strip_prefix("tag:") {
        return instance
            .tags
            .get(key)
            .is_some_and(|v| term.values.contains(v));
    }
    false
}

#[async_trait]
impl InstanceApi for MemoryInstanceApi {
    async fn list(&self, filters: &[FilterTerm]) -> Result<Vec<InstanceRef>> {
        let inner = self.inner.read().await;
        if let Some(msg) = &inner.listing_error {
            bail!("{msg}");
        }

        Ok(inner
            .instances
            .iter()
            .filter(|i| filters.iter().all(|t| matches(i, t)))
            .map(|i| InstanceRef::new(&i.id, i.state))
            .collect())
    }

    async fn request_start(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.start_calls.push(id.to_string());

        if inner.fail_start.contains(id) {
            bail!("provider refused to start {id}");
        }

        let Some(instance) = inner.instances.iter_mut().find(|i| i.id == id) else {
            bail!("no such instance: {id}");
        };
        if instance.state != InstanceState::Stopped {
            bail!(
                "invalid state transition for {id}: {} -> running",
                instance.state
            );
        }
        instance.state = InstanceState::Running;
        Ok(())
    }
}

/// Archive sink recording entries in memory, optionally failing.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogArchive {
    inner: Arc<RwLock<ArchiveInner>>,
}

#[derive(Debug, Default)]
struct ArchiveInner {
    entries: Vec<(String, String)>,
    failing: bool,
}

impl MemoryLogArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_failing(&self, failing: bool) {
        self.inner.write().await.failing = failing;
    }

    pub async fn entries(&self) -> Vec<(String, String)> {
        self.inner.read().await.entries.clone()
    }
}

#[async_trait]
impl LogArchive for MemoryLogArchive {
    async fn archive(&self, path: &str, content: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.failing {
            bail!("archive sink unavailable");
        }
        inner.entries.push((path.to_string(), content.to_string()));
        Ok(())
    }
}

/// Notification channel recording every message in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<RwLock<Vec<(Severity, String)>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(Severity, String)> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify(&self, severity: Severity, message: &str) -> Result<()> {
        self.sent.write().await.push((severity, message.to_string()));
        Ok(())
    }
}
