use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::types::LogArchive;

/// Log archive rooted at a local directory. Archive paths are relative keys
/// like `scheduled-start/scheduled-start-1714534500000.log`.
#[derive(Debug, Clone)]
pub struct FsLogArchive {
    root: PathBuf,
}

impl FsLogArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LogArchive for FsLogArchive {
    async fn archive(&self, path: &str, content: &str) -> Result<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&full, content)
            .await
            .with_context(|| format!("failed to write {}", full.display()))?;

        tracing::info!(path = %full.display(), "archived session log");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_under_root_creating_parents() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FsLogArchive::new(dir.path());

        archive
            .archive("task/task-123.log", "INFO hello\n")
            .await
            .unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("task/task-123.log"))
            .await
            .unwrap();
        assert_eq!(written, "INFO hello\n");
    }
}
