//! Template store reading named files from a configured directory.

use std::path::PathBuf;

use async_trait::async_trait;
use quorum_core::ports::TemplateStore;
use quorum_domain::{QuorumError, Result};

pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn read(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        tokio::fs::read_to_string(&path).await.map_err(|err| match err.kind() {
            // A missing file means the group is not configured; a file
            // that exists but cannot be read as text is a broken template.
            std::io::ErrorKind::NotFound => {
                QuorumError::Config(format!("template file not found: {}", path.display()))
            }
            _ => QuorumError::Template(format!("failed to read {}: {err}", path.display())),
        })
    }

    async fn read_optional(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(QuorumError::Template(format!("failed to read {}: {err}", path.display())))
            }
        }
    }
}
