//! Local filesystem document storage
//!
//! Stores supporting documents under a base directory. The storage key is
//! used as a relative path and returned as the document reference.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_claims::DocumentStorage;

/// Document storage rooted at a local directory
#[derive(Debug, Clone)]
pub struct LocalDocumentStorage {
    base_path: PathBuf,
}

impl LocalDocumentStorage {
    /// Creates the storage, creating `base_path` if it does not exist
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, PortError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| PortError::Connection {
            message: format!("cannot create upload directory {}", base_path.display()),
            source: Some(Box::new(e)),
        })?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a reference to a path below the base directory
    fn resolve(&self, reference: &str) -> Result<PathBuf, PortError> {
        let relative = Path::new(reference);
        let is_contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if reference.is_empty() || !is_contained {
            return Err(PortError::Validation {
                message: format!("invalid document reference '{}'", reference),
                field: Some("document_ref".to_string()),
            });
        }
        Ok(self.base_path.join(relative))
    }
}

impl DomainPort for LocalDocumentStorage {}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    async fn store(&self, key: &str, content: &[u8]) -> Result<String, PortError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::internal_with_source("cannot create document directory", e))?;
        }
        fs::write(&path, content)
            .await
            .map_err(|e| PortError::internal_with_source("cannot write document", e))?;

        debug!(path = %path.display(), "Stored document");
        Ok(key.to_string())
    }

    #[instrument(skip(self))]
    async fn remove(&self, reference: &str) -> Result<(), PortError> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::internal_with_source("cannot remove document", e)),
        }
    }
}
