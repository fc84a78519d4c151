//! Client assertion sources.
//!
//! The projected service account token is rotated on disk by the kubelet,
//! so the credential asks its source for the current assertion on every
//! exchange instead of holding one captured at construction.

use crate::error::{IdentityError, IdentityResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces the assertion to present to the identity provider.
#[async_trait]
pub trait AssertionSource: Send + Sync {
    /// Return the current assertion.
    async fn assertion(&self) -> IdentityResult<String>;
}

/// Reads the federated token file in full on every call.
#[derive(Debug, Clone)]
pub struct FileAssertion {
    path: PathBuf,
}

impl FileAssertion {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AssertionSource for FileAssertion {
    async fn assertion(&self) -> IdentityResult<String> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| IdentityError::FederatedTokenRead {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), len = raw.len(), "Read federated token");
        Ok(raw.trim().to_string())
    }
}
