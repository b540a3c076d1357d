use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{EngineError, TessError};
use crate::types::VaultNode;

/// Filesystem-facing port over the note vault.
///
/// The orchestrator receives this as an injected dependency; nothing in the
/// pipeline touches the filesystem directly.
#[async_trait]
pub trait VaultPort: Send + Sync {
    /// Snapshot the vault as a tree of directories and files.
    async fn snapshot(&self) -> Result<VaultNode, TessError>;

    /// Read the full text content of a note.
    async fn read(&self, path: &str) -> Result<String, TessError>;

    /// Replace the full text content of a note. A failed write must leave
    /// the previous content intact.
    async fn write(&self, path: &str, content: &str) -> Result<(), TessError>;

    /// Resolve a vault-relative path to an absolute filesystem path.
    fn full_path(&self, path: &str) -> PathBuf;
}

/// Port over the external OCR engine.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in the image at `image`.
    ///
    /// Success carries the engine's standard output verbatim; sanitizing it
    /// for embedding is the caller's concern. A single attempt, no retry.
    async fn recognize(&self, image: &Path) -> Result<String, EngineError>;
}
