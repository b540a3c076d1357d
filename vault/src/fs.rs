//! Filesystem-backed vault adapter.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use tessnote_core::{TessError, VaultNode, VaultPort};

/// A note vault rooted at a directory on disk.
///
/// Paths exchanged through [`VaultPort`] are vault-relative with `/`
/// separators; [`FsVault::full_path`] anchors them at the root.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl VaultPort for FsVault {
    async fn snapshot(&self) -> Result<VaultNode, TessError> {
        let children = walk_dir(self.root.clone(), String::new()).await?;
        Ok(VaultNode::Directory {
            name: String::new(),
            path: String::new(),
            children,
        })
    }

    async fn read(&self, path: &str) -> Result<String, TessError> {
        fs::read_to_string(self.full_path(path))
            .await
            .map_err(|source| TessError::Read {
                path: path.to_string(),
                source,
            })
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), TessError> {
        let target = self.full_path(path);
        let tmp = match target.file_name() {
            Some(name) => {
                let mut tmp_name = name.to_os_string();
                tmp_name.push(".tmp");
                target.with_file_name(tmp_name)
            }
            None => {
                return Err(TessError::Persist {
                    path: path.to_string(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
                })
            }
        };

        // Write the full content to a sibling temp file, then rename over
        // the target, so an interrupted write never corrupts the note.
        fs::write(&tmp, content)
            .await
            .map_err(|source| TessError::Persist {
                path: path.to_string(),
                source,
            })?;
        fs::rename(&tmp, &target)
            .await
            .map_err(|source| TessError::Persist {
                path: path.to_string(),
                source,
            })?;

        debug!(note = path, bytes = content.len(), "persisted note");
        Ok(())
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

/// Recursively list a directory into vault nodes.
///
/// Hidden directories (leading dot, e.g. `.obsidian`) are skipped; children
/// are sorted by name so enumeration order is stable across platforms.
fn walk_dir(
    abs: PathBuf,
    rel: String,
) -> Pin<Box<dyn Future<Output = Result<Vec<VaultNode>, TessError>> + Send>> {
    Box::pin(async move {
        let dir_label = if rel.is_empty() { ".".to_string() } else { rel.clone() };
        let read_err = |source| TessError::Read {
            path: dir_label.clone(),
            source,
        };

        let mut children = Vec::new();
        let mut entries = fs::read_dir(&abs).await.map_err(read_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(|source| TessError::Read {
            path: dir_label.clone(),
            source,
        })? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_rel = if rel.is_empty() {
                name.clone()
            } else {
                format!("{rel}/{name}")
            };
            let file_type = entry.file_type().await.map_err(|source| TessError::Read {
                path: child_rel.clone(),
                source,
            })?;

            if file_type.is_dir() {
                if name.starts_with('.') {
                    continue;
                }
                let sub = walk_dir(entry.path(), child_rel.clone()).await?;
                children.push(VaultNode::Directory {
                    name,
                    path: child_rel,
                    children: sub,
                });
            } else if file_type.is_file() {
                children.push(VaultNode::File {
                    name,
                    path: child_rel,
                });
            }
        }

        children.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(children)
    })
}
