//! In-memory vault, used in tests.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tessnote_core::{TessError, VaultNode, VaultPort};

/// A vault backed by a path → content map.
///
/// The tree reported by `snapshot` is derived from the stored paths, so a
/// test only has to insert files to shape the vault.
pub struct MemoryVault {
    root: PathBuf,
    files: Mutex<HashMap<String, String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/vault"),
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let map: HashMap<String, String> = files
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        Self {
            root: PathBuf::from("/vault"),
            files: Mutex::new(map),
        }
    }

    pub async fn insert(&self, path: impl Into<String>, content: impl Into<String>) {
        self.files.lock().await.insert(path.into(), content.into());
    }

    pub async fn content_of(&self, path: &str) -> Option<String> {
        self.files.lock().await.get(path).cloned()
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VaultPort for MemoryVault {
    async fn snapshot(&self) -> Result<VaultNode, TessError> {
        let files = self.files.lock().await;
        let paths: Vec<&str> = files.keys().map(String::as_str).collect();
        Ok(VaultNode::Directory {
            name: String::new(),
            path: String::new(),
            children: build_children(&paths, ""),
        })
    }

    async fn read(&self, path: &str) -> Result<String, TessError> {
        self.files
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| TessError::Read {
                path: path.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            })
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), TessError> {
        self.files
            .lock()
            .await
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

/// Group relative paths into a sorted directory/file tree under `prefix`.
fn build_children(paths: &[&str], prefix: &str) -> Vec<VaultNode> {
    let mut dirs: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let mut file_names: Vec<String> = Vec::new();
    for path in paths {
        match path.split_once('/') {
            Some((head, rest)) => dirs.entry(head.to_string()).or_default().push(rest),
            None => file_names.push(path.to_string()),
        }
    }

    let mut children = Vec::new();
    for (name, rest) in dirs {
        let child_prefix = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let sub = build_children(&rest, &child_prefix);
        children.push(VaultNode::Directory {
            name,
            path: child_prefix,
            children: sub,
        });
    }
    for name in file_names {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        children.push(VaultNode::File { name, path });
    }

    children.sort_by(|a, b| a.name().cmp(b.name()));
    children
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_derives_tree_from_paths() {
        let vault = MemoryVault::with_files([
            ("Meta/Attachments/scan.png", ""),
            ("Daily/today.md", "x"),
            ("inbox.md", "y"),
        ]);
        let tree = vault.snapshot().await.unwrap();
        let files = tree.files();
        assert_eq!(
            files,
            vec![
                ("today.md", "Daily/today.md"),
                ("scan.png", "Meta/Attachments/scan.png"),
                ("inbox.md", "inbox.md"),
            ]
        );
    }

    #[tokio::test]
    async fn read_write_roundtrip() {
        let vault = MemoryVault::new();
        vault.write("note.md", "content").await.unwrap();
        assert_eq!(vault.read("note.md").await.unwrap(), "content");
        assert!(vault.read("other.md").await.is_err());
    }
}
