use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File extensions (lowercase, without the dot) treated as OCR-able images.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

/// File extension identifying notes eligible for annotation.
pub const MARKDOWN_EXTENSION: &str = "md";

/// An image file discovered under the configured attachment root.
///
/// Built once per run and never mutated; matching only ever reads `name`,
/// the engine only ever reads `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    /// Base file name including extension, e.g. `scan.png`.
    pub name: String,
    /// Vault-relative path uniquely identifying the resource.
    pub path: String,
}

/// One embed reference awaiting annotation, paired with the image resource
/// its text resolved to.
///
/// A single reference may yield several of these when more than one
/// resource's file name occurs in its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// The exact substring matched in the note, e.g. `![[scan.png]]`.
    pub raw_text: String,
    /// The resource the reference resolved to.
    pub resource: ImageResource,
}

/// Aggregate counters for one annotation pass, reported once at the end.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Every file node visited during the snapshot traversal.
    pub files_scanned: u64,
    /// Files whose name carries the markdown extension.
    pub notes_checked: u64,
    /// Annotation blocks spliced in, including empty failure blocks.
    pub annotations_inserted: u64,
    /// Engine invocations classified as failures.
    pub ocr_failures: u64,
}

impl RunSummary {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            finished_at: None,
            files_scanned: 0,
            notes_checked: 0,
            annotations_inserted: 0,
            ocr_failures: 0,
        }
    }
}

/// A node in the vault tree: a directory with children, or a file.
///
/// Paths are vault-relative with `/` separators; the root directory has an
/// empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultNode {
    Directory {
        name: String,
        path: String,
        children: Vec<VaultNode>,
    },
    File {
        name: String,
        path: String,
    },
}

impl VaultNode {
    pub fn name(&self) -> &str {
        match self {
            VaultNode::Directory { name, .. } | VaultNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            VaultNode::Directory { path, .. } | VaultNode::File { path, .. } => path,
        }
    }

    /// Visit every node depth-first, parents before children.
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a VaultNode)) {
        f(self);
        if let VaultNode::Directory { children, .. } = self {
            for child in children {
                child.visit(f);
            }
        }
    }

    /// Collect every file node in traversal order as `(name, path)` pairs.
    pub fn files(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if let VaultNode::File { name, path } = node {
                out.push((name.as_str(), path.as_str()));
            }
        });
        out
    }
}

/// Extension of a file name: the segment after the last dot, lowercased.
fn extension(name: &str) -> Option<String> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}

/// Whether a file name carries a recognized image extension.
pub fn is_image_name(name: &str) -> bool {
    extension(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether a file name carries the markdown extension.
pub fn is_markdown_name(name: &str) -> bool {
    extension(name).is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_name_classification() {
        assert!(is_image_name("scan.png"));
        assert!(is_image_name("photo.JPG"));
        assert!(is_image_name("archive.2024.jpeg"));
        assert!(!is_image_name("notes.md"));
        assert!(!is_image_name("png"));
        assert!(!is_image_name(".png"));
    }

    #[test]
    fn test_markdown_name_classification() {
        assert!(is_markdown_name("daily.md"));
        assert!(is_markdown_name("Daily.MD"));
        assert!(!is_markdown_name("daily.markdown"));
        assert!(!is_markdown_name("md"));
    }

    #[test]
    fn test_visit_order_is_depth_first() {
        let tree = VaultNode::Directory {
            name: String::new(),
            path: String::new(),
            children: vec![
                VaultNode::Directory {
                    name: "Meta".into(),
                    path: "Meta".into(),
                    children: vec![VaultNode::File {
                        name: "a.png".into(),
                        path: "Meta/a.png".into(),
                    }],
                },
                VaultNode::File {
                    name: "note.md".into(),
                    path: "note.md".into(),
                },
            ],
        };
        let files = tree.files();
        assert_eq!(
            files,
            vec![("a.png", "Meta/a.png"), ("note.md", "note.md")]
        );
    }

    #[test]
    fn test_image_resource_serialization() {
        let res = ImageResource {
            name: "scan.png".into(),
            path: "Meta/Attachments/scan.png".into(),
        };
        let json = serde_json::to_string(&res).unwrap();
        let back: ImageResource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, res);
    }

    #[test]
    fn test_summary_starts_zeroed() {
        let summary = RunSummary::new(Uuid::new_v4());
        assert_eq!(summary.annotations_inserted, 0);
        assert_eq!(summary.ocr_failures, 0);
        assert!(summary.finished_at.is_none());
    }
}
