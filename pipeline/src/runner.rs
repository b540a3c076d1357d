//! Drives one end-to-end annotation pass over the vault.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use tessnote_config::TessnoteConfig;
use tessnote_core::{
    is_image_name, is_markdown_name, ImageResource, OcrEngine, RunSummary, TessError, VaultPort,
};

use crate::matcher::find_unannotated;
use crate::rewriter::apply_annotations;

/// The run orchestrator: enumerates image resources once, then walks the
/// notes, matching, rewriting, and persisting one note at a time.
///
/// Both collaborators arrive injected; the runner holds no global state and
/// nothing here runs concurrently — offsets within a note only stay correct
/// when its matches are annotated strictly in order, and one note at a time
/// keeps the engine and the disk from being hit by parallel writes.
pub struct Runner {
    vault: Arc<dyn VaultPort>,
    engine: Arc<dyn OcrEngine>,
    config: TessnoteConfig,
}

impl Runner {
    pub fn new(
        vault: Arc<dyn VaultPort>,
        engine: Arc<dyn OcrEngine>,
        config: TessnoteConfig,
    ) -> Self {
        Self {
            vault,
            engine,
            config,
        }
    }

    /// Run one annotation pass and return the aggregate counters.
    ///
    /// A note that fails to read or persist is logged and skipped; the pass
    /// itself only fails when the vault cannot be snapshotted at all.
    pub async fn run(&self) -> Result<RunSummary, TessError> {
        let run_id = Uuid::new_v4();
        let mut summary = RunSummary::new(run_id);
        info!(
            run_id = %run_id,
            image_root = %self.config.image_path,
            "starting annotation pass"
        );

        let tree = self.vault.snapshot().await?;
        let files = tree.files();
        summary.files_scanned = files.len() as u64;

        let resources: Vec<ImageResource> = files
            .iter()
            .filter(|(name, path)| {
                path.contains(&self.config.image_path) && is_image_name(name)
            })
            .map(|(name, path)| ImageResource {
                name: (*name).to_string(),
                path: (*path).to_string(),
            })
            .collect();
        info!(run_id = %run_id, images = resources.len(), "image resources enumerated");

        for (name, path) in files {
            if !is_markdown_name(name) {
                continue;
            }
            summary.notes_checked += 1;

            let content = match self.vault.read(path).await {
                Ok(content) => content,
                Err(err) => {
                    error!(run_id = %run_id, note = path, error = %err, "failed to read note; skipping");
                    continue;
                }
            };

            let matches = find_unannotated(&content, &resources);
            if matches.is_empty() {
                continue;
            }
            info!(run_id = %run_id, note = path, references = matches.len(), "annotating note");

            let rewritten = apply_annotations(
                &content,
                &matches,
                self.vault.as_ref(),
                self.engine.as_ref(),
                &mut summary,
            )
            .await;

            if rewritten != content {
                if let Err(err) = self.vault.write(path, &rewritten).await {
                    error!(run_id = %run_id, note = path, error = %err, "failed to persist note");
                }
            }
        }

        summary.finished_at = Some(Utc::now());
        info!(
            run_id = %run_id,
            notes = summary.notes_checked,
            inserted = summary.annotations_inserted,
            failures = summary.ocr_failures,
            "annotation pass finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use async_trait::async_trait;

    use tessnote_core::EngineError;
    use tessnote_vault::MemoryVault;

    struct StubEngine;

    #[async_trait]
    impl OcrEngine for StubEngine {
        async fn recognize(&self, image: &Path) -> Result<String, EngineError> {
            match image.file_name().and_then(|n| n.to_str()) {
                Some("broken.png") => Err(EngineError::Diagnostics("read error".into())),
                Some(name) => Ok(format!("text of {name}\n")),
                None => Err(EngineError::Diagnostics("no file name".into())),
            }
        }
    }

    fn runner(vault: Arc<MemoryVault>) -> Runner {
        Runner::new(vault, Arc::new(StubEngine), TessnoteConfig::default())
    }

    #[tokio::test]
    async fn annotates_and_persists_matching_notes() {
        let vault = Arc::new(MemoryVault::with_files([
            ("Meta/Attachments/scan.png", ""),
            ("daily.md", "morning ![[scan.png]] evening"),
            ("todo.txt", "![[scan.png]] not a note"),
        ]));

        let summary = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(summary.files_scanned, 3);
        assert_eq!(summary.notes_checked, 1);
        assert_eq!(summary.annotations_inserted, 1);
        assert_eq!(summary.ocr_failures, 0);
        assert!(summary.finished_at.is_some());

        assert_eq!(
            vault.content_of("daily.md").await.unwrap(),
            "morning ![[scan.png]]<details>text of scan.png</details>\n evening"
        );
        // Non-markdown files are never rewritten.
        assert_eq!(
            vault.content_of("todo.txt").await.unwrap(),
            "![[scan.png]] not a note"
        );
    }

    #[tokio::test]
    async fn second_pass_inserts_nothing() {
        let vault = Arc::new(MemoryVault::with_files([
            ("Meta/Attachments/a.png", ""),
            ("Meta/Attachments/b.png", ""),
            ("note.md", "![[a.png]] and ![[b.png]]"),
        ]));

        let first = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(first.annotations_inserted, 2);
        let after_first = vault.content_of("note.md").await.unwrap();

        let second = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(second.annotations_inserted, 0);
        assert_eq!(vault.content_of("note.md").await.unwrap(), after_first);
    }

    #[tokio::test]
    async fn engine_failure_marks_reference_handled() {
        let vault = Arc::new(MemoryVault::with_files([
            ("Meta/Attachments/broken.png", ""),
            ("note.md", "![[broken.png]]"),
        ]));

        let summary = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(summary.ocr_failures, 1);
        assert_eq!(
            vault.content_of("note.md").await.unwrap(),
            "![[broken.png]]<details></details>\n"
        );

        // The empty block still counts as handled: no retry next pass.
        let second = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(second.annotations_inserted, 0);
        assert_eq!(second.ocr_failures, 0);
    }

    #[tokio::test]
    async fn images_outside_configured_root_are_not_resources() {
        let vault = Arc::new(MemoryVault::with_files([
            ("Elsewhere/scan.png", ""),
            ("note.md", "![[scan.png]]"),
        ]));

        let summary = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(summary.annotations_inserted, 0);
        assert_eq!(
            vault.content_of("note.md").await.unwrap(),
            "![[scan.png]]"
        );
    }

    #[tokio::test]
    async fn unmatched_notes_are_left_untouched() {
        let vault = Arc::new(MemoryVault::with_files([
            ("Meta/Attachments/scan.png", ""),
            ("plain.md", "no references here"),
        ]));

        let summary = runner(Arc::clone(&vault)).run().await.unwrap();
        assert_eq!(summary.notes_checked, 1);
        assert_eq!(summary.annotations_inserted, 0);
        assert_eq!(
            vault.content_of("plain.md").await.unwrap(),
            "no references here"
        );
    }
}
