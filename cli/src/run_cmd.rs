//! `tessnote run` — one annotation pass over the vault.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use tessnote_config::{config_dir, config_file_path, load_config};
use tessnote_ocr::TesseractEngine;
use tessnote_pipeline::Runner;
use tessnote_vault::FsVault;

use crate::notice;

pub async fn run(vault_root: PathBuf) -> Result<()> {
    let config = load_config(&config_file_path(&config_dir())).await?;

    let vault = Arc::new(FsVault::new(vault_root));
    let engine = Arc::new(TesseractEngine::new(&config));
    let runner = Runner::new(vault, engine, config);

    notice::info("Running tesseract on all images…");
    let summary = runner.run().await?;

    notice::info(&format!(
        "Checked {} notes, inserted {} annotations.",
        summary.notes_checked, summary.annotations_inserted
    ));
    if summary.ocr_failures > 0 {
        notice::warn(&format!(
            "{} OCR invocations failed; empty annotations were inserted. See the log for details.",
            summary.ocr_failures
        ));
    }
    Ok(())
}
