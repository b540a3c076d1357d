//! Splices annotation blocks into note text at computed offsets.

use tracing::warn;

use tessnote_core::{OcrEngine, ReferenceMatch, RunSummary, VaultPort};

use crate::sanitize::sanitize;

const DETAILS_OPEN: &str = "<details>";
const DETAILS_CLOSE: &str = "</details>";

/// Render one annotation block. Failure renders the empty form, which still
/// marks the reference handled so it is not retried on the next run.
fn annotation_block(sanitized: Option<&str>) -> String {
    match sanitized {
        Some(text) => format!("{DETAILS_OPEN}{text}{DETAILS_CLOSE}\n"),
        None => format!("{DETAILS_OPEN}{DETAILS_CLOSE}\n"),
    }
}

/// Apply annotations for `matches` to `content`, invoking the engine once
/// per match, and return the rewritten text.
///
/// Matches are processed strictly in matcher order with a single cursor
/// that only advances: each reference is located at or after the end of the
/// previous splice against the grown string, never against offsets computed
/// before earlier insertions. One match's engine failure inserts the empty
/// block, bumps the failure counter, and the pass continues — there is no
/// abort path.
pub async fn apply_annotations(
    content: &str,
    matches: &[ReferenceMatch],
    vault: &dyn VaultPort,
    engine: &dyn OcrEngine,
    summary: &mut RunSummary,
) -> String {
    let mut text = content.to_string();
    let mut cursor = 0usize;

    for m in matches {
        let Some(found_at) = text[cursor..].find(&m.raw_text) else {
            warn!(reference = %m.raw_text, "reference not found at or after cursor; skipping");
            continue;
        };
        let insert_at = cursor + found_at + m.raw_text.len();

        let image = vault.full_path(&m.resource.path);
        let block = match engine.recognize(&image).await {
            Ok(raw) => annotation_block(Some(&sanitize(&raw))),
            Err(err) => {
                warn!(
                    resource = %m.resource.path,
                    error = %err,
                    "ocr failed; inserting empty annotation"
                );
                summary.ocr_failures += 1;
                annotation_block(None)
            }
        };

        text.insert_str(insert_at, &block);
        summary.annotations_inserted += 1;
        cursor = insert_at + block.len();
    }

    text
}
