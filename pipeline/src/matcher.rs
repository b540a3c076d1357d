//! Finds unannotated image embeds and resolves them to image resources.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use tessnote_core::{ImageResource, ReferenceMatch};

/// Embed references shaped like `![[name]]`, shortest span per reference so
/// adjacent embeds on one line stay separate matches.
static EMBED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[.*?\]\]").expect("embed pattern compiles"));

/// Literal tag whose presence immediately after `]]` marks a reference as
/// already annotated.
const ANNOTATION_OPEN: &str = "<details>";

/// Scan `content` for embed references lacking an annotation and resolve
/// each to the image resources whose file name occurs in the reference text.
///
/// The annotated check is positional only: the characters right after the
/// closing brackets either are the opening tag or they are not. Resolution
/// is substring containment, so references carrying path prefixes or sizing
/// hints still resolve. A reference matching several resources yields one
/// match per resource, in resource enumeration order; a reference matching
/// none is skipped.
pub fn find_unannotated(content: &str, resources: &[ImageResource]) -> Vec<ReferenceMatch> {
    let mut matches = Vec::new();
    for found in EMBED_RE.find_iter(content) {
        if content[found.end()..].starts_with(ANNOTATION_OPEN) {
            debug!(reference = found.as_str(), "reference already annotated");
            continue;
        }

        let raw = found.as_str();
        let candidates: Vec<&ImageResource> = resources
            .iter()
            .filter(|res| raw.contains(&res.name))
            .collect();

        if candidates.is_empty() {
            debug!(reference = raw, "no image resource matches reference");
            continue;
        }
        if candidates.len() > 1 {
            warn!(
                reference = raw,
                candidates = candidates.len(),
                "reference matches multiple image resources; annotating all"
            );
        }

        for resource in candidates {
            matches.push(ReferenceMatch {
                raw_text: raw.to_string(),
                resource: resource.clone(),
            });
        }
    }
    matches
}
