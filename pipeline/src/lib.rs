//! `tessnote-pipeline` — the idempotent annotation pipeline.
//!
//! Sanitizer, reference matcher, annotation rewriter, and the run
//! orchestrator. Everything here works on injected `VaultPort` /
//! `OcrEngine` collaborators and mutates nothing but note text.

pub mod matcher;
pub mod rewriter;
pub mod runner;
pub mod sanitize;

pub use matcher::find_unannotated;
pub use rewriter::apply_annotations;
pub use runner::Runner;
pub use sanitize::sanitize;
