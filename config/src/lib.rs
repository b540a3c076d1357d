//! `tessnote-config` — persisted tessnote settings.
//!
//! Provides:
//! - Typed config schema (attachment root, engine language/path/deadline)
//! - YAML read/write with atomic replacement
//! - JSON merge-patch editing for `config set`

pub mod io;
pub mod schema;

pub use io::{apply_merge_patch, config_dir, config_file_path, load_config, write_config};
pub use schema::TessnoteConfig;
