//! Tessnote runtime configuration schema.
//!
//! Persisted as YAML with camelCase keys; every field has a default so a
//! partial (or absent) file merges cleanly over the defaults.

use serde::{Deserialize, Serialize};

/// Default attachment root substring.
pub const DEFAULT_IMAGE_PATH: &str = "Meta/Attachments";

/// Default recognition language code passed to the engine.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Default per-invocation engine deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Root configuration for tessnote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TessnoteConfig {
    /// Vault-relative substring identifying where image attachments live.
    pub image_path: String,

    /// Language code(s) handed to tesseract's `-l` flag, e.g. `eng+deu`.
    pub tesseract_language: String,

    /// Optional directory containing the tesseract executable. Empty means
    /// resolve from `PATH`.
    pub tesseract_path: String,

    /// Deadline for a single engine invocation, in seconds. 0 disables the
    /// bound.
    pub tesseract_timeout_secs: u64,

    /// Verbose logging of engine commands and raw output.
    pub debug: bool,
}

impl Default for TessnoteConfig {
    fn default() -> Self {
        Self {
            image_path: DEFAULT_IMAGE_PATH.to_string(),
            tesseract_language: DEFAULT_LANGUAGE.to_string(),
            tesseract_path: String::new(),
            tesseract_timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_settings() {
        let cfg = TessnoteConfig::default();
        assert_eq!(cfg.image_path, "Meta/Attachments");
        assert_eq!(cfg.tesseract_language, "eng");
        assert!(cfg.tesseract_path.is_empty());
        assert!(!cfg.debug);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: TessnoteConfig =
            serde_yaml::from_str("tesseractLanguage: eng+fra\n").unwrap();
        assert_eq!(cfg.tesseract_language, "eng+fra");
        assert_eq!(cfg.image_path, DEFAULT_IMAGE_PATH);
        assert_eq!(cfg.tesseract_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn keys_serialize_camel_case() {
        let yaml = serde_yaml::to_string(&TessnoteConfig::default()).unwrap();
        assert!(yaml.contains("imagePath:"));
        assert!(yaml.contains("tesseractLanguage:"));
        assert!(yaml.contains("tesseractTimeoutSecs:"));
    }
}
