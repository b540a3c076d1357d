//! Config file read/write with atomic replacement.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::TessnoteConfig;

/// Config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the tessnote config directory.
/// Priority: `TESSNOTE_CONFIG_DIR` env > `~/.tessnote/`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TESSNOTE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tessnote");
    }
    PathBuf::from(".tessnote")
}

/// Resolve the full path to the config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns the defaults if the file doesn't exist (first run). Fields absent
/// from the file fall back to their defaults during deserialization.
pub async fn load_config(path: &Path) -> Result<TessnoteConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file does not exist; using defaults");
        return Ok(TessnoteConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: TessnoteConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config YAML at: {}", path.display()))?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &TessnoteConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
    }

    let yaml =
        serde_yaml::to_string(config).with_context(|| "failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "wrote config");
    Ok(())
}

/// Patch config with a JSON Merge Patch (RFC 7396).
///
/// The patch is applied to the serialized JSON of the config, then
/// deserialized back, which allows partial updates from `config set`.
pub fn apply_merge_patch(
    config: &TessnoteConfig,
    patch: &serde_json::Value,
) -> Result<TessnoteConfig> {
    let mut value =
        serde_json::to_value(config).context("failed to serialize config for merge patch")?;
    json_merge_patch(&mut value, patch);
    let updated: TessnoteConfig =
        serde_json::from_value(value).context("failed to deserialize config after merge patch")?;
    Ok(updated)
}

/// RFC 7396 JSON Merge Patch algorithm.
fn json_merge_patch(target: &mut serde_json::Value, patch: &serde_json::Value) {
    if let serde_json::Value::Object(patch_map) = patch {
        if let serde_json::Value::Object(target_map) = target {
            for (key, patch_val) in patch_map {
                if patch_val.is_null() {
                    target_map.remove(key);
                } else {
                    let entry = target_map
                        .entry(key.clone())
                        .or_insert(serde_json::Value::Null);
                    json_merge_patch(entry, patch_val);
                }
            }
        } else {
            *target = patch.clone();
        }
    } else {
        *target = patch.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn merge_patch_updates_key() {
        let base = TessnoteConfig::default();
        let patch = serde_json::json!({ "tesseractLanguage": "eng+jpn" });
        let result = apply_merge_patch(&base, &patch).unwrap();
        assert_eq!(result.tesseract_language, "eng+jpn");
        assert_eq!(result.image_path, base.image_path);
    }

    #[test]
    fn merge_patch_removed_key_falls_back_to_default() {
        let mut base = TessnoteConfig::default();
        base.debug = true;
        let patch = serde_json::json!({ "debug": null });
        let result = apply_merge_patch(&base, &patch).unwrap();
        assert!(!result.debug);
    }

    #[tokio::test]
    async fn load_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join(format!("tessnote-{}.yaml", Uuid::new_v4()));
        let cfg = load_config(&path).await.unwrap();
        assert_eq!(cfg, TessnoteConfig::default());
    }

    #[tokio::test]
    async fn write_then_load_roundtrips() {
        let dir = std::env::temp_dir().join(format!("tessnote-{}", Uuid::new_v4()));
        let path = config_file_path(&dir);

        let mut cfg = TessnoteConfig::default();
        cfg.image_path = "Assets/Images".into();
        cfg.tesseract_timeout_secs = 5;

        write_config(&cfg, &path).await.unwrap();
        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded, cfg);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
