//! `tessnote config` — inspect and edit the persisted configuration.

use anyhow::{bail, Context, Result};

use tessnote_config::{apply_merge_patch, config_dir, config_file_path, load_config, write_config};

use crate::notice;

/// Print the effective configuration as YAML.
pub async fn show() -> Result<()> {
    let config = load_config(&config_file_path(&config_dir())).await?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

/// Print the config file path.
pub fn path() -> Result<()> {
    println!("{}", config_file_path(&config_dir()).display());
    Ok(())
}

/// Set one key via a JSON merge patch and persist the result atomically.
pub async fn set(key: &str, value: &str) -> Result<()> {
    let file = config_file_path(&config_dir());
    let config = load_config(&file).await?;

    let known = serde_json::to_value(&config).context("failed to serialize config")?;
    let known_keys: Vec<String> = known
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    if !known_keys.iter().any(|k| k == key) {
        bail!("unknown config key `{key}` (known keys: {})", known_keys.join(", "));
    }

    // Values parse as JSON when they can (numbers, booleans), else strings.
    let parsed: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    let patch = serde_json::json!({ key: parsed });

    let updated =
        apply_merge_patch(&config, &patch).with_context(|| format!("invalid value for `{key}`"))?;
    write_config(&updated, &file).await?;

    notice::info(&format!("{key} updated"));
    Ok(())
}
