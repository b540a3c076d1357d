//! `tessnote doctor` — checks the configuration and the engine install.

use anyhow::Result;

use tessnote_config::{config_dir, config_file_path, load_config, TessnoteConfig};
use tessnote_ocr::TesseractEngine;

pub async fn run() -> Result<()> {
    println!("\n🔍 Running tessnote doctor...\n");

    let (config, config_ok) = check_config().await;
    let engine_ok = check_engine(&config).await;

    println!();
    if config_ok && engine_ok {
        println!("✅ All checks passed! tessnote is ready.");
    } else {
        println!("❌ Some checks failed! Please fix the errors above.");
    }

    Ok(())
}

async fn check_config() -> (TessnoteConfig, bool) {
    println!("Checking configuration:");
    let path = config_file_path(&config_dir());

    match load_config(&path).await {
        Ok(config) => {
            if path.exists() {
                println!("  🟢 {} loaded", path.display());
            } else {
                println!("  🟡 {} missing (defaults in use)", path.display());
            }
            println!("  🟢 attachment root: {}", config.image_path);
            println!("  🟢 language: {}", config.tesseract_language);
            (config, true)
        }
        Err(e) => {
            println!("  🔴 {}: {e}", path.display());
            (TessnoteConfig::default(), false)
        }
    }
}

async fn check_engine(config: &TessnoteConfig) -> bool {
    println!("Checking OCR engine:");

    match TesseractEngine::new(config).probe().await {
        Ok(version) => {
            println!("  🟢 {version}");
            true
        }
        Err(e) => {
            println!("  🔴 tesseract is not usable: {e}");
            false
        }
    }
}
