//! Adapter for the external `tesseract` executable.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use tessnote_config::TessnoteConfig;
use tessnote_core::{EngineError, OcrEngine};

/// Executable name, resolved from `PATH` unless an install directory is
/// configured.
const TESSERACT_BIN: &str = "tesseract";

/// Invokes `tesseract <image> stdout -l <language>` per image.
///
/// One invocation per call, no retry; a hung engine is cut off by the
/// configured deadline instead of blocking the run.
pub struct TesseractEngine {
    install_dir: String,
    language: String,
    timeout_secs: u64,
    debug: bool,
}

impl TesseractEngine {
    pub fn new(config: &TessnoteConfig) -> Self {
        Self {
            install_dir: config.tesseract_path.clone(),
            language: config.tesseract_language.clone(),
            timeout_secs: config.tesseract_timeout_secs,
            debug: config.debug,
        }
    }

    /// Path of the executable to spawn.
    fn command_path(&self) -> PathBuf {
        if self.install_dir.is_empty() {
            PathBuf::from(TESSERACT_BIN)
        } else {
            Path::new(&self.install_dir).join(TESSERACT_BIN)
        }
    }

    /// Run `tesseract --version` to check the engine is installed and
    /// answers. Used by `doctor`, never by the pipeline.
    pub async fn probe(&self) -> Result<String, EngineError> {
        let program = self.command_path();
        let output = Command::new(&program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| EngineError::Spawn {
                command: program.display().to_string(),
                message: e.to_string(),
            })?;

        // tesseract prints its version banner to stderr.
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        let first_line = String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or("")
            .to_string();
        Ok(first_line)
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &Path) -> Result<String, EngineError> {
        let program = self.command_path();

        if self.debug {
            debug!(
                command = %format!(
                    "{} {} stdout -l {}",
                    program.display(),
                    image.display(),
                    self.language
                ),
                "invoking ocr engine"
            );
        }

        let mut cmd = Command::new(&program);
        cmd.arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let spawn_err = |e: std::io::Error| EngineError::Spawn {
            command: program.display().to_string(),
            message: e.to_string(),
        };

        let output = if self.timeout_secs == 0 {
            cmd.output().await.map_err(spawn_err)?
        } else {
            match tokio::time::timeout(Duration::from_secs(self.timeout_secs), cmd.output()).await
            {
                Ok(result) => result.map_err(spawn_err)?,
                Err(_) => return Err(EngineError::Timeout(self.timeout_secs)),
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if self.debug {
            debug!(image = %image.display(), %stdout, %stderr, "ocr engine output");
        }

        classify_output(stdout, stderr)
    }
}

/// Classify one finished invocation.
///
/// Any error-channel content means failure, even when recognized text was
/// also produced; otherwise the stdout text is returned verbatim.
fn classify_output(stdout: String, stderr: String) -> Result<String, EngineError> {
    if !stderr.is_empty() {
        return Err(EngineError::Diagnostics(stderr.trim().to_string()));
    }
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: &TessnoteConfig) -> TesseractEngine {
        TesseractEngine::new(config)
    }

    #[test]
    fn test_command_path_from_install_dir() {
        let mut config = TessnoteConfig::default();
        config.tesseract_path = "/opt/tesseract/bin".into();
        assert_eq!(
            engine(&config).command_path(),
            PathBuf::from("/opt/tesseract/bin/tesseract")
        );

        config.tesseract_path.clear();
        assert_eq!(engine(&config).command_path(), PathBuf::from("tesseract"));
    }

    #[test]
    fn test_stderr_content_classifies_as_failure() {
        let result = classify_output("partial text".into(), "Tesseract couldn't load any languages!".into());
        match result {
            Err(EngineError::Diagnostics(msg)) => {
                assert!(msg.contains("couldn't load"));
            }
            other => panic!("expected diagnostics failure, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_invocation_returns_stdout_verbatim() {
        let text = classify_output("Line one\nLine two\n".into(), String::new()).unwrap();
        assert_eq!(text, "Line one\nLine two\n");
    }

    #[tokio::test]
    async fn test_missing_executable_is_a_spawn_error() {
        let mut config = TessnoteConfig::default();
        config.tesseract_path = "/nonexistent/dir".into();
        config.tesseract_timeout_secs = 1;
        let err = engine(&config)
            .recognize(Path::new("/tmp/none.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Spawn { .. }));
    }
}
