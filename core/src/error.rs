use thiserror::Error;

/// Failure of a single OCR engine invocation.
///
/// Any content on the engine's error channel classifies the invocation as
/// failed, even when recognized text was also produced.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be started at all.
    #[error("failed to start ocr process `{command}`: {message}")]
    Spawn { command: String, message: String },

    /// The engine wrote diagnostics to its error channel.
    #[error("ocr engine reported: {0}")]
    Diagnostics(String),

    /// The invocation exceeded the configured deadline.
    #[error("ocr engine timed out after {0}s")]
    Timeout(u64),
}

/// Top-level error type for the tessnote pipeline.
#[derive(Debug, Error)]
pub enum TessError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
