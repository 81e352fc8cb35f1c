// src/error.rs
use stitch_core::ComposeError;
use thiserror::Error;

/// Errors surfaced by the `stitch` library and binary.
#[derive(Error, Debug)]
pub enum StitchError {
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
