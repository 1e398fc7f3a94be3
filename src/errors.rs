// ABOUTME: Error types for the soapbox slide compiler
// ABOUTME: Provides structured error handling for each stage of the compile pass

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Path escapes the presentation root: {0}")]
    PathTraversalError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
