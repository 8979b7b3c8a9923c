//! Error types for flac2mp3
//!
//! Every failure in the conversion path surfaces as one of these variants.
//! A missing config file is not an error and never reaches this type.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for the converter
#[derive(Error, Debug)]
pub enum Error {
    /// Input path exists but is not a regular file (or does not exist at all)
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// A file the tag adapters need could not be found
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The tag reader could not parse the source file
    #[error("Failed to read tags from {}: {message}", .path.display())]
    TagRead { path: PathBuf, message: String },

    /// The tag writer could not update the destination file
    #[error("Failed to write tags to {}: {message}", .path.display())]
    TagWrite { path: PathBuf, message: String },

    /// Config file exists but could not be parsed
    #[error("Configuration error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// External tool could not be started
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool ran but exited unsuccessfully
    #[error("{program} exited with {status}")]
    ToolFailed { program: String, status: ExitStatus },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code to report for this error.
    ///
    /// External tool failures pass their own exit code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolFailed { status, .. } => status.code().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Convenience Result type using the crate Error
pub type Result<T> = std::result::Result<T, Error>;
