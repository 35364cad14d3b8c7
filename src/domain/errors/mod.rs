// Domain errors - Error types for the domain layer

use std::fmt;

use crate::domain::model::MediaKind;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Source directory is missing or not a directory
    DirectoryNotFound { kind: MediaKind, path: String },
    /// Source directory holds no file with an accepted extension
    CatalogEmpty { kind: MediaKind, path: String },
    /// One asset could not be read; never fatal to a run
    Decode { path: String, reason: String },
    /// Every audio asset failed to decode
    NoAudioSequenced(String),
    /// Every video iteration failed
    NoClipsComposed(String),
    /// Mixing, muxing or final encoding failed
    Encode(String),
    /// Invalid configuration value
    Config(String),
    /// Filesystem failure
    FsFail(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::DirectoryNotFound { kind, path } => {
                write!(f, "{} directory '{}' does not exist", kind.source_label(), path)
            }
            DomainError::CatalogEmpty { kind, path } => {
                write!(f, "No {} files found in '{}'", kind, path)
            }
            DomainError::Decode { path, reason } => {
                write!(f, "Error loading or processing '{}': {}", path, reason)
            }
            DomainError::NoAudioSequenced(msg) => write!(f, "No audio was sequenced: {}", msg),
            DomainError::NoClipsComposed(msg) => {
                write!(f, "No video clips were successfully loaded: {}", msg)
            }
            DomainError::Encode(msg) => write!(f, "Encoding failed: {}", msg),
            DomainError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
