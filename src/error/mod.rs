//! Error handling module for reelmix

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for reelmix operations
#[derive(Error, Debug)]
pub enum ReelError {
    /// Pipeline failure reported by the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// FFmpeg initialization error
    #[error("Failed to initialize FFmpeg: {message}")]
    FFmpegInitError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReelError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ReelError::Domain(err) => domain_exit_code(err),
            ReelError::IoError(_) => 8,
            ReelError::FFmpegInitError { .. } => 1,
        }
    }
}

fn domain_exit_code(err: &DomainError) -> u8 {
    match err {
        DomainError::DirectoryNotFound { .. } => 2,
        DomainError::CatalogEmpty { .. } => 3,
        DomainError::NoAudioSequenced(_) => 4,
        DomainError::NoClipsComposed(_) => 5,
        DomainError::Encode(_) => 6,
        DomainError::Config(_) | DomainError::BadArgs(_) => 7,
        DomainError::FsFail(_) => 8,
        DomainError::Decode { .. } | DomainError::InternalError(_) => 1,
    }
}

/// Result type alias for reelmix operations
pub type ReelResult<T> = std::result::Result<T, ReelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MediaKind;

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let missing = ReelError::from(DomainError::DirectoryNotFound {
            kind: MediaKind::Audio,
            path: "sounds".to_string(),
        });
        assert_eq!(missing.exit_code(), 2);
        assert_eq!(missing.to_string(), "Sounds directory 'sounds' does not exist");

        let empty = ReelError::from(DomainError::CatalogEmpty {
            kind: MediaKind::Video,
            path: "clips".to_string(),
        });
        assert_eq!(empty.exit_code(), 3);

        assert_eq!(ReelError::from(DomainError::NoAudioSequenced(String::new())).exit_code(), 4);
        assert_eq!(ReelError::from(DomainError::NoClipsComposed(String::new())).exit_code(), 5);
        assert_eq!(ReelError::from(DomainError::Encode(String::new())).exit_code(), 6);
        assert_eq!(ReelError::from(DomainError::BadArgs(String::new())).exit_code(), 7);

        let io = ReelError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.exit_code(), 8);
    }
}
