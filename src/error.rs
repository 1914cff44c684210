use thiserror::Error;

/// Failures that escape the caption pipeline.
///
/// Individual matrix misses and an exhausted scan are not errors; they are
/// reported through [`crate::TranscriptResult`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not extract a video id from {0:?}")]
    InvalidIdentifier(String),

    #[error("caption endpoint unreachable: {0}")]
    Transport(String),
}

impl Error {
    /// Whether the user can reasonably try the same request again later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(Error::Transport("dns".to_string()).is_retryable());
        assert!(!Error::InvalidIdentifier("nope".to_string()).is_retryable());
    }

    #[test]
    fn test_display_includes_input() {
        let err = Error::InvalidIdentifier("not a url".to_string());
        assert_eq!(err.to_string(), "could not extract a video id from \"not a url\"");
    }
}
