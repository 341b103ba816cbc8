use thiserror::Error;

/// Coarse classification of a failed resolution, used by UI layers to pick
/// how loudly to complain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCause {
    /// The user typed something we refuse to send anywhere.
    UserInput,
    /// The resolver answered and explicitly refused the request.
    RemoteRejection,
    /// The transport failed: DNS, TLS, timeout, or a body that is not JSON.
    Network,
    /// Anything we could not map onto a known success or error shape.
    Unknown,
}

#[derive(Error, Debug)]
pub enum TubeGrabError {
    #[error("Please enter a valid YouTube URL.")]
    EmptyInput,

    #[error("Invalid URL. Please paste a link from YouTube.")]
    UnsupportedUrl,

    #[error("{0}")]
    Rejected(String),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timeout for URL: {0}")]
    RequestTimeout(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resolver reply did not contain a usable download link")]
    UnrecognizedReply,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TubeGrabError {
    pub fn cause(&self) -> ErrorCause {
        match self {
            Self::EmptyInput | Self::UnsupportedUrl => ErrorCause::UserInput,
            Self::Rejected(_) => ErrorCause::RemoteRejection,
            Self::Network(_) | Self::RequestTimeout(_) | Self::Json(_) => {
                ErrorCause::Network
            }
            Self::UnrecognizedReply | Self::Io(_) => ErrorCause::Unknown,
        }
    }
}

pub type Result<T> = std::result::Result<T, TubeGrabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cause_taxonomy() {
        assert_eq!(TubeGrabError::EmptyInput.cause(), ErrorCause::UserInput);
        assert_eq!(TubeGrabError::UnsupportedUrl.cause(), ErrorCause::UserInput);
        assert_eq!(
            TubeGrabError::Rejected("Private video".into()).cause(),
            ErrorCause::RemoteRejection
        );
        assert_eq!(
            TubeGrabError::RequestTimeout("https://example.com".into()).cause(),
            ErrorCause::Network
        );
        assert_eq!(TubeGrabError::UnrecognizedReply.cause(), ErrorCause::Unknown);
    }

    #[test]
    fn rejected_displays_remote_text_verbatim() {
        let err = TubeGrabError::Rejected("Private video".into());
        assert_eq!(err.to_string(), "Private video");
    }
}
