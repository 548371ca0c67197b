use reqwest::StatusCode;

pub const PERMISSION_DENIED_MESSAGE: &str = "Permission to access location was denied";
pub const HTTP_FALLBACK_MESSAGE: &str = "Failed to fetch data.";
pub const TRANSPORT_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Location provider errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("{}", PERMISSION_DENIED_MESSAGE)]
    PermissionDenied,
    #[error("Location service unavailable: {0}")]
    Unavailable(String),
    #[error("Location request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Weather request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("Weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http { message, .. } => message
                .clone()
                .unwrap_or_else(|| HTTP_FALLBACK_MESSAGE.to_string()),
            FetchError::Transport(_) | FetchError::Decode(_) => TRANSPORT_MESSAGE.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Http { .. } => FailureKind::Http,
            FetchError::Transport(_) | FetchError::Decode(_) => FailureKind::TransportOrDecode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Provider answered with a non-2xx status.
    Http,
    /// No response, or a body that could not be decoded.
    TransportOrDecode,
    /// The position could not be resolved after permission was granted.
    Location,
}

/// Cloneable projection of a failure, held by the screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&FetchError> for FetchFailure {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

impl From<&LocationError> for FetchFailure {
    fn from(err: &LocationError) -> Self {
        Self {
            kind: FailureKind::Location,
            message: err.to_string(),
        }
    }
}
