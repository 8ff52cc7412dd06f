use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    #[error("Session token cannot be sent as a header")]
    InvalidSession,

    #[error("Request rejected by backend (status {status}): {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    /// Application-level rejection, as opposed to a transport failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The backend-provided reason, if this is a rejection that carried one.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Not running inside a Telegram host (no init data)")]
    Unavailable,

    #[error("Init data is empty")]
    EmptyInitData,

    #[error("Init data contains characters not allowed in a header")]
    InvalidSession,

    #[error("Malformed init data parameter: {0}")]
    MalformedParameter(String),

    #[error("Invalid user profile in init data: {0}")]
    InvalidUser(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot determine home directory")]
    NoHomeDir,
}
