use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected credentials or any other provider-reported failure, message kept verbatim
    #[error("{0}")]
    Authentication(String),

    #[error("No active session")]
    NoSession,

    #[error("Identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session cache I/O failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Session cache is not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl AuthError {
    pub fn authentication(message: impl Into<String>) -> Self {
        AuthError::Authentication(message.into())
    }
}
