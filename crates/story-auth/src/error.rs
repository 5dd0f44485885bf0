use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credentials rejected by the content API ({status})")]
    Rejected { status: u16 },

    #[error("login failed ({status}): {message}")]
    LoginFailed { status: u16, message: String },

    #[error("login response did not contain an access token")]
    MissingToken,

    #[error("login transport error: {0}")]
    Transport(String),

    #[error("malformed login response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// The content API refused the credentials; retrying will not help.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::MissingToken)
    }
}
