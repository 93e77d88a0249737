use client_api::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no challenge configured for this session")]
    MissingChallenge,

    #[error("no NPC configured for auto-battle")]
    MissingNpc,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SessionError {
    /// Text suitable for a toast notification.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::MissingChallenge => "No challenge selected".to_string(),
            SessionError::MissingNpc => "No NPC selected".to_string(),
            SessionError::Api(error) => error.user_message(),
        }
    }
}
