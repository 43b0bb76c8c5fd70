use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::jwt::TokenError;

/// Every failure a controller can observe while talking to the marketplace API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local input problem; never reaches the network.
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The API answered 403. The shared account state has been locked.
    #[error("account locked: {0}")]
    AccountLocked(String),
    #[error("you must be signed in to do this")]
    NotSignedIn,
    /// 2xx response whose body carried `error: true`.
    #[error("API rejected the request: {0}")]
    Rejected(String),
    #[error("HTTP {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    pub fn is_account_locked(&self) -> bool {
        matches!(self, ClientError::AccountLocked(_))
    }

    /// Message shown to the user when the API supplied one, else the error text.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http { message, .. } if !message.is_empty() => message.clone(),
            ClientError::AccountLocked(reason) | ClientError::Rejected(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        ClientError::Decode(value.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
