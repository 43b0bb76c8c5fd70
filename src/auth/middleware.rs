use reqwest::{RequestBuilder, Response, StatusCode, header};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::jwt::TokenError;
use crate::auth::session::Session;
use crate::error::{ClientError, ClientResult};

/// Error envelope the API uses for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<serde_json::Value>,
}

impl ErrorBody {
    fn text(&self) -> Option<String> {
        self.message.clone().or_else(|| match &self.error {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        })
    }
}

/// Attach the session's bearer credential, if any.
pub fn authorize(builder: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.bearer() {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

/// Refuse to send anything once the session's token has expired.
pub fn ensure_fresh(session: &Session) -> ClientResult<()> {
    if session.is_expired() {
        warn!("Session token expired; request not sent");
        return Err(TokenError::Expired.into());
    }
    Ok(())
}

/// Turn a non-success response into a [`ClientError`].
///
/// A 403 from any endpoint locks the account for the rest of the session.
pub async fn check_response(response: Response, session: &Session) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response
        .json::<ErrorBody>()
        .await
        .unwrap_or_default()
        .text();
    debug!(%status, path = %url, "API request failed");

    match status {
        StatusCode::FORBIDDEN => {
            session.account().lock(body.as_deref());
            Err(ClientError::AccountLocked(
                session.account().reason().unwrap_or_default(),
            ))
        }
        StatusCode::NOT_FOUND => Err(ClientError::NotFound(body.unwrap_or(url))),
        _ => Err(ClientError::Http {
            status,
            message: body.unwrap_or_default(),
        }),
    }
}
