use crate::auth::session::Session;
use crate::error::{ClientError, ClientResult};

/// Write actions (favoriting, ordering, messaging, reporting) are refused
/// while the account is locked. Reads are never gated here.
pub fn ensure_can_write(session: &Session) -> ClientResult<()> {
    match session.account().reason() {
        Some(reason) => Err(ClientError::AccountLocked(reason)),
        None => Ok(()),
    }
}

/// Like [`ensure_can_write`], but also requires a signed-in user and returns its id.
pub fn require_user(session: &Session) -> ClientResult<String> {
    ensure_can_write(session)?;
    match session.user_id() {
        Some(id) if session.is_signed_in() => Ok(id),
        _ => Err(ClientError::NotSignedIn),
    }
}
