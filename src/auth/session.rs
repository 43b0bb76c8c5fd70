use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::auth::jwt::{self, Claims, TokenError};

pub const DEFAULT_LOCK_REASON: &str = "Your account has been locked";

/// Persisted shape of the locked-account flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    pub account_locked: bool,
    pub account_locked_reason: String,
}

/// Process-wide "account locked" flag.
///
/// Set once when any response comes back 403, read by every view that gates
/// write actions, cleared only when a new session starts. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    inner: Arc<RwLock<Option<LockInfo>>>,
    path: Option<PathBuf>,
}

impl AccountState {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Restore the flag from `path` (missing or unreadable files mean unlocked)
    /// and keep writing changes back to it.
    pub fn persisted(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let restored = load_lock_info(&path).filter(|info| info.account_locked);
        Self {
            inner: Arc::new(RwLock::new(restored)),
            path: Some(path),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.read().is_some()
    }

    pub fn reason(&self) -> Option<String> {
        self.read().map(|info| info.account_locked_reason)
    }

    pub fn lock(&self, reason: Option<&str>) {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_LOCK_REASON);
        let info = LockInfo {
            account_locked: true,
            account_locked_reason: reason.to_string(),
        };
        {
            let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
            if guard.as_ref() == Some(&info) {
                return;
            }
            *guard = Some(info.clone());
        }
        warn!(reason = %info.account_locked_reason, "Account locked by API");
        self.store(Some(&info));
    }

    pub fn reset(&self) {
        let was_locked = self
            .inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some();
        if was_locked {
            info!("Account lock cleared");
            self.store(None);
        }
    }

    fn read(&self) -> Option<LockInfo> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn store(&self, info: Option<&LockInfo>) {
        let Some(path) = &self.path else {
            return;
        };
        let result = match info {
            Some(info) => serde_json::to_vec_pretty(info)
                .map_err(std::io::Error::other)
                .and_then(|bytes| std::fs::write(path, bytes)),
            None => match std::fs::remove_file(path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!(path = %path.display(), "Failed to persist account state: {e}");
        }
    }
}

fn load_lock_info(path: &Path) -> Option<LockInfo> {
    let bytes = std::fs::read(path).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(path = %path.display(), "Ignoring unreadable account state: {e}");
            None
        }
    }
}

/// Who is signed in, and the bearer credential attached to every request.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
    /// Unix timestamp after which the token is refused locally.
    expires_at: RwLock<Option<i64>>,
    user_id: RwLock<Option<String>>,
    account: AccountState,
}

impl Session {
    pub fn new(account: AccountState) -> Self {
        Self {
            token: RwLock::new(None),
            expires_at: RwLock::new(None),
            user_id: RwLock::new(None),
            account,
        }
    }

    /// Start a new session from an identity-provider token. Clears any lock
    /// recorded by a previous session.
    pub fn sign_in(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = jwt::read_claims(token)?;
        let user_id = claims.user_id()?.to_string();
        self.set_auth_token(Some(token.to_string()));
        *self.expires_at.write().unwrap_or_else(|e| e.into_inner()) = i64::try_from(claims.exp).ok();
        *self.user_id.write().unwrap_or_else(|e| e.into_inner()) = Some(user_id);
        self.account.reset();
        Ok(claims)
    }

    pub fn sign_out(&self) {
        self.set_auth_token(None);
        *self.user_id.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Replace the bearer credential without touching the rest of the session.
    /// The new token's expiry is unknown until it is signed in with.
    pub fn set_auth_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
        *self.expires_at.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn set_user_id(&self, user_id: impl Into<String>) {
        *self.user_id.write().unwrap_or_else(|e| e.into_inner()) = Some(user_id.into());
    }

    pub fn bearer(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.bearer().is_some() && !self.is_expired()
    }

    /// Whether the signed-in token's `exp` has passed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some_and(|exp| exp <= now)
    }

    pub fn account(&self) -> &AccountState {
        &self.account
    }
}
