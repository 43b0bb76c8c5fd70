//! Integration tests for reading the session token on the client side.
//!
//! Tokens are minted locally with HS256, the way the identity provider would
//! issue them. No running server is needed.
//!
//! Run with: `cargo test --test auth_test`
mod common;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use common::MockApi;
use gradwork_client::ClientError;
use gradwork_client::auth::jwt::{Claims, TokenError, UserMetadata, read_claims};
use gradwork_client::auth::{AccountState, Session};

/// The client never sees the real key; any key will do for minting.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn mint(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

fn claims_for(sub: &str, email: &str, full_name: &str) -> Claims {
    let now = Utc::now().timestamp() as usize;
    Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        user_metadata: Some(UserMetadata {
            full_name: Some(full_name.to_string()),
            name: None,
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            picture: None,
            email: Some(email.to_string()),
            email_verified: Some(true),
        }),
    }
}

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4().to_string();
    let token = mint(&claims_for(&user_id, "alice@example.com", "Alice Smith"), TEST_SECRET);

    let claims = read_claims(&token).expect("Token should be readable");

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
    assert_eq!(claims.avatar_url().unwrap(), "https://example.com/avatar.png");
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_any_signing_key_is_readable() {
    let token = mint(
        &claims_for("u-42", "bob@example.com", "Bob Jones"),
        "completely-different-secret-xxxxxxxxxxxxxxxxxx",
    );
    assert_eq!(read_claims(&token).unwrap().sub, "u-42");
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // well past the 60s default leeway
        iat: Some(now - 3600),
        iss: None,
        email: Some("expired@example.com".to_string()),
        role: None,
        user_metadata: None,
    };

    match read_claims(&mint(&claims, TEST_SECRET)) {
        Err(TokenError::Invalid(e)) => assert_eq!(*e.kind(), ErrorKind::ExpiredSignature),
        other => panic!("expected expiry error, got {other:?}"),
    }
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(read_claims("not.a.valid.jwt").is_err());
}

#[test]
fn test_blank_subject_has_no_user_id() {
    let token = mint(&claims_for("  ", "x@example.com", "X"), TEST_SECRET);
    let claims = read_claims(&token).unwrap();
    assert!(matches!(claims.user_id(), Err(TokenError::MissingSubject)));
}

#[test]
fn test_claims_helpers_with_missing_metadata() {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some("bare@example.com".to_string()),
        role: None,
        user_metadata: None,
    };

    assert_eq!(claims.user_email().unwrap(), "bare@example.com");
    assert!(claims.display_name().is_none());
    assert!(claims.avatar_url().is_none());
}

#[test]
fn test_sign_in_sets_user_and_clears_lock() {
    let session = Session::new(AccountState::in_memory());
    session.account().lock(Some("Suspicious activity"));
    assert!(!session.is_signed_in());

    let token = mint(&claims_for("seller-1", "s@example.com", "Seller"), TEST_SECRET);
    session.sign_in(&token).expect("sign in");

    assert!(session.is_signed_in());
    assert_eq!(session.user_id().as_deref(), Some("seller-1"));
    assert_eq!(session.bearer(), Some(token));
    assert!(!session.account().is_locked());

    session.sign_out();
    assert!(!session.is_signed_in());
    assert!(session.user_id().is_none());
}

#[test]
fn test_failed_sign_in_leaves_session_untouched() {
    let session = Session::new(AccountState::in_memory());
    assert!(session.sign_in("garbage").is_err());
    assert!(!session.is_signed_in());
    assert!(session.user_id().is_none());
}

#[actix_web::test]
async fn test_token_expiring_mid_session_stops_requests() {
    let mock = MockApi::start().await;
    mock.respond("GET", "/favorite/get-list", 200, json!({ "favorites": [] }));

    let mut claims = claims_for("buyer-1", "b@example.com", "Buyer");
    claims.exp = Utc::now().timestamp() as usize + 2;
    let session = Arc::new(Session::new(AccountState::in_memory()));
    session.sign_in(&mint(&claims, TEST_SECRET)).expect("sign in");
    let api = mock.client(session.clone());

    api.favorites().await.expect("token still valid");
    assert_eq!(mock.requests_to("GET", "/favorite/get-list").len(), 1);

    actix_web::rt::time::sleep(Duration::from_secs(3)).await;

    assert!(session.is_expired());
    assert!(!session.is_signed_in());
    let err = api.favorites().await.unwrap_err();
    assert!(matches!(err, ClientError::Token(TokenError::Expired)), "{err:?}");
    assert_eq!(mock.requests_to("GET", "/favorite/get-list").len(), 1);
}
