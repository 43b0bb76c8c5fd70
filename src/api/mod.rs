//! Typed access to the marketplace HTTP API.
//!
//! One `impl ApiClient` block per resource. Every request goes through
//! [`ApiClient::send`], which refuses expired sessions, attaches the bearer
//! token and maps error statuses (403 locks the account).

mod categories;
mod complaints;
mod conversations;
mod favorites;
mod gigs;
mod payments;
mod reviews;
mod search;
mod users;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::auth::Session;
use crate::auth::middleware::{authorize, check_response, ensure_fresh};
use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::Envelope;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
    cache: ResponseCache,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
            cache: ResponseCache::new(&config.cache),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        authorize(self.http.get(self.url(path)), &self.session)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        authorize(self.http.post(self.url(path)), &self.session)
    }

    async fn send_raw(&self, builder: RequestBuilder) -> ClientResult<Vec<u8>> {
        ensure_fresh(&self.session)?;
        let response = builder.send().await?;
        debug!(status = %response.status(), path = response.url().path(), "API response");
        let response = check_response(response, &self.session).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let body = self.send_raw(builder).await?;
        serde_json::from_slice(&body).map_err(ClientError::from)
    }

    /// For endpoints whose success body we do not need. A JSON envelope with
    /// `error: true` still counts as failure.
    async fn send_unit(&self, builder: RequestBuilder, fallback: &str) -> ClientResult<()> {
        let body = self.send_raw(builder).await?;
        if let Ok(envelope) = serde_json::from_slice::<Envelope>(&body) {
            if let Some(message) = envelope.rejection(fallback) {
                return Err(ClientError::Rejected(message));
            }
        }
        Ok(())
    }
}

fn reject_if_error(envelope: &Envelope, fallback: &str) -> ClientResult<()> {
    match envelope.rejection(fallback) {
        Some(message) => Err(ClientError::Rejected(message)),
        None => Ok(()),
    }
}
