use moka::future::Cache;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::CacheConfig;

/// In-process cache for slow-changing API reads, stored as JSON text.
#[derive(Clone)]
pub struct ResponseCache {
    categories: Cache<String, Arc<str>>,
    users: Cache<String, Arc<str>>,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            categories: build(config.category_ttl, config.max_capacity),
            users: build(config.user_ttl, config.max_capacity),
        }
    }

    fn bucket(&self, key: &str) -> &Cache<String, Arc<str>> {
        if key.starts_with(keys::USER_PREFIX) {
            &self.users
        } else {
            &self.categories
        }
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.bucket(key).get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                debug!(key, "Dropping undecodable cache entry: {e}");
                self.delete(key).await;
                None
            }
        }
    }

    /// Set a value in cache
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.bucket(key).insert(key.to_string(), Arc::from(json)).await,
            Err(e) => debug!(key, "Not caching unserializable value: {e}"),
        }
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) {
        self.bucket(key).invalidate(key).await;
    }
}

fn build(ttl: Duration, max_capacity: u64) -> Cache<String, Arc<str>> {
    Cache::builder()
        .time_to_live(ttl)
        .max_capacity(max_capacity)
        .build()
}

/// Cache key generators
pub mod keys {
    pub(super) const USER_PREFIX: &str = "user:";

    /// Key for the full category tree
    pub fn categories() -> String {
        "categories:tree".to_string()
    }

    /// Key for a user profile
    pub fn user(id: &str) -> String {
        format!("{USER_PREFIX}{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::categories::CategoryNode;

    #[tokio::test]
    async fn stores_and_returns_typed_values() {
        let cache = ResponseCache::new(&CacheConfig::default());
        let tree = vec![CategoryNode::new("c1", "Design")];

        assert!(cache.get::<Vec<CategoryNode>>(&keys::categories()).await.is_none());
        cache.set(&keys::categories(), &tree).await;
        assert_eq!(cache.get::<Vec<CategoryNode>>(&keys::categories()).await, Some(tree));

        cache.delete(&keys::categories()).await;
        assert!(cache.get::<Vec<CategoryNode>>(&keys::categories()).await.is_none());
    }

    #[tokio::test]
    async fn wrong_type_is_a_miss() {
        let cache = ResponseCache::new(&CacheConfig::default());
        cache.set(&keys::user("u1"), &"just a string").await;
        assert!(cache.get::<Vec<CategoryNode>>(&keys::user("u1")).await.is_none());
    }
}
