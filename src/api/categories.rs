use tracing::debug;

use super::ApiClient;
use crate::cache::keys;
use crate::error::ClientResult;
use crate::models::categories::{CategoryListResponse, CategoryNode};

impl ApiClient {
    /// `GET /category`, served from cache while fresh.
    pub async fn categories(&self) -> ClientResult<Vec<CategoryNode>> {
        let key = keys::categories();
        if let Some(tree) = self.cache.get::<Vec<CategoryNode>>(&key).await {
            return Ok(tree);
        }

        let response: CategoryListResponse = self.send(self.get("/category")).await?;
        debug!(roots = response.data.len(), "Fetched category tree");
        self.cache.set(&key, &response.data).await;
        Ok(response.data)
    }
}
