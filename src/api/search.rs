use super::{ApiClient, reject_if_error};
use crate::error::ClientResult;
use crate::models::search::{SearchQuery, SearchResponse, SearchResultPage};

impl ApiClient {
    /// `GET /search`
    pub async fn search(&self, query: &SearchQuery) -> ClientResult<SearchResultPage> {
        let response: SearchResponse = self
            .send(self.get("/search").query(&query.to_params()))
            .await?;
        reject_if_error(&response.envelope, "Search failed")?;
        Ok(SearchResultPage::from(response))
    }
}
