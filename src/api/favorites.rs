use super::{ApiClient, reject_if_error};
use crate::error::ClientResult;
use crate::models::favorites::{FavoriteListResponse, ToggleFavoriteResponse};
use crate::models::gigs::GigSummary;

impl ApiClient {
    /// `POST /favorite/{id}`. Returns whether the gig is now a favorite.
    pub async fn toggle_favorite(&self, gig_id: &str) -> ClientResult<bool> {
        let response: ToggleFavoriteResponse = self
            .send(self.post(&format!("/favorite/{gig_id}")).json(&serde_json::json!({})))
            .await?;
        reject_if_error(&response.envelope, "Failed to update favorites")?;
        Ok(response.is_favorite)
    }

    /// `GET /favorite/get-list`, skipping gigs that no longer exist.
    pub async fn favorites(&self) -> ClientResult<Vec<GigSummary>> {
        let response: FavoriteListResponse = self.send(self.get("/favorite/get-list")).await?;
        reject_if_error(&response.envelope, "Failed to load saved gigs")?;
        Ok(response.favorites.into_iter().flatten().collect())
    }
}
