use super::{ApiClient, reject_if_error};
use crate::error::ClientResult;
use crate::models::reviews::{Review, ReviewListResponse};

impl ApiClient {
    /// `GET /review/gig/{id}/frontend`
    pub async fn gig_reviews(&self, gig_id: &str) -> ClientResult<Vec<Review>> {
        let response: ReviewListResponse = self
            .send(self.get(&format!("/review/gig/{gig_id}/frontend")))
            .await?;
        reject_if_error(&response.envelope, "Failed to load reviews")?;
        Ok(response.reviews)
    }
}
