use super::ApiClient;
use crate::cache::keys;
use crate::error::ClientResult;
use crate::models::users::{UserRecord, UserResponse};

impl ApiClient {
    /// `GET /user/{id}`, cached per user.
    pub async fn user(&self, user_id: &str) -> ClientResult<UserRecord> {
        let key = keys::user(user_id);
        if let Some(record) = self.cache.get::<UserRecord>(&key).await {
            return Ok(record);
        }

        let response: UserResponse = self.send(self.get(&format!("/user/{user_id}"))).await?;
        if let UserResponse::Wrapped { envelope, .. } = &response {
            super::reject_if_error(envelope, "Failed to load user")?;
        }
        let record = response.into_record();
        self.cache.set(&key, &record).await;
        Ok(record)
    }
}
