use super::ApiClient;
use crate::error::ClientResult;
use crate::models::conversations::{Conversation, ConversationRequest, ConversationResponse};

impl ApiClient {
    /// `POST /conversation/create-or-get`
    pub async fn conversation_with(&self, to: &str, from: &str) -> ClientResult<Conversation> {
        let request = ConversationRequest {
            to: to.to_string(),
            from: from.to_string(),
        };
        let response: ConversationResponse = self
            .send(self.post("/conversation/create-or-get").json(&request))
            .await?;
        Ok(response.conversation)
    }
}
