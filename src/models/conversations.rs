use serde::{Deserialize, Serialize};

/// `POST /conversation/create-or-get`
#[derive(Debug, Clone, Serialize)]
pub struct ConversationRequest {
    pub to: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationResponse {
    pub conversation: Conversation,
}
