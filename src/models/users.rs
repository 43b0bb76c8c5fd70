use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

/// User record as returned by `GET /user/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub level: Option<u32>,
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount")]
    pub review_count: Option<u32>,
}

/// The endpoint answers either `{ data: {...} }` or the bare record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserResponse {
    Wrapped {
        #[serde(flatten)]
        envelope: super::Envelope,
        data: UserRecord,
    },
    Bare(UserRecord),
}

impl UserResponse {
    pub fn into_record(self) -> UserRecord {
        match self {
            UserResponse::Wrapped { data, .. } | UserResponse::Bare(data) => data,
        }
    }
}

/// Seller card on the gig detail page, with display defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Freelancer {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub level: u32,
    pub rating: f64,
    pub review_count: u32,
}

impl Freelancer {
    /// Stand-in shown when the seller's profile cannot be loaded.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Freelancer not found".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            level: 1,
            rating: 5.0,
            review_count: 0,
        }
    }
}

impl From<UserRecord> for Freelancer {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Freelancer".to_string()),
            avatar: record
                .avatar
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            level: record.level.unwrap_or(1),
            rating: record.rating.unwrap_or(5.0),
            review_count: record.review_count.unwrap_or(0),
        }
    }
}
