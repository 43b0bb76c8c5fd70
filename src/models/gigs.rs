use serde::{Deserialize, Serialize};

use super::decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
    #[serde(rename = "thumbnailUrl", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Seller info embedded in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GigOwner {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub avatar: Option<String>,
    pub email: Option<String>,
}

/// A gig as shown on cards (search results, bookmarks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GigSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "decimal::deserialize")]
    pub price: f64,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    pub category_id: Option<String>,
    pub duration: Option<u32>,
    #[serde(rename = "freelancerId")]
    pub freelancer_id: Option<String>,
    pub user: Option<GigOwner>,
    #[serde(default, deserialize_with = "decimal::option")]
    pub star: Option<f64>,
    #[serde(rename = "ratingsCount", default)]
    pub ratings_count: u32,
}

impl GigSummary {
    pub fn rating(&self) -> f64 {
        self.star.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

/// Full gig record for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GigDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "freelancerId")]
    pub freelancer_id: Option<String>,
    pub category_id: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "ordersCompleted", default)]
    pub orders_completed: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "decimal::deserialize")]
    pub price: f64,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    pub rating: Option<RatingSummary>,
    pub duration: Option<u32>,
}

/// `GET /{id}/get-gig-detail`
#[derive(Debug, Clone, Deserialize)]
pub struct GigDetailResponse {
    #[serde(flatten)]
    pub envelope: super::Envelope,
    pub gig: Option<GigDetail>,
    #[serde(rename = "freelancerId")]
    pub freelancer_id: Option<String>,
}

/// Validated wizard values, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    /// Days.
    pub delivery_time: u32,
}

/// What the user has typed so far. Numeric fields stay text until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GigDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub delivery_time: String,
}
