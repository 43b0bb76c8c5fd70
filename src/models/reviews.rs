use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decimal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "star", deserialize_with = "decimal::option")]
    pub rating: Option<f64>,
    #[serde(default, alias = "description")]
    pub comment: Option<String>,
    pub user: Option<Reviewer>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /review/gig/{id}/frontend`
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewListResponse {
    #[serde(flatten)]
    pub envelope: super::Envelope,
    #[serde(default)]
    pub reviews: Vec<Review>,
}
