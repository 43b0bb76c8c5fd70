use serde::Deserialize;

use super::gigs::GigSummary;

/// `GET /favorite/get-list`. Deleted gigs come back as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteListResponse {
    #[serde(flatten)]
    pub envelope: super::Envelope,
    #[serde(default)]
    pub favorites: Vec<Option<GigSummary>>,
}

/// `POST /favorite/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleFavoriteResponse {
    #[serde(flatten)]
    pub envelope: super::Envelope,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}
