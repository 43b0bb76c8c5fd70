use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::gigs::GigSummary;
use super::{Envelope, PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Recommended,
    Hot,
    New,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Recommended,
        SortMode::Hot,
        SortMode::New,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Recommended => "recommended",
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
        }
    }

    pub fn sort_params(self) -> SortParams {
        match self {
            SortMode::PriceAsc => SortParams::Field {
                field: "price",
                order: SortOrder::Asc,
            },
            SortMode::PriceDesc => SortParams::Field {
                field: "price",
                order: SortOrder::Desc,
            },
            other => SortParams::Named(other.as_str()),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown sort mode: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// How a sort mode is expressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortParams {
    /// `sortField` + `sortOrder`
    Field { field: &'static str, order: SortOrder },
    /// `sortBy`
    Named(&'static str),
}

/// Everything sent to `GET /search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub sort: SortMode,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            min_price: None,
            max_price: None,
            category: None,
            sort: SortMode::default(),
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

impl SearchQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(keyword) = self.keyword.as_ref().filter(|k| !k.is_empty()) {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(min) = self.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if let Some(category) = self.category.as_ref().filter(|c| !c.is_empty()) {
            params.push(("category", category.clone()));
        }
        match self.sort.sort_params() {
            SortParams::Field { field, order } => {
                params.push(("sortField", field.to_string()));
                params.push(("sortOrder", order.as_str().to_string()));
            }
            SortParams::Named(name) => params.push(("sortBy", name.to_string())),
        }
        params
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
    pub gigs: Option<Vec<GigSummary>>,
}

/// One page of results. Replaced wholesale on every search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultPage {
    pub items: Vec<GigSummary>,
    pub total_pages: u32,
    pub total_results: u64,
    pub page_size: u32,
}

impl Default for SearchResultPage {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_results: 0,
            page_size: PAGE_SIZE,
        }
    }
}

impl From<SearchResponse> for SearchResultPage {
    fn from(response: SearchResponse) -> Self {
        match response.gigs {
            Some(items) => Self {
                items,
                total_pages: response.total_pages,
                total_results: response.total_results,
                page_size: PAGE_SIZE,
            },
            None => Self::default(),
        }
    }
}
