use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::PAGE_SIZE;
use crate::models::categories::{CategoryNode, CategoryOption, render_options};
use crate::models::search::{SearchQuery, SearchResultPage, SortMode};
use crate::ui::pagination::{self, PageItem};
use crate::ui::{Location, Navigator};

pub const SEARCH_ROUTE: &str = "/advanced-search";

/// Why the result list is empty, when it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMessage {
    /// The API answered 404.
    NotFound,
    /// The API answered normally with zero gigs.
    Empty,
    Failed,
}

impl SearchMessage {
    pub fn text(self) -> &'static str {
        match self {
            SearchMessage::NotFound | SearchMessage::Empty => {
                "No gigs found matching your search."
            }
            SearchMessage::Failed => "Something went wrong while searching. Please try again later.",
        }
    }
}

/// Filter inputs as typed, before "Apply".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub min_price: String,
    pub max_price: String,
    pub category: String,
}

/// A search in flight. Only the newest ticket may update the results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    generation: u64,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// Advanced search page: committed filters live in the location, results
/// are replaced wholesale on each search.
pub struct SearchController {
    api: ApiClient,
    navigator: Arc<dyn Navigator>,
    location: Location,
    draft: FilterDraft,
    sort: SortMode,
    page: u32,
    results: SearchResultPage,
    loading: bool,
    message: Option<SearchMessage>,
    generation: u64,
    show_mobile_filters: bool,
    categories: Vec<CategoryNode>,
}

impl SearchController {
    pub fn new(api: ApiClient, navigator: Arc<dyn Navigator>, location: Location) -> Self {
        let draft = draft_from(&location);
        Self {
            api,
            navigator,
            location,
            draft,
            sort: SortMode::default(),
            page: 1,
            results: SearchResultPage::default(),
            loading: false,
            message: None,
            generation: 0,
            show_mobile_filters: false,
            categories: Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn draft(&self) -> &FilterDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FilterDraft {
        &mut self.draft
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &SearchResultPage {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<SearchMessage> {
        self.message
    }

    pub fn shows_mobile_filters(&self) -> bool {
        self.show_mobile_filters
    }

    pub fn toggle_mobile_filters(&mut self) {
        self.show_mobile_filters = !self.show_mobile_filters;
    }

    pub async fn load_categories(&mut self) {
        match self.api.categories().await {
            Ok(tree) => self.categories = tree,
            Err(e) => error!("Could not load categories: {e}"),
        }
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        render_options(&self.categories)
    }

    /// The query `run_search` would send for `sort` and `page`.
    pub fn query_for(&self, sort: SortMode, page: u32) -> SearchQuery {
        SearchQuery {
            keyword: self.location.get("keyword").map(str::to_string),
            min_price: price_param(&self.location, "minPrice"),
            max_price: price_param(&self.location, "maxPrice"),
            category: self.location.get("category").map(str::to_string),
            sort,
            page: page.max(1),
            limit: PAGE_SIZE,
        }
    }

    /// Start a search. Any ticket issued earlier becomes stale.
    pub fn begin_search(&mut self, sort: SortMode, page: u32) -> SearchTicket {
        self.generation += 1;
        self.loading = true;
        self.message = None;
        SearchTicket {
            generation: self.generation,
            query: self.query_for(sort, page),
        }
    }

    /// Store the outcome of `ticket`. Returns false, changing nothing, when a
    /// newer search has been started since.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: ClientResult<SearchResultPage>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding stale search response"
            );
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                self.message = page.items.is_empty().then_some(SearchMessage::Empty);
                self.results = page;
            }
            Err(ClientError::NotFound(_)) => {
                self.results = SearchResultPage::default();
                self.message = Some(SearchMessage::NotFound);
            }
            Err(e) => {
                error!("Search failed: {e}");
                self.results = SearchResultPage::default();
                self.message = Some(SearchMessage::Failed);
            }
        }
        true
    }

    pub async fn run_search(&mut self, sort: SortMode, page: u32) {
        let ticket = self.begin_search(sort, page);
        let outcome = self.api.search(ticket.query()).await;
        self.finish_search(ticket, outcome);
    }

    /// Commit the draft filters to the location and search from page 1.
    /// Prices that are not numbers are refused before anything changes.
    pub async fn apply_filters(&mut self) -> ClientResult<()> {
        let min = parse_price_input("Minimum price", &self.draft.min_price)?;
        let max = parse_price_input("Maximum price", &self.draft.max_price)?;

        let mut location = Location::new(SEARCH_ROUTE)
            .with("keyword", self.location.get("keyword"));
        location.set("minPrice", min.as_deref());
        location.set("maxPrice", max.as_deref());
        location.set("category", Some(self.draft.category.trim()));

        self.navigator.navigate(&location.to_string(), true);
        self.location = location;
        self.show_mobile_filters = false;
        self.page = 1;
        self.run_search(self.sort, 1).await;
        Ok(())
    }

    pub async fn change_sort(&mut self, mode: SortMode) {
        self.sort = mode;
        self.run_search(mode, self.page).await;
    }

    pub async fn change_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.run_search(self.sort, self.page).await;
        self.navigator.scroll_to_top();
    }

    /// The route changed underneath us (header search box, back button).
    pub async fn set_location(&mut self, location: Location) {
        self.draft = draft_from(&location);
        self.location = location;
        self.navigator.scroll_to_top();
        self.run_search(self.sort, self.page).await;
    }

    pub fn page_window(&self) -> Vec<PageItem> {
        pagination::page_window(self.page, self.results.total_pages)
    }

    pub fn has_previous_page(&self) -> bool {
        pagination::has_previous(self.page)
    }

    pub fn has_next_page(&self) -> bool {
        pagination::has_next(self.page, self.results.total_pages)
    }
}

fn draft_from(location: &Location) -> FilterDraft {
    FilterDraft {
        min_price: location.get("minPrice").unwrap_or_default().to_string(),
        max_price: location.get("maxPrice").unwrap_or_default().to_string(),
        category: location.get("category").unwrap_or_default().to_string(),
    }
}

fn price_param(location: &Location, key: &str) -> Option<f64> {
    let raw = location.get(key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(key, raw, "Ignoring non-numeric price filter");
            None
        }
    }
}

/// Blank means "no bound"; anything else must be a non-negative number.
fn parse_price_input(label: &str, raw: &str) -> ClientResult<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(raw.to_string())),
        _ => Err(ClientError::Validation(format!("{label} must be a number"))),
    }
}
