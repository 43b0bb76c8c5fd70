use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::bookmarks::FavoritesStore;
use crate::api::ApiClient;
use crate::auth::authorization::{ensure_can_write, require_user};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::media::thumbnails::{fill_video_thumbnails, with_placeholders};
use crate::media::ThumbnailExtractor;
use crate::models::complaints::{Complaint, ReportReason};
use crate::models::gigs::{GigDetail, MediaItem, MediaType};
use crate::models::payments::PaymentRequest;
use crate::models::reviews::Review;
use crate::models::users::Freelancer;
use crate::ui::{Navigator, Notification, Notifier};

pub const SIGN_IN_ROUTE: &str = "/sign-in";

pub fn inbox_route(conversation_id: &str) -> String {
    format!("/inbox/{conversation_id}")
}

/// Everything the detail page shows, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct GigPage {
    pub gig: GigDetail,
    pub freelancer: Freelancer,
    pub reviews: Vec<Review>,
}

/// The item shown in the large viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMedia {
    pub url: String,
    pub kind: MediaType,
}

/// A detail load in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    gig_id: String,
}

impl LoadTicket {
    pub fn gig_id(&self) -> &str {
        &self.gig_id
    }
}

pub struct GigDetailController {
    api: ApiClient,
    favorites: FavoritesStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    thumbnails: Arc<dyn ThumbnailExtractor>,
    thumbnail_timeout: Duration,
    loading_id: Option<String>,
    page: Option<GigPage>,
    media: Vec<MediaItem>,
    selected: Option<SelectedMedia>,
    favorited: bool,
    error: Option<String>,
}

impl GigDetailController {
    pub fn new(
        api: ApiClient,
        config: &ClientConfig,
        favorites: FavoritesStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        thumbnails: Arc<dyn ThumbnailExtractor>,
    ) -> Self {
        Self {
            api,
            favorites,
            notifier,
            navigator,
            thumbnails,
            thumbnail_timeout: config.thumbnail_timeout,
            loading_id: None,
            page: None,
            media: Vec::new(),
            selected: None,
            favorited: false,
            error: None,
        }
    }

    pub fn page(&self) -> Option<&GigPage> {
        self.page.as_ref()
    }

    pub fn gig(&self) -> Option<&GigDetail> {
        self.page.as_ref().map(|page| &page.gig)
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn selected_media(&self) -> Option<&SelectedMedia> {
        self.selected.as_ref()
    }

    pub fn is_favorited(&self) -> bool {
        self.favorited
    }

    pub fn is_loading(&self) -> bool {
        self.loading_id.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start loading `gig_id`; earlier tickets become stale.
    pub fn begin_load(&mut self, gig_id: &str) -> LoadTicket {
        self.loading_id = Some(gig_id.to_string());
        self.error = None;
        LoadTicket {
            gig_id: gig_id.to_string(),
        }
    }

    /// Fetch the gig, its seller and its reviews. Seller and reviews degrade
    /// to placeholders instead of failing the page.
    pub async fn fetch(&self, ticket: &LoadTicket) -> ClientResult<GigPage> {
        let gig_id = ticket.gig_id();
        let response = self.api.gig_detail(gig_id).await?;
        let Some(gig) = response.gig else {
            return Err(ClientError::NotFound(format!("Gig {gig_id} not found")));
        };
        let freelancer_id = response
            .freelancer_id
            .or_else(|| gig.freelancer_id.clone())
            .unwrap_or_default();

        let (freelancer, reviews) = futures_util::join!(
            self.api.user(&freelancer_id),
            self.api.gig_reviews(gig_id)
        );
        let freelancer = freelancer.map(Freelancer::from).unwrap_or_else(|e| {
            warn!(%freelancer_id, "Error fetching freelancer: {e}");
            Freelancer::placeholder(freelancer_id.clone())
        });
        let reviews = reviews.unwrap_or_else(|e| {
            warn!(gig_id, "Error fetching reviews: {e}");
            Vec::new()
        });

        Ok(GigPage {
            gig,
            freelancer,
            reviews,
        })
    }

    /// Store a finished load. Returns false, changing nothing, if another gig
    /// has been requested since.
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: ClientResult<GigPage>) -> bool {
        if self.loading_id.as_deref() != Some(ticket.gig_id()) {
            debug!(gig_id = ticket.gig_id(), "Discarding stale gig detail");
            return false;
        }
        self.loading_id = None;
        match outcome {
            Ok(page) => {
                self.media = with_placeholders(&page.gig.media);
                self.selected = self.media.first().map(|item| SelectedMedia {
                    url: item.url.clone(),
                    kind: item.kind,
                });
                self.favorited = self.favorites.is_favorited(&page.gig.id);
                self.page = Some(page);
            }
            Err(e) => {
                error!(gig_id = ticket.gig_id(), "Error fetching gig detail: {e}");
                self.page = None;
                self.media.clear();
                self.selected = None;
                self.error = Some(if e.is_not_found() {
                    "Gig not found".to_string()
                } else {
                    format!("Failed to load gig: {}", e.user_message())
                });
            }
        }
        true
    }

    /// Swap placeholder video thumbnails for extracted frames.
    pub async fn extract_thumbnails(&mut self) {
        let Some(page) = &self.page else {
            return;
        };
        let gig_id = page.gig.id.clone();
        let filled =
            fill_video_thumbnails(&page.gig.media, self.thumbnails.as_ref(), self.thumbnail_timeout)
                .await;
        if self.gig().is_some_and(|gig| gig.id == gig_id) {
            self.media = filled;
        }
    }

    pub async fn load(&mut self, gig_id: &str) {
        let ticket = self.begin_load(gig_id);
        let outcome = self.fetch(&ticket).await;
        if self.finish_load(ticket, outcome) {
            self.extract_thumbnails().await;
        }
    }

    pub fn select_media(&mut self, index: usize) -> bool {
        match self.media.get(index) {
            Some(item) => {
                self.selected = Some(SelectedMedia {
                    url: item.url.clone(),
                    kind: item.kind,
                });
                true
            }
            None => false,
        }
    }

    fn loaded_gig(&self) -> ClientResult<&GigPage> {
        self.page
            .as_ref()
            .ok_or_else(|| ClientError::Validation("No gig loaded".to_string()))
    }

    fn report_failure(&self, action: &str, e: &ClientError) {
        error!("{action} failed: {e}");
        self.notifier.notify(Notification::error(e.user_message()));
    }

    pub async fn toggle_favorite(&mut self) -> ClientResult<bool> {
        let gig_id = self.loaded_gig()?.gig.id.clone();
        match self.favorites.toggle(&gig_id).await {
            Ok(favorite) => {
                self.favorited = favorite;
                self.notifier.notify(Notification::success(if favorite {
                    "Added to saved gigs"
                } else {
                    "Removed from saved gigs"
                }));
                Ok(favorite)
            }
            Err(e) => {
                self.report_failure("Favorite", &e);
                Err(e)
            }
        }
    }

    /// File a complaint about this gig. The description is checked locally
    /// first.
    pub async fn report(&self, reason: ReportReason, description: &str) -> ClientResult<()> {
        let result = async {
            let complaint = Complaint::new(reason, description)?;
            let gig_id = &self.loaded_gig()?.gig.id;
            ensure_can_write(self.api.session())?;
            self.api.report_gig(gig_id, &complaint).await
        }
        .await;
        match &result {
            Ok(()) => self
                .notifier
                .notify(Notification::success("Report submitted. Thank you!")),
            Err(e) => self.report_failure("Report", e),
        }
        result
    }

    /// Open (or create) the conversation with the seller.
    pub async fn contact_seller(&self) -> ClientResult<String> {
        let result = async {
            let freelancer_id = self.loaded_gig()?.freelancer.id.clone();
            let user_id = require_user(self.api.session())?;
            self.api.conversation_with(&freelancer_id, &user_id).await
        }
        .await;
        match result {
            Ok(conversation) => {
                self.navigator.navigate(&inbox_route(&conversation.id), false);
                Ok(conversation.id)
            }
            Err(e) => {
                self.report_failure("Contact seller", &e);
                Err(e)
            }
        }
    }

    /// Start checkout. Signed-out visitors are sent to sign in; locked
    /// accounts are refused.
    pub async fn order(&self) -> ClientResult<String> {
        let session = self.api.session();
        if !session.is_signed_in() {
            self.navigator.navigate(SIGN_IN_ROUTE, false);
            return Err(ClientError::NotSignedIn);
        }
        let result = async {
            ensure_can_write(session)?;
            let gig = &self.loaded_gig()?.gig;
            let request = PaymentRequest::for_gig(&gig.id, gig.price, Utc::now());
            self.api.create_payment(&request).await
        }
        .await;
        match result {
            Ok(url) => {
                info!(%url, "Redirecting to payment");
                self.navigator.redirect(&url);
                Ok(url)
            }
            Err(e) => {
                self.report_failure("Order", &e);
                Err(e)
            }
        }
    }

    /// Index of a review in the list, for highlighting a deep link.
    pub fn review_position(&self, review_id: &str) -> Option<usize> {
        self.page
            .as_ref()?
            .reviews
            .iter()
            .position(|review| review.id == review_id)
    }
}
