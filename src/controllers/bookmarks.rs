use futures_util::future::try_join_all;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tracing::{error, info};

use crate::api::ApiClient;
use crate::auth::authorization::ensure_can_write;
use crate::error::ClientResult;
use crate::models::gigs::GigSummary;
use crate::ui::{Notification, Notifier};

/// Ids of the signed-in user's favorited gigs, shared by every view that
/// shows a heart button.
#[derive(Clone)]
pub struct FavoritesStore {
    api: ApiClient,
    ids: Arc<RwLock<HashSet<String>>>,
}

impl FavoritesStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            ids: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Reload the id set from the favorite list.
    pub async fn refresh(&self) -> ClientResult<()> {
        let gigs = self.api.favorites().await?;
        self.replace(gigs.iter().map(|gig| gig.id.clone()));
        Ok(())
    }

    pub fn is_favorited(&self, gig_id: &str) -> bool {
        self.ids
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(gig_id)
    }

    pub fn len(&self) -> usize {
        self.ids.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flip a gig's favorite flag on the server and mirror the answer.
    pub async fn toggle(&self, gig_id: &str) -> ClientResult<bool> {
        ensure_can_write(self.api.session())?;
        let favorite = self.api.toggle_favorite(gig_id).await?;
        let mut ids = self.ids.write().unwrap_or_else(|e| e.into_inner());
        if favorite {
            ids.insert(gig_id.to_string());
        } else {
            ids.remove(gig_id);
        }
        Ok(favorite)
    }

    fn replace(&self, ids: impl IntoIterator<Item = String>) {
        *self.ids.write().unwrap_or_else(|e| e.into_inner()) = ids.into_iter().collect();
    }
}

/// The "saved gigs" page.
pub struct BookmarkController {
    api: ApiClient,
    store: FavoritesStore,
    notifier: Arc<dyn Notifier>,
    gigs: Vec<GigSummary>,
    loading: bool,
    error: Option<String>,
}

impl BookmarkController {
    pub fn new(api: ApiClient, store: FavoritesStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            store,
            notifier,
            gigs: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn gigs(&self) -> &[GigSummary] {
        &self.gigs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn fetch(&mut self) {
        self.loading = true;
        match self.api.favorites().await {
            Ok(gigs) => {
                self.gigs = gigs;
                self.error = None;
            }
            Err(e) => {
                error!("Error fetching favorites: {e}");
                self.error = Some(format!("Failed to load saved gigs: {}", e.user_message()));
            }
        }
        self.loading = false;
    }

    /// Un-save every listed gig at once.
    pub async fn remove_all(&mut self) {
        let toggles = self.gigs.iter().map(|gig| self.store.toggle(&gig.id));
        let result = try_join_all(toggles).await;
        match result {
            Ok(_) => {
                info!(count = self.gigs.len(), "Cleared saved gigs");
                self.gigs.clear();
                self.error = None;
                self.notifier
                    .notify(Notification::success("All saved gigs removed"));
            }
            Err(e) => {
                error!("Error clearing favorites: {e}");
                self.error = Some(e.user_message());
                self.notifier
                    .notify(Notification::error(format!("Could not remove saved gigs: {}", e.user_message())));
            }
        }
        if let Err(e) = self.store.refresh().await {
            error!("Error refreshing favorites: {e}");
        }
    }

    /// A card's heart was switched off elsewhere; drop it from the list.
    pub async fn unfavorited(&mut self, gig_id: &str) {
        self.gigs.retain(|gig| gig.id != gig_id);
        if let Err(e) = self.store.refresh().await {
            error!("Error refreshing favorites: {e}");
        }
    }
}
