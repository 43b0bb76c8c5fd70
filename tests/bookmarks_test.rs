mod common;

use serde_json::json;
use std::sync::Arc;

use common::{MockApi, RecordingNotifier, gig_json, signed_in};
use gradwork_client::controllers::{BookmarkController, FavoritesStore};

fn bookmarks(mock: &MockApi, user: &str) -> (BookmarkController, FavoritesStore, Arc<RecordingNotifier>) {
    let api = mock.client(signed_in(user));
    let store = FavoritesStore::new(api.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = BookmarkController::new(api, store.clone(), notifier.clone());
    (controller, store, notifier)
}

#[actix_web::test]
async fn fetch_skips_deleted_gigs() {
    let mock = MockApi::start().await;
    mock.respond(
        "GET",
        "/favorite/get-list",
        200,
        json!({ "favorites": [gig_json("g1", "Logo design", 30.0), null, gig_json("g2", "Voice over", 15.0)] }),
    );
    let (mut saved, _, _) = bookmarks(&mock, "buyer-1");

    saved.fetch().await;

    let ids: Vec<&str> = saved.gigs().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);
    assert!(saved.error().is_none());
    assert!(!saved.is_loading());
    let requests = mock.requests_to("GET", "/favorite/get-list");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));
}

#[actix_web::test]
async fn fetch_failure_sets_error() {
    let mock = MockApi::start().await;
    mock.respond("GET", "/favorite/get-list", 500, json!({ "message": "Database unavailable" }));
    let (mut saved, _, _) = bookmarks(&mock, "buyer-1");

    saved.fetch().await;

    assert!(saved.gigs().is_empty());
    assert!(saved.error().unwrap().contains("Database unavailable"));
}

#[actix_web::test]
async fn store_refresh_and_toggle() {
    let mock = MockApi::start().await;
    mock.respond(
        "GET",
        "/favorite/get-list",
        200,
        json!({ "favorites": [gig_json("g1", "Logo design", 30.0)] }),
    );
    mock.respond("POST", "/favorite/g2", 200, json!({ "isFavorite": true }));
    mock.respond("POST", "/favorite/g1", 200, json!({ "isFavorite": false }));
    let (_, store, _) = bookmarks(&mock, "buyer-1");

    store.refresh().await.unwrap();
    assert!(store.is_favorited("g1"));
    assert!(!store.is_favorited("g2"));

    assert!(store.toggle("g2").await.unwrap());
    assert!(!store.toggle("g1").await.unwrap());
    assert!(store.is_favorited("g2"));
    assert!(!store.is_favorited("g1"));
    assert_eq!(store.len(), 1);
}

#[actix_web::test]
async fn remove_all_toggles_every_gig_and_clears() {
    let mock = MockApi::start().await;
    mock.respond(
        "GET",
        "/favorite/get-list",
        200,
        json!({ "favorites": [gig_json("g1", "Logo design", 30.0), gig_json("g2", "Voice over", 15.0)] }),
    );
    mock.respond("POST", "/favorite/g1", 200, json!({ "isFavorite": false }));
    mock.respond("POST", "/favorite/g2", 200, json!({ "isFavorite": false }));
    let (mut saved, store, notifier) = bookmarks(&mock, "buyer-1");
    saved.fetch().await;

    mock.respond("GET", "/favorite/get-list", 200, json!({ "favorites": [] }));
    saved.remove_all().await;

    assert!(saved.gigs().is_empty());
    assert_eq!(mock.requests_to("POST", "/favorite/g1").len(), 1);
    assert_eq!(mock.requests_to("POST", "/favorite/g2").len(), 1);
    assert!(store.is_empty());
    assert_eq!(notifier.successes().len(), 1);
}

#[actix_web::test]
async fn remove_all_on_locked_account_keeps_the_list() {
    let mock = MockApi::start().await;
    mock.respond(
        "GET",
        "/favorite/get-list",
        200,
        json!({ "favorites": [gig_json("g1", "Logo design", 30.0)] }),
    );
    mock.respond("POST", "/favorite/g1", 403, json!({ "message": "Locked" }));
    let (mut saved, _, notifier) = bookmarks(&mock, "buyer-1");
    saved.fetch().await;

    saved.remove_all().await;

    assert_eq!(saved.gigs().len(), 1);
    assert_eq!(saved.error(), Some("Locked"));
    assert_eq!(notifier.errors().len(), 1);

    // The account is locked now, so a second attempt never reaches the API.
    saved.remove_all().await;
    assert_eq!(mock.requests_to("POST", "/favorite/g1").len(), 1);
}

#[actix_web::test]
async fn unfavorited_drops_card_and_refreshes_store() {
    let mock = MockApi::start().await;
    mock.respond(
        "GET",
        "/favorite/get-list",
        200,
        json!({ "favorites": [gig_json("g1", "Logo design", 30.0), gig_json("g2", "Voice over", 15.0)] }),
    );
    let (mut saved, store, _) = bookmarks(&mock, "buyer-1");
    saved.fetch().await;

    mock.respond(
        "GET",
        "/favorite/get-list",
        200,
        json!({ "favorites": [gig_json("g2", "Voice over", 15.0)] }),
    );
    saved.unfavorited("g1").await;

    assert_eq!(saved.gigs().len(), 1);
    assert_eq!(saved.gigs()[0].id, "g2");
    assert!(store.is_favorited("g2"));
    assert!(!store.is_favorited("g1"));
}
