mod cli;

use clap::Parser;
use gradwork_client::auth::{AccountState, Session};
use gradwork_client::controllers::{
    BookmarkController, FavoritesStore, GigDetailController, SearchController,
};
use gradwork_client::media::PlaceholderExtractor;
use gradwork_client::models::categories::render_options;
use gradwork_client::ui::{LogNavigator, LogNotifier, Location, PageItem};
use gradwork_client::{ApiClient, ClientConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SearchArgs};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }

    let account = match &config.account_state_path {
        Some(path) => AccountState::persisted(path),
        None => AccountState::in_memory(),
    };
    let session = Arc::new(Session::new(account));
    if let Some(token) = cli.token {
        let claims = session.sign_in(&token)?;
        tracing::info!(user = %claims.sub, "Signed in");
    }
    if let Some(reason) = session.account().reason() {
        tracing::warn!("Account is locked: {reason}");
    }

    let api = ApiClient::new(&config, session);
    tracing::info!(api_url = %config.api_url, "Using marketplace API");

    match cli.command {
        Commands::Search(args) => search(api, args).await,
        Commands::Categories => {
            for option in render_options(&api.categories().await?) {
                let marker = if option.selectable { ' ' } else { '-' };
                println!("{marker} {}  [{}]", option.label, option.value);
            }
            Ok(())
        }
        Commands::Bookmarks => {
            let store = FavoritesStore::new(api.clone());
            let mut bookmarks = BookmarkController::new(api, store, Arc::new(LogNotifier));
            bookmarks.fetch().await;
            if let Some(error) = bookmarks.error() {
                return Err(error.into());
            }
            for gig in bookmarks.gigs() {
                println!("{}  {}  ${:.2}", gig.id, gig.title, gig.price);
            }
            Ok(())
        }
        Commands::Gig { id } => {
            let store = FavoritesStore::new(api.clone());
            if api.session().is_signed_in() {
                if let Err(e) = store.refresh().await {
                    tracing::warn!("Could not load favorites: {e}");
                }
            }
            let mut detail = GigDetailController::new(
                api,
                &config,
                store,
                Arc::new(LogNotifier),
                Arc::new(LogNavigator),
                Arc::new(PlaceholderExtractor),
            );
            detail.load(&id).await;
            if let Some(error) = detail.error() {
                return Err(error.into());
            }
            if let Some(page) = detail.page() {
                println!("{}  ${:.2}", page.gig.title, page.gig.price);
                println!("by {} (level {}, {:.1}★)", page.freelancer.name, page.freelancer.level, page.freelancer.rating);
                println!("{} media item(s), favorited: {}", detail.media().len(), detail.is_favorited());
                println!("\n{}\n", page.gig.description);
                for review in &page.reviews {
                    println!(
                        "- {:.1}★ {}",
                        review.rating.unwrap_or_default(),
                        review.comment.as_deref().unwrap_or_default()
                    );
                }
            }
            Ok(())
        }
    }
}

async fn search(
    api: ApiClient,
    args: SearchArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let min_price = args.min_price.map(|p| p.to_string());
    let max_price = args.max_price.map(|p| p.to_string());
    let location = Location::new(gradwork_client::controllers::search::SEARCH_ROUTE)
        .with("keyword", args.keyword.as_deref())
        .with("minPrice", min_price.as_deref())
        .with("maxPrice", max_price.as_deref())
        .with("category", args.category.as_deref());

    let mut controller = SearchController::new(api, Arc::new(LogNavigator), location);
    controller.run_search(args.sort, args.page).await;

    if let Some(message) = controller.message() {
        println!("{}", message.text());
        return Ok(());
    }
    let results = controller.results();
    println!("{} result(s), page {} of {}", results.total_results, args.page, results.total_pages);
    for gig in &results.items {
        println!("{}  {}  ${:.2}  {:.1}★", gig.id, gig.title, gig.price, gig.rating());
    }
    let pages: Vec<String> = gradwork_client::ui::page_window(args.page, results.total_pages)
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) if n == args.page => format!("[{n}]"),
            PageItem::Page(n) => n.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();
    println!("{}", pages.join(" "));
    Ok(())
}
