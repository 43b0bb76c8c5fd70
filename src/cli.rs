use clap::{Parser, Subcommand};
use gradwork_client::models::search::SortMode;

#[derive(Parser, Debug)]
#[command(name = "gradwork-client")]
#[command(about = "Browse the Gradwork marketplace from the terminal", long_about = None)]
pub struct Cli {
    /// Bearer token of the signed-in user
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Override GRADWORK_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search gigs
    Search(SearchArgs),
    /// Print the category tree as the picker shows it
    Categories,
    /// List saved gigs (requires --token)
    Bookmarks,
    /// Show one gig with its seller and reviews
    Gig {
        id: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    #[arg(long)]
    pub keyword: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Category id
    #[arg(long)]
    pub category: Option<String>,

    /// recommended, hot, new, price_asc or price_desc
    #[arg(long, default_value = "recommended")]
    pub sort: SortMode,

    #[arg(long, default_value_t = 1)]
    pub page: u32,
}
