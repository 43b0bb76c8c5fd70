pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod controllers;
pub mod error;
pub mod media;
pub mod models;
pub mod ui;
pub mod validation;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
