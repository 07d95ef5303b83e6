//! # microcred
//!
//! A terminal client for a micro-credentials learning platform: browse the
//! course catalog, log in or register, recover an account, and work through
//! enrolled courses and their assessments.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use microcred::{AppError, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::new(Some("https://api.example.com"), None)?;
//!     microcred::client::run(config).await
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod form;
pub mod http;
pub mod models;
pub mod terminal;
pub mod validation;

#[cfg(test)]
mod test_support;

use std::io;

use thiserror::Error;

pub use api::{ApiClient, Failure};
pub use config::{Config, ConfigError};
pub use form::{get_form_data, Form, FormData, FormValue};
pub use http::send_request;
pub use models::{Course, Session, User};

/// Error type for running the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}
