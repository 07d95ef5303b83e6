//! Terminal client for the learning platform.
//!
//! Talks to the backend over HTTP and renders the catalog, account and
//! course screens with ratatui.

mod client;
mod forms;
mod input;
mod state;
mod ui;

pub use client::run;
