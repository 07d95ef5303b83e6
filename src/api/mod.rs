//! Backend endpoints used by the client.

mod client;
mod outcome;

pub use client::{ApiClient, Registration};
pub use outcome::{Action, Failure, Rejection};
