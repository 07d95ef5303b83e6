//! Client-side field validation.
//!
//! Everything here runs before a request is built; a failure never reaches
//! the network.

mod email;
mod password;

pub use email::is_email;
pub use password::{password_feedback, PasswordFeedback, PasswordPolicy, PolicyViolation};

use thiserror::Error;

/// Raised when a value of the wrong shape is handed to a validator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Password must be a string.")]
    NotAString,
}
