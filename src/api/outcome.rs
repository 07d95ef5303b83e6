//! Failure kinds of a user action and the messages shown for them.

use log::warn;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::http::{RequestError, ResponseData, ResponseHead};

/// A user-initiated operation that talks to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Registration,
    RecoveryRequest,
    PasswordReset,
    CourseListing,
}

impl Action {
    pub fn failure_title(self) -> &'static str {
        match self {
            Self::Login => "Login failed.",
            Self::Registration => "Registration failed.",
            Self::RecoveryRequest => "Account recovery failed.",
            Self::PasswordReset => "Password reset failed.",
            Self::CourseListing => "Loading the courses failed.",
        }
    }
}

/// Meaning of a non-2xx status for this backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BadCredentials,
    AlreadyRegistered,
    NotRegistered,
    Unparsable,
    DatabaseUnavailable,
    GatewayTimeout,
    Other,
}

impl Rejection {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::BadCredentials,
            403 => Self::AlreadyRegistered,
            404 => Self::NotRegistered,
            406 => Self::Unparsable,
            503 => Self::DatabaseUnavailable,
            504 => Self::GatewayTimeout,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum Failure {
    /// Client-side validation failed; nothing was sent.
    #[error("{0}")]
    Invalid(String),
    #[error("the server could not be accessed")]
    Unreachable,
    #[error("the server answered {status}")]
    Rejected { status: u16, reason: Rejection },
    #[error("the response from the server was not understood")]
    NotUnderstood,
    #[error(transparent)]
    Request(#[from] RequestError),
}

const GENERIC: &str = "This application is having a bad day. Please reload or try again later.";

impl Failure {
    pub fn is_not_registered(&self) -> bool {
        matches!(
            self,
            Self::Rejected {
                reason: Rejection::NotRegistered,
                ..
            }
        )
    }

    /// Full text of the notification shown for this failure.
    pub fn user_message(&self, action: Action) -> String {
        let detail = match self {
            Self::Invalid(message) => return message.clone(),
            Self::Unreachable => "The server could not be accessed. Please try again later.",
            Self::NotUnderstood => {
                "The response from the server was not understood. Please reload or try again later."
            }
            Self::Request(_) => GENERIC,
            Self::Rejected { reason, .. } => match (reason, action) {
                (Rejection::BadCredentials, Action::Login) => "That was the wrong password.",
                (Rejection::BadCredentials, Action::PasswordReset) => {
                    "The recovery code was rejected."
                }
                (Rejection::BadCredentials, _) => "Your credentials were rejected. Please log in again.",
                (Rejection::AlreadyRegistered, Action::Login) => "That was the wrong password.",
                (Rejection::AlreadyRegistered, _) => {
                    "A user with these login credentials is already registered."
                }
                (Rejection::NotRegistered, _) => "No user is registered with that e-mail address.",
                (Rejection::Unparsable, _) => {
                    "The server couldn't make sense of the data that was sent to it. Please reload or try again later."
                }
                (Rejection::DatabaseUnavailable, _) => {
                    "The server couldn't access the database. Please try again later."
                }
                (Rejection::GatewayTimeout, _) => {
                    "The server took too long to respond. Please try again later."
                }
                (Rejection::Other, _) => GENERIC,
            },
        };

        format!("{}\n\n{}", action.failure_title(), detail)
    }
}

/// Turn a response into a typed result for `action`.
pub(crate) fn interpret<T: DeserializeOwned>(
    action: Action,
    head: Option<ResponseHead>,
    data: Option<ResponseData>,
) -> Result<T, Failure> {
    check_status(action, head, data.as_ref())?;

    let Some(ResponseData::Json(value)) = data else {
        warn!("[API] {:?} succeeded without a JSON body", action);
        return Err(Failure::NotUnderstood);
    };

    serde_json::from_value(value).map_err(|err| {
        warn!("[API] {:?} response did not match the expected shape: {}", action, err);
        Failure::NotUnderstood
    })
}

/// Succeed on any 2xx, ignoring the body.
pub(crate) fn check_status(
    action: Action,
    head: Option<ResponseHead>,
    data: Option<&ResponseData>,
) -> Result<(), Failure> {
    let Some(head) = head else {
        return Err(Failure::Unreachable);
    };

    if head.is_success() {
        return Ok(());
    }

    let server_message = data
        .and_then(ResponseData::as_json)
        .and_then(|json| json.get("msg"))
        .and_then(|msg| msg.as_str())
        .unwrap_or("");
    warn!(
        "[API] {:?} rejected with HTTP {} -- \"{}\"",
        action, head.status, server_message
    );

    Err(Failure::Rejected {
        status: head.status.as_u16(),
        reason: Rejection::from_status(head.status),
    })
}
