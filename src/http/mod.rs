//! Thin request helper over `reqwest`.
//!
//! [`send_request`] never fails because of what the server answered: any
//! status code comes back as a [`ResponseHead`] for the caller to branch on,
//! and an unreachable server yields `(None, None)`. Only argument misuse is
//! reported as an error, before any I/O happens.

mod request;

pub use request::{
    classify_content_type, send_request, BodyKind, FormPart, HttpMethod, RequestBody,
    RequestError, ResponseData, ResponseHead,
};
