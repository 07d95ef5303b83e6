use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

/// Argument errors detected before a request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("\"{0}\" is not a valid HTTP request method")]
    InvalidMethod(String),
    #[error("a body can't be included in a GET or HEAD request")]
    BodyNotAllowed,
    #[error("if a body is specified then a Content-Type header must be included")]
    MissingContentType,
    #[error("\"{0}\" is not a valid resource locator")]
    InvalidUrl(String),
}

/// The nine standard request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Connect,
        Self::Options,
        Self::Trace,
        Self::Patch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether a request body is permitted.
    pub fn allows_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| RequestError::InvalidMethod(s.to_string()))
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Connect => Method::CONNECT,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Trace => Method::TRACE,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text(String),
    File {
        file_name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

/// Request payload.
///
/// `Form` is sent as `multipart/form-data`; the boundary header is generated,
/// so it is the only body kind that needs no explicit `Content-Type`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    Json(Value),
    Bytes(Vec<u8>),
    Form(Vec<(String, FormPart)>),
}

impl RequestBody {
    fn is_form(&self) -> bool {
        matches!(self, Self::Form(_))
    }
}

/// Status line and headers of a received response.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
}

impl ResponseHead {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Text(String),
    Binary(Vec<u8>),
}

impl ResponseData {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// How a body will be decoded, derived from its declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Text,
    Binary,
}

/// `<type>/json` → JSON, `text/<subtype>` → text, anything else → binary.
pub fn classify_content_type(content_type: &str) -> BodyKind {
    let Some((main, rest)) = content_type.split_once('/') else {
        return BodyKind::Binary;
    };
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    if let Some(subtype) = rest.get(..4) {
        if !main.is_empty()
            && subtype.eq_ignore_ascii_case("json")
            && rest[4..].chars().next().is_none_or(|c| !is_word(c))
        {
            return BodyKind::Json;
        }
    }

    if main.eq_ignore_ascii_case("text") && rest.chars().next().is_some_and(is_word) {
        return BodyKind::Text;
    }

    BodyKind::Binary
}

/// Send a request and decode whatever comes back.
///
/// Returns `Ok((None, None))` when the server cannot be reached. When a
/// response arrives its head is always returned; the data is `None` if the
/// body is empty, undeclared, or cannot be decoded as its declared type.
pub async fn send_request(
    client: &Client,
    method: HttpMethod,
    resource: &str,
    headers: Option<HeaderMap>,
    body: Option<RequestBody>,
) -> Result<(Option<ResponseHead>, Option<ResponseData>), RequestError> {
    if let Some(body) = &body {
        if !method.allows_body() {
            return Err(RequestError::BodyNotAllowed);
        }
        let has_content_type = headers
            .as_ref()
            .is_some_and(|headers| headers.contains_key(CONTENT_TYPE));
        if !body.is_form() && !has_content_type {
            return Err(RequestError::MissingContentType);
        }
    }

    let url = Url::parse(resource).map_err(|_| RequestError::InvalidUrl(resource.to_string()))?;

    let mut builder = client.request(method.into(), url);
    if let Some(headers) = headers {
        builder = builder.headers(headers);
    }
    builder = match body {
        Some(RequestBody::Text(text)) => builder.body(text),
        Some(RequestBody::Json(value)) => builder.body(value.to_string()),
        Some(RequestBody::Bytes(bytes)) => builder.body(bytes),
        Some(RequestBody::Form(parts)) => builder.multipart(build_multipart(parts)),
        None => builder,
    };

    debug!("[HTTP] {} {}", method, resource);

    let response = match builder.send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("[HTTP] {} {} could not be sent: {}", method, resource, err);
            return Ok((None, None));
        }
    };

    let head = ResponseHead {
        status: response.status(),
        headers: response.headers().clone(),
        url: response.url().clone(),
    };
    debug!("[HTTP] {} {} -> {}", method, resource, head.status);

    let kind = head.content_type().map(classify_content_type);
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("[HTTP] Failed to read body from {}: {}", resource, err);
            return Ok((Some(head), None));
        }
    };

    let data = match kind {
        _ if bytes.is_empty() => None,
        None => {
            debug!("[HTTP] Response from {} has no Content-Type", resource);
            None
        }
        Some(BodyKind::Json) => match serde_json::from_slice(&bytes) {
            Ok(value) => Some(ResponseData::Json(value)),
            Err(err) => {
                warn!("[HTTP] Malformed JSON from {}: {}", resource, err);
                None
            }
        },
        Some(BodyKind::Text) => Some(ResponseData::Text(
            String::from_utf8_lossy(&bytes).into_owned(),
        )),
        Some(BodyKind::Binary) => Some(ResponseData::Binary(bytes.to_vec())),
    };

    Ok((Some(head), data))
}

fn build_multipart(parts: Vec<(String, FormPart)>) -> multipart::Form {
    parts
        .into_iter()
        .fold(multipart::Form::new(), |form, (name, part)| match part {
            FormPart::Text(text) => form.text(name, text),
            FormPart::File {
                file_name,
                mime,
                bytes,
            } => {
                let file = match mime {
                    Some(mime) => multipart::Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(&mime)
                        .unwrap_or_else(|err| {
                            warn!("[HTTP] Ignoring MIME type {} for part {}: {}", mime, name, err);
                            multipart::Part::bytes(bytes).file_name(file_name)
                        }),
                    None => multipart::Part::bytes(bytes).file_name(file_name),
                };
                form.part(name, file)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{json_response, response, serve, unreachable_url};
    use reqwest::header::HeaderValue;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("PATCH".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert_eq!(HttpMethod::ALL.len(), 9);
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>(), Ok(method));
        }
        assert_eq!(
            "FETCH".parse::<HttpMethod>(),
            Err(RequestError::InvalidMethod("FETCH".to_string()))
        );
        assert!("get".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_classify_content_type() {
        assert_eq!(classify_content_type("application/json"), BodyKind::Json);
        assert_eq!(classify_content_type("application/JSON; charset=utf-8"), BodyKind::Json);
        assert_eq!(classify_content_type("text/json"), BodyKind::Json);
        assert_eq!(classify_content_type("application/jsonp"), BodyKind::Binary);
        assert_eq!(classify_content_type("application/vnd.api+json"), BodyKind::Binary);
        assert_eq!(classify_content_type("text/plain; charset=utf-8"), BodyKind::Text);
        assert_eq!(classify_content_type("TEXT/html"), BodyKind::Text);
        assert_eq!(classify_content_type("text/"), BodyKind::Binary);
        assert_eq!(classify_content_type("image/png"), BodyKind::Binary);
        assert_eq!(classify_content_type("garbage"), BodyKind::Binary);
    }

    #[tokio::test]
    async fn test_body_rejected_for_get_and_head() {
        let client = Client::new();
        for method in [HttpMethod::Get, HttpMethod::Head] {
            let result = send_request(
                &client,
                method,
                "http://127.0.0.1:9/never",
                Some(json_headers()),
                Some(RequestBody::Json(json!({}))),
            )
            .await;
            assert_eq!(result.unwrap_err(), RequestError::BodyNotAllowed);
        }
    }

    #[tokio::test]
    async fn test_body_requires_content_type() {
        let client = Client::new();
        let result = send_request(
            &client,
            HttpMethod::Post,
            "http://127.0.0.1:9/never",
            None,
            Some(RequestBody::Text("hello".into())),
        )
        .await;
        assert_eq!(result.unwrap_err(), RequestError::MissingContentType);

        let result = send_request(
            &client,
            HttpMethod::Post,
            "http://127.0.0.1:9/never",
            Some(HeaderMap::new()),
            Some(RequestBody::Bytes(vec![1, 2, 3])),
        )
        .await;
        assert_eq!(result.unwrap_err(), RequestError::MissingContentType);
    }

    #[tokio::test]
    async fn test_form_body_needs_no_content_type() {
        let client = Client::new();
        let url = unreachable_url().await;
        let body = RequestBody::Form(vec![("note".into(), FormPart::Text("hi".into()))]);
        let result = send_request(&client, HttpMethod::Post, &url, None, Some(body)).await;
        assert!(matches!(result, Ok((None, None))));
    }

    #[tokio::test]
    async fn test_unreachable_server_returns_nothing() {
        let client = Client::new();
        let url = unreachable_url().await;
        let result = send_request(&client, HttpMethod::Get, &url, None, None).await;
        assert!(matches!(result, Ok((None, None))));
    }

    #[tokio::test]
    async fn test_decodes_json() {
        let (base, server) = serve(vec![json_response(200, json!({"msg": "ok"}))]).await;
        let client = Client::new();

        let (head, data) = send_request(
            &client,
            HttpMethod::Post,
            &format!("{base}/echo"),
            Some(json_headers()),
            Some(RequestBody::Json(json!({"a": 1}))),
        )
        .await
        .unwrap();

        assert_eq!(head.unwrap().status, StatusCode::OK);
        assert_eq!(data, Some(ResponseData::Json(json!({"msg": "ok"}))));

        let requests = server.await.unwrap();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/echo");
        assert_eq!(requests[0].body, r#"{"a":1}"#);
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_decodes_text_and_binary() {
        let (base, _server) = serve(vec![
            response(200, Some("text/plain"), "hello"),
            response(200, Some("application/octet-stream"), "\u{1}\u{2}"),
        ])
        .await;
        let client = Client::new();

        let (_, data) = send_request(&client, HttpMethod::Get, &base, None, None)
            .await
            .unwrap();
        assert_eq!(data, Some(ResponseData::Text("hello".into())));

        let (_, data) = send_request(&client, HttpMethod::Get, &base, None, None)
            .await
            .unwrap();
        assert_eq!(data, Some(ResponseData::Binary(vec![1, 2])));
    }

    #[tokio::test]
    async fn test_error_status_is_a_normal_response() {
        let (base, _server) = serve(vec![json_response(503, json!({"msg": "db down"}))]).await;
        let client = Client::new();

        let (head, data) = send_request(&client, HttpMethod::Get, &base, None, None)
            .await
            .unwrap();
        let head = head.unwrap();
        assert_eq!(head.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!head.is_success());
        assert_eq!(data.unwrap().as_json(), Some(&json!({"msg": "db down"})));
    }

    #[tokio::test]
    async fn test_undecodable_body_keeps_head() {
        let (base, _server) = serve(vec![
            response(200, Some("application/json"), "{not json"),
            response(200, None, "mystery"),
            response(200, Some("application/json"), ""),
        ])
        .await;
        let client = Client::new();

        for _ in 0..3 {
            let (head, data) = send_request(&client, HttpMethod::Get, &base, None, None)
                .await
                .unwrap();
            assert_eq!(head.unwrap().status, StatusCode::OK);
            assert_eq!(data, None);
        }
    }
}
