use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::json;

use crate::config::Config;
use crate::http::{send_request, HttpMethod, RequestBody};
use crate::models::{CourseCatalog, Session};

use super::outcome::{check_status, interpret, Action, Failure};

/// Data collected by the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_instructor: bool,
}

/// Typed access to the backend. Requests are never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: Config) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Exchange e-mail and password for a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Failure> {
        let Some(url) = self.endpoint("auth/login") else {
            return Err(Failure::Unreachable);
        };
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, basic_credentials(email, password)?);

        let (head, data) = send_request(&self.http, HttpMethod::Get, &url, Some(headers), None).await?;
        let session: Session = interpret(Action::Login, head, data)?;
        info!("[API] Logged in as {}", session.user.email);
        Ok(session)
    }

    pub async fn register(&self, registration: &Registration) -> Result<Session, Failure> {
        let Some(url) = self.endpoint("user") else {
            return Err(Failure::Unreachable);
        };
        let body = json!({
            "userInfo": {
                "name": registration.name,
                "email": registration.email,
            },
            "password": registration.password,
            "isInstructor": registration.is_instructor,
        });

        let (head, data) = send_request(
            &self.http,
            HttpMethod::Post,
            &url,
            Some(json_headers()),
            Some(RequestBody::Json(body)),
        )
        .await?;
        let session: Session = interpret(Action::Registration, head, data)?;
        info!("[API] Registered {}", session.user.email);
        Ok(session)
    }

    /// Ask the backend to e-mail a recovery code to `email`.
    pub async fn request_recovery(&self, email: &str) -> Result<(), Failure> {
        let Some(url) = self.endpoint("auth/recovery") else {
            return Err(Failure::Unreachable);
        };

        let (head, data) = send_request(
            &self.http,
            HttpMethod::Post,
            &url,
            Some(json_headers()),
            Some(RequestBody::Json(json!({ "email": email }))),
        )
        .await?;
        check_status(Action::RecoveryRequest, head, data.as_ref())
    }

    /// Set a new password using the e-mailed recovery code.
    pub async fn recover(&self, token: &str, new_password: &str) -> Result<Session, Failure> {
        let Some(url) = self.endpoint("auth/recovery") else {
            return Err(Failure::Unreachable);
        };
        let mut headers = json_headers();
        headers.insert(AUTHORIZATION, basic_credentials(token, new_password)?);

        let (head, data) = send_request(
            &self.http,
            HttpMethod::Patch,
            &url,
            Some(headers),
            Some(RequestBody::Json(json!({ "password": new_password }))),
        )
        .await?;
        interpret(Action::PasswordReset, head, data)
    }

    /// Fetch the public course list; authenticated when a session exists.
    pub async fn list_courses(&self, session: Option<&Session>) -> Result<CourseCatalog, Failure> {
        let Some(url) = self.endpoint("courses") else {
            return Err(Failure::Unreachable);
        };
        let headers = session.and_then(|session| bearer_headers(&session.access_token));

        let (head, data) = send_request(&self.http, HttpMethod::Get, &url, headers, None).await?;
        let catalog: CourseCatalog = interpret(Action::CourseListing, head, data)?;
        info!("[API] Loaded {} courses", catalog.all().len());
        Ok(catalog)
    }

    fn endpoint(&self, path: &str) -> Option<String> {
        let url = self.config.endpoint(path);
        if url.is_none() {
            warn!("[API] No server URL configured; /{} is unreachable", path);
        }
        url
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn basic_credentials(user: &str, password: &str) -> Result<HeaderValue, Failure> {
    let encoded = STANDARD.encode(format!("{}:{}", user, password));
    HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|_| Failure::Invalid("The credentials contain unsupported characters.".into()))
}

fn bearer_headers(token: &str) -> Option<HeaderMap> {
    match HeaderValue::from_str(&format!("Bearer {}", token)) {
        Ok(value) => {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            Some(headers)
        }
        Err(_) => {
            warn!("[API] Access token is not a valid header value; sending anonymously");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Rejection;
    use crate::test_support::{json_response, response, serve, unreachable_url};

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(Config::new(Some(base), Some(5)).unwrap()).unwrap()
    }

    fn session_json() -> serde_json::Value {
        json!({
            "access_token": "token-123",
            "user_info": {
                "name": "Ada",
                "email": "ada@example.com",
                "learnerData": {"courses": []},
                "instructorData": null
            }
        })
    }

    #[tokio::test]
    async fn test_login_sends_basic_credentials() {
        let (base, server) = serve(vec![json_response(200, session_json())]).await;

        let session = client_for(&base)
            .login("ada@example.com", "Secret!123")
            .await
            .unwrap();
        assert_eq!(session.access_token, "token-123");
        assert_eq!(session.user.name, "Ada");

        let requests = server.await.unwrap();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/auth/login");
        let expected = format!("Basic {}", STANDARD.encode("ada@example.com:Secret!123"));
        assert_eq!(requests[0].header("authorization"), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_login_not_registered() {
        let (base, _server) = serve(vec![json_response(404, json!({"msg": "no such user"}))]).await;

        let failure = client_for(&base)
            .login("new@example.com", "Secret!123")
            .await
            .unwrap_err();
        assert!(failure.is_not_registered());
    }

    #[tokio::test]
    async fn test_login_without_token_is_not_understood() {
        let (base, _server) = serve(vec![json_response(200, json!({"userUID": "u1"}))]).await;

        let failure = client_for(&base).login("a@b.io", "pw").await.unwrap_err();
        assert_eq!(failure, Failure::NotUnderstood);
    }

    #[tokio::test]
    async fn test_register_body() {
        let (base, server) = serve(vec![json_response(201, session_json())]).await;
        let registration = Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "Secret!1234".into(),
            is_instructor: true,
        };

        client_for(&base).register(&registration).await.unwrap();

        let requests = server.await.unwrap();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/user");
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(
            body,
            json!({
                "userInfo": {"name": "Ada", "email": "ada@example.com"},
                "password": "Secret!1234",
                "isInstructor": true
            })
        );
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let (base, _server) = serve(vec![json_response(403, json!({"msg": "exists"}))]).await;
        let registration = Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "Secret!1234".into(),
            is_instructor: false,
        };

        let failure = client_for(&base).register(&registration).await.unwrap_err();
        assert_eq!(
            failure,
            Failure::Rejected {
                status: 403,
                reason: Rejection::AlreadyRegistered
            }
        );
    }

    #[tokio::test]
    async fn test_recovery_round() {
        let (base, server) = serve(vec![
            response(202, None, ""),
            json_response(200, session_json()),
        ])
        .await;
        let api = client_for(&base);

        api.request_recovery("ada@example.com").await.unwrap();
        let session = api.recover("CODE42", "Brand!New123").await.unwrap();
        assert_eq!(session.user.email, "ada@example.com");

        let requests = server.await.unwrap();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/auth/recovery");
        assert_eq!(requests[1].method, "PATCH");
        let expected = format!("Basic {}", STANDARD.encode("CODE42:Brand!New123"));
        assert_eq!(requests[1].header("authorization"), Some(expected.as_str()));
        assert_eq!(requests[1].body, r#"{"password":"Brand!New123"}"#);
    }

    #[tokio::test]
    async fn test_list_courses_with_bearer() {
        let catalog = json!({"Courses_data": [{"title": "Rust", "components": []}]});
        let (base, server) = serve(vec![json_response(200, catalog)]).await;
        let session: Session = serde_json::from_value(session_json()).unwrap();

        let catalog = client_for(&base).list_courses(Some(&session)).await.unwrap();
        assert_eq!(catalog.visible_len(), 1);

        let requests = server.await.unwrap();
        assert_eq!(requests[0].path, "/courses");
        assert_eq!(requests[0].header("authorization"), Some("Bearer token-123"));
    }

    #[tokio::test]
    async fn test_unreachable_and_unconfigured() {
        let url = unreachable_url().await;
        assert_eq!(
            client_for(&url).list_courses(None).await.unwrap_err(),
            Failure::Unreachable
        );

        let api = ApiClient::new(Config::default()).unwrap();
        assert_eq!(api.login("a@b.io", "x").await.unwrap_err(), Failure::Unreachable);
    }
}
