//! Platform REST API HTTP client.

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use reqwest::{Client, RequestBuilder, StatusCode, cookie::Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Super-admin API client.
///
/// Sends JSON requests relative to the configured base URL and attaches the
/// bearer token to every call except the public onboarding endpoint.
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::build(&config.base_url, Some(config.token.as_str()), config.timeout_secs)
    }

    /// Create a client for an explicit base URL and token.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "https://api.example.com/api")
    /// * `token` - Bearer token; `None` or empty sends no Authorization header
    /// * `timeout_secs` - Per-request timeout
    pub fn build(base_url: &str, token: Option<&str>, timeout_secs: u64) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar)
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("school-admin-console/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.map(str::trim).filter(|t| !t.is_empty()).map(String::from),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url, path = path.trim_start_matches('/'))
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.get(self.url(path)), true).await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.send(self.client.get(self.url(path)).query(query), true).await
    }

    /// POST a JSON body to a mutation endpoint.
    ///
    /// Any success reply is accepted: a record, an acknowledgement, or no body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send_ack(self.client.post(self.url(path)).json(body)).await
    }

    /// POST without a body to a mutation endpoint.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.send_ack(self.client.post(self.url(path))).await
    }

    /// POST without a body and decode the reply.
    pub async fn post_empty_for<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.client.post(self.url(path)), true).await
    }

    /// PUT a JSON body to a mutation endpoint.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send_ack(self.client.put(self.url(path)).json(body)).await
    }

    /// DELETE a resource, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send_ack(self.client.delete(self.url(path))).await
    }

    /// POST to an unauthenticated endpoint.
    pub async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send(self.client.post(self.url(path)).json(body), false).await
    }

    /// Check that the base URL answers at all.
    ///
    /// Any HTTP response counts as reachable; only transport failures error.
    pub async fn ping(&self) -> Result<()> {
        let response = self.client.get(&self.base_url).send().await?;
        tracing::debug!("Ping {} -> {}", self.base_url, response.status());
        Ok(())
    }

    async fn send_ack(&self, request: RequestBuilder) -> Result<()> {
        self.send::<serde_json::Value>(request, true).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, authed: bool) -> Result<T> {
        let request = match (&self.token, authed) {
            (Some(token), true) => request.bearer_auth(token),
            _ => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            AppError::Http(e)
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        tracing::debug!("{} {}", status.as_u16(), url);

        if !status.is_success() {
            let err = error_from_response(status, &body);
            tracing::warn!("API call {} failed: {}", url, err);
            return Err(err);
        }

        decode_body(&body)
    }
}

/// Decode a success body, accepting a `{"data": ...}` envelope or a bare value.
///
/// An empty body decodes as JSON `null`, which suits `()` and `Option<T>`.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body)?
    };

    if let serde_json::Value::Object(map) = &value
        && let Some(data) = map.get("data")
        && let Ok(v) = serde_json::from_value::<T>(data.clone())
    {
        return Ok(v);
    }

    serde_json::from_value(value).map_err(AppError::from)
}

/// Map a non-success response to an error.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let message = error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(String::from)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return Some(msg.clone());
            }
        }
    }

    // Plain-text or HTML bodies: keep the first line, bounded
    let first_line = body.lines().next().unwrap_or(body);
    Some(first_line.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::School;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::build("http://localhost:8080/api/", None, 5).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/superadmin/plans"), "http://localhost:8080/api/superadmin/plans");
        assert_eq!(client.url("superadmin/plans"), "http://localhost:8080/api/superadmin/plans");
    }

    #[test]
    fn test_blank_token_ignored() {
        let client = ApiClient::build("http://localhost", Some("  "), 5).unwrap();
        assert!(!client.has_token());

        let client = ApiClient::build("http://localhost", Some("abc"), 5).unwrap();
        assert!(client.has_token());
    }

    #[test]
    fn test_decode_bare_and_enveloped() {
        let bare: Vec<School> = decode_body(r#"[{"id":1,"name":"Oak","plan":"basic","balance":0}]"#).unwrap();
        assert_eq!(bare.len(), 1);

        let wrapped: Vec<School> =
            decode_body(r#"{"data":[{"id":1,"name":"Oak","plan":"basic","balance":0}],"total":1}"#).unwrap();
        assert_eq!(wrapped[0].name, "Oak");
    }

    #[test]
    fn test_envelope_wins_for_defaulted_structs() {
        let stats: crate::models::DashboardStats = decode_body(r#"{"data":{"totalSchools":3}}"#).unwrap();
        assert_eq!(stats.total_schools, 3);
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        let _: () = decode_body("").unwrap();

        let none: Option<School> = decode_body("  ").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_decode_mismatch_is_parse_error() {
        let result: Result<Vec<School>> = decode_body(r#"{"items":[]}"#);
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_error_mapping() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, r#"{"message":"Token expired"}"#);
        assert!(matches!(err, AppError::Unauthorized(ref m) if m == "Token expired"));
        assert!(err.is_auth());

        let err = error_from_response(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Not Found"));

        let err = error_from_response(StatusCode::UNPROCESSABLE_ENTITY, r#"{"error":"Subdomain taken"}"#);
        assert!(matches!(err, AppError::Api { status: 422, ref message } if message == "Subdomain taken"));

        let err = error_from_response(StatusCode::BAD_GATEWAY, "<html>upstream down</html>\n<body>");
        assert!(matches!(err, AppError::Api { status: 502, ref message } if message == "<html>upstream down</html>"));
    }
}
