//! Common utilities for NetBox API client
//!
//! `HttpClient` sends every request through one path: auth headers on the
//! way out, status classification on the way back.

pub mod query;

use crate::error::NetBoxError;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Paginated response wrapper from NetBox API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// HTTP client wrapper with authentication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path; absolute URLs (pagination links) pass through
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    pub fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Follow `next` links from `path` to the last page
    pub async fn fetch_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, NetBoxError> {
        let mut results = Vec::new();
        let mut next = Some(path.to_string());
        while let Some(page_path) = next {
            let page: PaginatedResponse<T> = self.get(&page_path).await?;
            debug!("Fetched {} of {} results", results.len() + page.results.len(), page.count);
            results.extend(page.results);
            next = page.next;
        }
        Ok(results)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetBoxError> {
        let text = self.send(Method::GET, path, None).await?.text().await?;
        decode(&Method::GET, path, &text)
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T, NetBoxError> {
        self.write(Method::POST, path, body).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T, NetBoxError> {
        self.write(Method::PATCH, path, body).await
    }

    /// Send a create or update and decode the object NetBox returns.
    ///
    /// A 2xx with an empty body is `EmptyResponse`, never success.
    async fn write<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, NetBoxError> {
        let text = self.send(method.clone(), path, Some(body)).await?.text().await?;
        decode_written(&method, path, &text)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, NetBoxError> {
        let url = self.build_url(path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json");
        match body {
            Some(body) => {
                debug!("{} {} with body: {}", method, url, body);
                request = request.json(body);
            }
            None => debug!("{} {}", method, url),
        }

        let response = request.send().await?;
        check_status(&method, path, response).await
    }

    /// Encode filters as a query string
    pub fn build_query_string(&self, filters: &[(&str, &str)]) -> String {
        filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Map a non-2xx response to an error carrying NetBox's payload
async fn check_status(method: &Method, path: &str, response: Response) -> Result<Response, NetBoxError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => NetBoxError::NotFound(format!("{} {} - {}", method, path, body)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            NetBoxError::Authentication(format!("{} - {}", status, body))
        }
        _ => NetBoxError::Api(format!("{} {} failed: {} - {}", method, path, status, body)),
    })
}

/// Decode the object a create or update returned
fn decode_written<T: DeserializeOwned>(method: &Method, path: &str, text: &str) -> Result<T, NetBoxError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return Err(NetBoxError::EmptyResponse(format!("{} {}", method, path)));
    }
    decode(method, path, text)
}

fn decode<T: DeserializeOwned>(method: &Method, path: &str, text: &str) -> Result<T, NetBoxError> {
    serde_json::from_str(text).map_err(|e| {
        NetBoxError::Api(format!(
            "{} {}: undecodable response: {} - Response (first 500 chars): {}",
            method,
            path,
            e,
            text.chars().take(500).collect::<String>()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new(Client::new(), "http://netbox:80/".to_string(), "abc".to_string())
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = http();
        assert_eq!(http.base_url(), "http://netbox:80");
        assert_eq!(http.build_url("/api/dcim/devices/"), "http://netbox:80/api/dcim/devices/");
        assert_eq!(
            http.build_url("https://other/api/dcim/devices/?offset=50"),
            "https://other/api/dcim/devices/?offset=50"
        );
    }

    #[test]
    fn test_build_query_string_encodes_values() {
        let http = http();
        assert_eq!(http.build_query_string(&[]), "");
        assert_eq!(
            http.build_query_string(&[("name", "core sw/1"), ("device_id", "4")]),
            "name=core%20sw%2F1&device_id=4"
        );
    }

    #[test]
    fn test_auth_header() {
        assert_eq!(http().auth_header(), "Token abc");
    }

    #[test]
    fn test_decode_error_keeps_response_excerpt() {
        let err = decode::<PaginatedResponse<serde_json::Value>>(&Method::GET, "/api/dcim/sites/", "<html>")
            .unwrap_err();
        match err {
            NetBoxError::Api(msg) => assert!(msg.contains("<html>"), "{}", msg),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_write_response_is_not_success() {
        for body in ["", "  \n", "{}"] {
            let err = decode_written::<serde_json::Value>(&Method::POST, "/api/dcim/sites/", body).unwrap_err();
            match err {
                NetBoxError::EmptyResponse(msg) => assert_eq!(msg, "POST /api/dcim/sites/"),
                other => panic!("expected EmptyResponse for {:?}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_written_object_decoded() {
        let site: serde_json::Value =
            decode_written(&Method::PATCH, "/api/dcim/sites/3/", r#"{"id": 3, "slug": "dc1"}"#).unwrap();
        assert_eq!(site["id"], 3);
    }
}
