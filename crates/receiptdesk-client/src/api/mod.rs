//! REST client for the receipt backend
//!
//! Endpoints are grouped by resource:
//! - api::receipts: receipt existence checks, generation, email delivery
//! - api::organizations: organization profile
//! - api::logos: organization logo
//! - api::email: delivery settings and test messages
//! - api::quickbooks: connection status, transactions, disconnect
//! - api::options: server-side key-value options
//! - api::items: transaction line items
//! - api::feedback: feedback and beta signup

pub mod email;
pub mod feedback;
pub mod items;
pub mod logos;
pub mod options;
pub mod organizations;
pub mod quickbooks;
pub mod receipts;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};
use receiptdesk_config::ServerConfig;

/// Percent-encode one path segment
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// HTTP client bound to one backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &ServerConfig) -> ApiResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- request helpers ----

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let response = self.send(Method::POST, path, body).await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        Self::parse_response(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::DELETE, path, None::<&()>).await?;
        Self::parse_response(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response> {
        log::debug!("{} {}", method, path);
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::ensure_success(response).await
    }

    /// Turn a non-2xx response into [`ApiError::Status`] with the server's
    /// message
    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body);
        log::debug!("Request failed ({}): {}", status, error);
        Err(error)
    }

    /// Decode a JSON body. An empty body decodes as JSON `null`, so unit
    /// and `Option` targets accept it.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let text = response.text().await?;
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}

/// Accepts either a bare value or the value wrapped in an object under `key`
pub(crate) fn unwrap_field<T: DeserializeOwned>(value: serde_json::Value, key: &str) -> ApiResult<T> {
    let inner = match value {
        serde_json::Value::Object(mut map) if map.contains_key(key) => {
            map.remove(key).unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("abc-1"), "abc-1");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = ApiClient::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/api/logos"), "http://localhost:3000/api/logos");
    }

    #[test]
    fn test_unwrap_field() {
        let wrapped: Vec<u32> = unwrap_field(serde_json::json!({ "items": [1, 2] }), "items").unwrap();
        assert_eq!(wrapped, vec![1, 2]);
        let bare: Vec<u32> = unwrap_field(serde_json::json!([3]), "items").unwrap();
        assert_eq!(bare, vec![3]);
    }
}
