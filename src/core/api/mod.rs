//! HTTP client for the listing service: listings, single records, NLP search, chat, health.

mod error;
mod query;

pub use error::ApiError;
pub use query::ParsedQuery;

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::core::app;
use crate::core::chat::{ChatRequest, ChatResponse};
use crate::core::config::Config;
use crate::core::filters::PropertyFilters;
use crate::core::page::PropertyPage;
use crate::core::property::Property;

/// Result of `GET /health`.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub up: bool,
    /// `status` field of the body when present (e.g. "UP", "DOWN").
    pub status: Option<String>,
}

/// Typed client over one `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url.trim())
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .ok_or_else(|| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(format!("{}/{}", app::NAME, app::VERSION))
            .build()?;
        Ok(Self { http, base })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.request_timeout)
    }

    /// Base URL without trailing slash, for messages.
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))
    }

    /// Send, map non-2xx to `Status`, and decode the body as JSON.
    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            log::warn!("API returned {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /properties` with the filter query.
    pub async fn fetch_properties(
        &self,
        filters: &PropertyFilters,
    ) -> Result<PropertyPage, ApiError> {
        let url = self.endpoint("properties")?;
        let query = filters.to_query_pairs();
        log::debug!("GET {} {:?}", url, query);
        self.send_json(self.http.get(url).query(&query)).await
    }

    /// `GET /properties/{id}`; 404 becomes `NotFound`.
    pub async fn fetch_property(&self, id: i64) -> Result<Property, ApiError> {
        let url = self.endpoint(&format!("properties/{}", id))?;
        log::debug!("GET {}", url);
        match self.send_json(self.http.get(url)).await {
            Err(ApiError::Status { status: 404, .. }) => Err(ApiError::NotFound(id)),
            other => other,
        }
    }

    /// `POST /properties/nlp-search` with the query as plain text.
    pub async fn nlp_search(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<PropertyPage, ApiError> {
        let url = self.endpoint("properties/nlp-search")?;
        log::debug!("POST {} page={} size={}", url, page, size);
        let req = self
            .http
            .post(url)
            .query(&[("page", page), ("size", size)])
            .header(CONTENT_TYPE, "text/plain")
            .body(query.to_string());
        self.send_json(req).await
    }

    /// `POST /properties/nlp-parse`: criteria the server extracts from a query.
    pub async fn nlp_parse(&self, query: &str) -> Result<ParsedQuery, ApiError> {
        let url = self.endpoint("properties/nlp-parse")?;
        log::debug!("POST {}", url);
        let req = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "text/plain")
            .body(query.to_string());
        self.send_json(req).await
    }

    /// `POST /api/chatbot/chat`.
    pub async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = self.endpoint("api/chatbot/chat")?;
        log::debug!(
            "POST {} (history={}, properties={})",
            url,
            request.conversation_history.len(),
            request.property_ids.as_ref().map_or(0, Vec::len)
        );
        self.send_json(self.http.post(url).json(request)).await
    }

    /// `GET /health`: 200 is up, 503 is down; anything else is an error.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint("health")?;
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        let up = match status {
            StatusCode::OK => true,
            StatusCode::SERVICE_UNAVAILABLE => false,
            other => {
                return Err(ApiError::Status {
                    status: other.as_u16(),
                    body,
                });
            }
        };
        let status = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("status")?.as_str().map(str::to_string));
        Ok(HealthStatus { up, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        for bad in ["", "localhost:8080", "ftp://example.com", "not a url"] {
            assert!(
                matches!(
                    ApiClient::new(bad, Duration::from_secs(1)),
                    Err(ApiError::InvalidBaseUrl(_))
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn endpoints_keep_base_path() {
        let c = ApiClient::new("http://example.com/idx", Duration::from_secs(1)).unwrap();
        assert_eq!(c.base_url(), "http://example.com/idx");
        assert_eq!(
            c.endpoint("properties/7").unwrap().as_str(),
            "http://example.com/idx/properties/7"
        );

        let c = ApiClient::new("http://localhost:8080", Duration::from_secs(1)).unwrap();
        assert_eq!(
            c.endpoint("api/chatbot/chat").unwrap().as_str(),
            "http://localhost:8080/api/chatbot/chat"
        );
    }
}

#[cfg(test)]
mod server_tests;
