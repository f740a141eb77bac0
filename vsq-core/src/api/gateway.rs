//! src/api/gateway.rs
//! ============================================================================
//! # SearchGateway: Typed Client for the Remote Search Service
//!
//! The service owns indexing and ranking; this client reaches it through
//! exactly two operations:
//!
//! - `POST /build?corpus_dir=<path>` — (re)build the index over a corpus
//!   directory, answering a human-readable summary message.
//! - `GET /search?query=<text>` — rank indexed documents for a query,
//!   answering `{ query, results: [[label, score], ...], elapsed_time }`.
//!
//! Non-success statuses and 2xx bodies carrying an `error` field both
//! surface as [`AppError`]; callers never see wire DTOs.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::model::search::{ResultEntry, ResultSet};

/// HTTP client for the search service. Cheap to clone; all clones share
/// the same connection pool.
#[derive(Debug, Clone)]
pub struct SearchGateway {
    client: reqwest::Client,
    base_url: String,
}

impl SearchGateway {
    /// Client against `base_url` (no trailing slash) with a per-request
    /// timeout covering both operations.
    pub fn new<S: Into<String>>(base_url: S, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to (re)build its index over `corpus_dir`. Returns
    /// the service's summary message, e.g. "Indexed 10 files".
    pub async fn build_index(&self, corpus_dir: &str) -> Result<String, AppError> {
        let url = format!("{}/build", self.base_url);
        debug!("POST {url} corpus_dir={corpus_dir}");

        let response = self
            .client
            .post(&url)
            .query(&[("corpus_dir", corpus_dir)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http_status("Build index", status.as_u16()));
        }

        let body: BuildResponse = response.json().await?;
        if let Some(message) = body.error {
            return Err(AppError::service("Build index", message));
        }

        Ok(body.message.unwrap_or_default())
    }

    /// Rank indexed documents for `query`, preserving service rank order.
    pub async fn search(&self, query: &str) -> Result<ResultSet, AppError> {
        let url = format!("{}/search", self.base_url);
        debug!("GET {url} query={query}");

        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http_status("Search", status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        if let Some(message) = body.error {
            return Err(AppError::service("Search", message));
        }

        Ok(ResultSet {
            query: body.query.unwrap_or_else(|| query.to_string()),
            entries: body
                .results
                .unwrap_or_default()
                .into_iter()
                .map(|(label, score)| ResultEntry { label, score })
                .collect(),
            elapsed_secs: body.elapsed_time.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct BuildResponse {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<String>,
    results: Option<Vec<(String, f64)>>,
    elapsed_time: Option<f64>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> SearchGateway {
        SearchGateway::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_build_index_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/build"))
            .and(query_param("corpus_dir", "/docs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Indexed 10 files" })),
            )
            .mount(&server)
            .await;

        let message = gateway_for(&server).build_index("/docs").await.unwrap();

        assert_eq!(message, "Indexed 10 files");
    }

    #[tokio::test]
    async fn test_build_index_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/build"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway_for(&server).build_index("/docs").await.unwrap_err();

        assert!(err.to_string().contains("500"), "got: {err}");
    }

    #[tokio::test]
    async fn test_build_index_surfaces_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/build"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "error": "Invalid corpus directory" })),
            )
            .mount(&server)
            .await;

        let err = gateway_for(&server).build_index("/bogus").await.unwrap_err();

        assert!(err.to_string().contains("Invalid corpus directory"), "got: {err}");
    }

    #[tokio::test]
    async fn test_search_parses_ranked_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "neural networks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "neural networks",
                "results": [["paper1.txt", 0.82], ["paper2.txt", 0.41]],
                "elapsed_time": 0.013,
            })))
            .mount(&server)
            .await;

        let set = gateway_for(&server).search("neural networks").await.unwrap();

        assert_eq!(set.query, "neural networks");
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries[0].label, "paper1.txt");
        assert_eq!(set.entries[0].score, 0.82);
        assert_eq!(set.entries[1].label, "paper2.txt");
        assert_eq!(set.elapsed_secs, 0.013);
    }

    #[tokio::test]
    async fn test_search_surfaces_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = gateway_for(&server).search("anything").await.unwrap_err();

        assert!(err.to_string().contains("HTTP status 500"), "got: {err}");
    }

    #[tokio::test]
    async fn test_search_surfaces_unbuilt_index_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "error": "Index not built. Call /build first." })),
            )
            .mount(&server)
            .await;

        let err = gateway_for(&server).search("anything").await.unwrap_err();

        assert!(err.to_string().contains("Index not built"), "got: {err}");
    }

    #[tokio::test]
    async fn test_query_parameters_are_url_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "C++ & neural nets?"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "C++ & neural nets?",
                "results": [],
                "elapsed_time": 0.001,
            })))
            .mount(&server)
            .await;

        let set = gateway_for(&server).search("C++ & neural nets?").await.unwrap();

        assert!(set.is_empty());
    }
}
