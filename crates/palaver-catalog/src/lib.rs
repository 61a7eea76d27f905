//! HTTP client for the process-template catalog.
//!
//! The backend publishes named process templates; each template's config
//! carries the instruction pair used to seed a session. The fetch is gated on
//! both a backend base URL and a JWT being present — when either is missing
//! the fetch is skipped (logged, not an error), matching the session flow
//! where credentials arrive after page load. There is no retry and no cache;
//! callers refetch whenever the JWT or URL changes.

use palaver_types::ProcessTemplate;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Path of the published-templates endpoint, relative to the backend base URL.
pub const PUBLISHED_TEMPLATES_PATH: &str =
    "/services/evacore/api/process-templates/find-by-status-published";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a catalog fetch. On any of these the catalog stays empty.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog request rejected with status {0}")]
    Status(StatusCode),
}

pub struct CatalogClient {
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self {
            http: build_http_client(),
        }
    }

    /// Reuses an existing client (connection pool sharing).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetches the published process templates.
    ///
    /// Returns `Ok(None)` without issuing a request when the base URL or the
    /// JWT is blank. Non-2xx responses are a [`CatalogError::Status`].
    pub async fn fetch_published(
        &self,
        base_url: &str,
        jwt_token: &str,
    ) -> Result<Option<Vec<ProcessTemplate>>, CatalogError> {
        if base_url.trim().is_empty() {
            tracing::info!("process backend url not configured; skipping catalog fetch");
            return Ok(None);
        }
        if jwt_token.trim().is_empty() {
            tracing::info!("jwt token not available; skipping catalog fetch");
            return Ok(None);
        }

        let url = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            PUBLISHED_TEMPLATES_PATH
        );
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {jwt_token}"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let templates: Vec<ProcessTemplate> = response.json().await?;
        tracing::info!(count = templates.len(), "fetched published process templates");
        Ok(Some(templates))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .unwrap_or_default()
}
