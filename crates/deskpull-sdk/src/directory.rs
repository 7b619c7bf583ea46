//! Account-directory REST client.
//!
//! Pulls users, licenses and license allocations with a static
//! `Token token=` authorization header.  Each pull is one GET; the
//! response nests its records under the endpoint name, so the frame
//! helpers unwrap that key before inferring a schema.

use polars::prelude::DataFrame;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::credentials::DirectoryKey;
use crate::error::PullError;
use crate::frame;

/// Prefix of the directory API's authorization scheme.
const TOKEN_PREFIX: &str = "Token token=";

/// Directory endpoints, keyed by the path segment and response key.
pub const USERS: &str = "users";
pub const LICENSES: &str = "licenses";
pub const LICENSE_ALLOCATIONS: &str = "license_allocations";

/// A directory API client bound to one base URL and one API key.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Build a client whose every request carries the selected key.
    pub fn new(base_url: &str, key: &DirectoryKey<'_>) -> Result<Self, PullError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let auth = format!("{TOKEN_PREFIX}{}", key.secret());
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|e| PullError::Config(format!("API key not header-safe: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One GET against `{base_url}/{endpoint}`, returning the raw body.
    pub async fn fetch(&self, endpoint: &str) -> Result<serde_json::Value, PullError> {
        let res = self
            .http
            .get(format!("{}/{endpoint}", self.base_url))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(PullError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: res.status(),
            });
        }

        Ok(res.json().await?)
    }

    /// Pull the user roster as a dataframe.
    pub async fn users(&self) -> Result<DataFrame, PullError> {
        let body = self.fetch(USERS).await?;
        frame::keyed_records_to_frame(&body, USERS)
    }

    /// Pull the license inventory as a dataframe.
    pub async fn licenses(&self) -> Result<DataFrame, PullError> {
        let body = self.fetch(LICENSES).await?;
        frame::keyed_records_to_frame(&body, LICENSES)
    }

    /// Pull per-user license allocations as a dataframe.
    pub async fn license_allocations(&self) -> Result<DataFrame, PullError> {
        let body = self.fetch(LICENSE_ALLOCATIONS).await?;
        frame::keyed_records_to_frame(&body, LICENSE_ALLOCATIONS)
    }
}
