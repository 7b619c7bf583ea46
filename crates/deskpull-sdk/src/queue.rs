//! Ticket-queue API client.
//!
//! Two-step flow: exchange client credentials for a bearer token at the
//! IDP's token endpoint, then pull tickets with that token.  One POST,
//! one GET per call; a non-success status aborts the pull with the
//! numeric code surfaced, and nothing is retried.

use reqwest::header;

use crate::credentials::QueueCredentials;
use crate::error::PullError;

/// Token endpoint path on the IDP host.
pub const TOKEN_PATH: &str = "/oauth2/v1/token";
/// Ticket resource path on the API host.
pub const TICKETS_PATH: &str = "/api/v2/tickets";

/// OAuth scope requested with the client-credentials grant.
const OAUTH_SCOPE: &str = "queue-api";

/// An authenticated queue API client.
///
/// Holds the bearer token obtained at connect time.  The token is used
/// as-is for the lifetime of the client; there is no refresh or expiry
/// tracking, matching the one-shot nature of the pulls.
#[derive(Debug, Clone)]
pub struct QueueClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl QueueClient {
    /// Exchange client credentials for a bearer token and return a
    /// client ready to issue authenticated calls.
    ///
    /// 1. `POST {idp_url}/oauth2/v1/token` with the session cookie and a
    ///    form-encoded client-credentials grant.
    /// 2. Extract `access_token` from the JSON body.
    ///
    /// No request timeout is configured; large queue exports can take
    /// minutes.
    pub async fn connect_with_client_credentials(
        idp_url: &str,
        api_url: &str,
        creds: &QueueCredentials,
    ) -> Result<Self, PullError> {
        let http = reqwest::Client::new();

        let res = http
            .post(format!("{idp_url}{TOKEN_PATH}"))
            .header(header::COOKIE, &creds.session_cookie)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("grant_type", "client_credentials"),
                ("scope", OAUTH_SCOPE),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(PullError::UnexpectedStatus {
                endpoint: TOKEN_PATH.to_string(),
                status: res.status(),
            });
        }

        let body: serde_json::Value = res.json().await?;
        let token = body["access_token"]
            .as_str()
            .ok_or_else(|| {
                PullError::TokenExchange("missing `access_token` in token response".into())
            })?
            .to_string();

        Ok(Self {
            http,
            api_url: api_url.to_string(),
            token,
        })
    }

    /// Pull every open ticket as raw JSON records.
    ///
    /// The queue API expects the raw token as the `Authorization` value,
    /// without a `Bearer ` prefix.
    pub async fn fetch_open_tickets(&self) -> Result<serde_json::Value, PullError> {
        let res = self
            .http
            .get(format!("{}{TICKETS_PATH}", self.api_url))
            .header(header::AUTHORIZATION, &self.token)
            .query(&[("status", "'Open'")])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(PullError::UnexpectedStatus {
                endpoint: TICKETS_PATH.to_string(),
                status: res.status(),
            });
        }

        Ok(res.json().await?)
    }

    /// The bearer token issued at connect time.
    pub fn token(&self) -> &str {
        &self.token
    }
}
