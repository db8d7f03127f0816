//! HTTP client for the remote listings API.
//!
//! A thin pass-through over four CRUD endpoints; all error classes normalize
//! into a single [`ApiError`].

use crate::config::ApiConfig;
use crate::listing::{Listing, ListingDraft, Summary};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("casa/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for the listings API.
///
/// Cheap to clone; the base URL is fixed at construction and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the configured base URL
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the listing collection, optionally filtered by a search query.
    ///
    /// An empty query means "no filter" and omits the `q` parameter entirely.
    pub async fn list(&self, query: Option<&str>) -> Result<Vec<Listing>, ApiError> {
        let mut request = self.http.get(format!("{}/listings", self.base_url));
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            request = request.query(&[("q", q)]);
        }
        let response = request.send().await?;
        decode(check(response)?).await
    }

    /// Fetch a single listing by id
    pub async fn get(&self, id: u64) -> Result<Listing, ApiError> {
        let response = self
            .http
            .get(format!("{}/listings/{}", self.base_url, id))
            .send()
            .await?;
        decode(check(response)?).await
    }

    /// Create a new listing; the response carries the server-assigned id
    pub async fn create(&self, draft: &ListingDraft) -> Result<Listing, ApiError> {
        let response = self
            .http
            .post(format!("{}/listings", self.base_url))
            .json(draft)
            .send()
            .await?;
        decode(check(response)?).await
    }

    /// Request a generated summary for a listing
    pub async fn summarize(&self, id: u64) -> Result<Summary, ApiError> {
        let response = self
            .http
            .post(format!("{}/listings/{}/summary", self.base_url, id))
            .send()
            .await?;
        decode(check(response)?).await
    }
}

fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json().await.map_err(ApiError::Decode)
}
