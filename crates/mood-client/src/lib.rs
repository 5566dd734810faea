//! HTTP client for the mood recommendation service.
//!
//! This crate provides a Rust client for the service that classifies mood
//! text and picks songs for it. It handles:
//! - Building the JSON request for `POST /recommend`
//! - Treating any non-2xx status as a failure
//! - Decoding and validating the response body
//! - The `GET /health` probe
//!
//! Callers that only need "something that recommends" should depend on the
//! [`RecommendationService`] trait rather than on [`HttpRecommendationClient`].

use std::time::Duration;

use async_trait::async_trait;
use mood_types::{
    decode_health, decode_recommendation, ContractError, HealthStatus, RecommendationResult,
    RequestPayload,
};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Where the original backend listens when run locally.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";

/// Errors that can occur when talking to the recommendation service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Setup(String),

    #[error("Request to recommendation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Recommendation service responded with status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid response from recommendation service: {0}")]
    InvalidResponse(#[from] ContractError),
}

impl ClientError {
    /// Short category name, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidUrl { .. } => "invalid_url",
            ClientError::Setup(_) => "setup",
            ClientError::Transport(_) => "transport",
            ClientError::UnexpectedStatus { .. } => "status",
            ClientError::InvalidResponse(_) => "decode",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Anything that can turn mood text into recommendations.
///
/// ## Design Note
/// - `Send + Sync` so one service can be shared across submission tasks
/// - The payload is taken by value; each submission builds a fresh one
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Ask for songs matching the payload's mood text.
    async fn recommend(&self, payload: RequestPayload) -> Result<RecommendationResult>;

    /// Probe whether the service is up.
    async fn health(&self) -> Result<HealthStatus>;
}

/// Settings for [`HttpRecommendationClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` means requests run until the service answers or the
    /// connection fails.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: None,
        }
    }
}

/// reqwest-backed client for the recommendation service.
#[derive(Clone)]
pub struct HttpRecommendationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpRecommendationClient {
    /// Create a client for the service at `config.base_url`.
    ///
    /// No connection is made here; an unreachable service only shows up on
    /// the first request.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        info!("Using recommendation service at {}", base_url);

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Get the base URL this client sends requests to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            // The body is only kept for logs; failures are never shown in detail.
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                "Recommendation service returned an error status"
            );
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl RecommendationService for HttpRecommendationClient {
    async fn recommend(&self, payload: RequestPayload) -> Result<RecommendationResult> {
        let url = self.endpoint("recommend")?;
        debug!(
            "Requesting recommendations ({} chars, clustering: {})",
            payload.user_text.chars().count(),
            payload.use_clustering
        );

        let response = self.http.post(url).json(&payload).send().await.map_err(|e| {
            warn!("Recommendation request failed: {}", e);
            ClientError::Transport(e)
        })?;

        let body = Self::read_success_body(response).await?;
        let result = decode_recommendation(&body).map_err(|e| {
            warn!("Recommendation response rejected: {}", e);
            ClientError::InvalidResponse(e)
        })?;

        debug!(
            "Received {} recommendations for emotion '{}'",
            result.recommendations.len(),
            result.emotion
        );
        Ok(result)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("health")?;
        let response = self.http.get(url).send().await?;
        let body = Self::read_success_body(response).await?;
        Ok(decode_health(&body)?)
    }
}

/// Parse a base URL and make sure relative joins append to its path.
///
/// `Url::join` replaces the last path segment unless the path ends in `/`,
/// so `http://host/api` would otherwise resolve `recommend` to
/// `http://host/recommend`.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
