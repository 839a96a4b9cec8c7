use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum gap between two real network fetches.
pub const COOL_DOWN: Duration = Duration::from_secs(10 * 60);

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormStats {
    pub total_votes: u32,
    pub this_week: u32,
    pub top_requests: Vec<RequestCount>,
    pub live_request: LiveRequest,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RequestCount {
    pub request: String,
    pub count: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LiveRequest {
    pub name: String,
    pub response: String,
}

/// What the page callback gets on every successful fetch. Labels are raw,
/// pre-normalization.
#[derive(Debug, Clone)]
pub struct StatsUpdate {
    pub total_votes: u32,
    pub this_week: u32,
    pub top_requests: Vec<RequestCount>,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP error! status: {status}, message: {message}")]
    Status { status: u16, message: String },
}

/// Network seam so the cool-down logic is testable without a server.
pub trait Transport {
    async fn fetch(&self) -> Result<FormStats, FetchError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self) -> Result<FormStats, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))
    }
}

/// One instance per voting page. Owns the cached snapshot and the
/// last-fetch stamp; nothing is shared across instances.
pub struct StatsClient<T> {
    transport: T,
    last_fetch: Option<Instant>,
    stats: Option<FormStats>,
    loading: bool,
    error: Option<String>,
}

impl<T: Transport> StatsClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            last_fetch: None,
            stats: None,
            loading: false,
            error: None,
        }
    }

    /// Fetches unless still inside the cool-down. The first call always
    /// goes out (no stamp yet). Skipping leaves every bit of state as-is.
    pub async fn fetch(&mut self, on_update: impl FnOnce(StatsUpdate)) {
        self.fetch_at(Instant::now(), on_update).await;
    }

    async fn fetch_at(&mut self, now: Instant, on_update: impl FnOnce(StatsUpdate)) {
        if let Some(last) = self.last_fetch {
            if now.duration_since(last) < COOL_DOWN {
                debug!("Skipping fetch: less than 10 minutes since last update");
                return;
            }
        }

        self.loading = true;

        match self.transport.fetch().await {
            Ok(stats) => {
                self.error = None;
                self.last_fetch = Some(now);

                on_update(StatsUpdate {
                    total_votes: stats.total_votes,
                    this_week: stats.this_week,
                    top_requests: stats.top_requests.clone(),
                });

                self.stats = Some(stats);
            }
            Err(e) => {
                // Previous snapshot stays readable; the stamp is not
                // advanced either, so a manual retry is never blocked.
                warn!("Stats fetch failed: {e}");
                self.error = Some(format!("Failed to load statistics: {e}"));
            }
        }

        self.loading = false;
    }

    pub fn stats(&self) -> Option<&FormStats> {
        self.stats.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
