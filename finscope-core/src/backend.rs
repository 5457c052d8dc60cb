//! Analysis backend trait and the HTTP implementation.
//!
//! The `AnalysisBackend` trait lets the TUI worker and the CLI share one call
//! path, and lets tests swap in a canned backend.

use std::time::Duration;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::model::{AnalysisRequest, AnalysisResponse};
use crate::sample::sample_response;

pub trait AnalysisBackend: Send + Sync {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// Run one analysis. Exactly one request per call, no retries.
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, RequestError>;
}

/// `POST {api_url}/analyze` over reqwest's blocking client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(api_url: &str, timeout: Option<Duration>) -> Result<Self, RequestError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: analyze_url(api_url),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, RequestError> {
        Self::new(&config.api_url, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalysisBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, RequestError> {
        debug!(endpoint = %self.endpoint, symbol = %request.symbol, "POST /analyze");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| RequestError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

/// Serves the bundled sample response; used by `--demo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleBackend;

impl AnalysisBackend for SampleBackend {
    fn name(&self) -> &str {
        "sample"
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, RequestError> {
        Ok(sample_response(&request.symbol, &request.market))
    }
}

fn analyze_url(api_url: &str) -> String {
    format!("{}/analyze", api_url.trim_end_matches('/'))
}
