//! HTTP Analysis Backend
//!
//! Implementation of the `AnalysisBackend` trait over the analysis service's
//! HTTP API:
//!
//! | Endpoint                 | Request                 | Response            |
//! |--------------------------|-------------------------|---------------------|
//! | `POST /analyze`          | multipart field `file`  | analysis result     |
//! | `POST /scenario`         | `ScenarioRequest`       | `{response}`        |
//! | `POST /benchmark`        | `BenchmarkRequest`      | `{response}`        |
//! | `POST /download_report`  | `ReportRequest`         | binary docx         |

use async_trait::async_trait;
use casefile_core::{AnalysisResult, DocumentHandle};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::{parse_http_error, AnalysisBackend};
use super::document::read_document;
use super::types::{
    BackendConfig, BackendError, BackendResult, BenchmarkRequest, ReportArtifact, ReportRequest,
    ScenarioRequest, TextResponse,
};
use crate::http_client::build_http_client;

const ANALYZE_PATH: &str = "analyze";
const SCENARIO_PATH: &str = "scenario";
const BENCHMARK_PATH: &str = "benchmark";
const REPORT_PATH: &str = "download_report";

/// Absolute endpoint URLs, computed once at construction.
#[derive(Debug, Clone)]
struct Endpoints {
    analyze: String,
    scenario: String,
    benchmark: String,
    report: String,
}

impl Endpoints {
    fn from_base(base_url: &str) -> BackendResult<Self> {
        let parsed = url::Url::parse(base_url).map_err(|e| BackendError::Config {
            message: format!("Invalid backend URL '{}': {}", base_url, e),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendError::Config {
                message: format!("Backend URL must be http(s): {}", base_url),
            });
        }
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            analyze: format!("{}/{}", base, ANALYZE_PATH),
            scenario: format!("{}/{}", base, SCENARIO_PATH),
            benchmark: format!("{}/{}", base, BENCHMARK_PATH),
            report: format!("{}/{}", base, REPORT_PATH),
        })
    }
}

/// Analysis service client over HTTP.
pub struct HttpAnalysisBackend {
    config: BackendConfig,
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpAnalysisBackend {
    /// Create a backend with a client built from `config`.
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let client = build_http_client(config.timeout)?;
        Self::with_reqwest_client(client, config)
    }

    /// Create a backend around an existing reqwest client.
    pub fn with_reqwest_client(
        client: reqwest::Client,
        config: BackendConfig,
    ) -> BackendResult<Self> {
        let endpoints = Endpoints::from_base(&config.base_url)?;
        Ok(Self {
            config,
            client,
            endpoints,
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Send a prepared request and fail on any non-success status.
    async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> BackendResult<reqwest::Response> {
        let response = request.send().await.map_err(BackendError::from_transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("[HttpBackend] {} failed with HTTP {}", endpoint, status.as_u16());
            return Err(parse_http_error(status.as_u16(), &body, endpoint));
        }
        Ok(response)
    }

    async fn post_json<B, T>(&self, url: &str, body: &B, endpoint: &str) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send_checked(self.client.post(url).json(body), endpoint)
            .await?;
        let body_text = response.text().await.map_err(BackendError::from_transport)?;
        serde_json::from_str(&body_text).map_err(|e| BackendError::InvalidResponse {
            message: format!("Failed to parse {} response: {}", endpoint, e),
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn analyze(&self, document: &DocumentHandle) -> BackendResult<AnalysisResult> {
        let bytes = read_document(document).await?;
        tracing::info!(
            "[HttpBackend] uploading '{}' ({} bytes, {})",
            document.name(),
            bytes.len(),
            document.media_type()
        );

        let part = Part::bytes(bytes.to_vec())
            .file_name(document.name().to_string())
            .mime_str(document.media_type())
            .map_err(|e| BackendError::DocumentError {
                message: format!("Invalid media type '{}': {}", document.media_type(), e),
            })?;
        let form = Form::new().part("file", part);

        let response = self
            .send_checked(
                self.client.post(&self.endpoints.analyze).multipart(form),
                ANALYZE_PATH,
            )
            .await?;
        let body_text = response.text().await.map_err(BackendError::from_transport)?;
        serde_json::from_str(&body_text).map_err(|e| BackendError::InvalidResponse {
            message: format!("Failed to parse analysis result: {}", e),
        })
    }

    async fn ask_scenario(&self, request: &ScenarioRequest) -> BackendResult<String> {
        let response: TextResponse = self
            .post_json(&self.endpoints.scenario, request, SCENARIO_PATH)
            .await?;
        Ok(response.response)
    }

    async fn benchmark(&self, request: &BenchmarkRequest) -> BackendResult<String> {
        let response: TextResponse = self
            .post_json(&self.endpoints.benchmark, request, BENCHMARK_PATH)
            .await?;
        Ok(response.response)
    }

    async fn render_report(&self, request: &ReportRequest) -> BackendResult<ReportArtifact> {
        let response = self
            .send_checked(
                self.client.post(&self.endpoints.report).json(request),
                REPORT_PATH,
            )
            .await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(BackendError::from_transport)?;
        Ok(ReportArtifact {
            bytes,
            content_type,
        })
    }
}
