use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::SampleId,
    error::ServiceErrorBody,
    protocol::{
        AnalysisRequest, PredictionResponse, SoundsResponse, LISTEN_PATH, PREDICT_PATH,
        SOUNDS_PATH,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod catalog;
pub mod error;
pub mod report;
pub mod workflow;

pub use catalog::{load_catalog, CatalogLoader, SampleCatalog};
pub use error::ClientError;
pub use report::{classify_label, AnalyzeButton, ReportView, Verdict};
pub use workflow::{
    AnalysisOutcome, AnalysisTicket, FormState, PredictionWorkflow, WorkflowError,
    ANALYSIS_FAILED_MESSAGE,
};

/// Applied when no timeout is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Classification returned by the inference service for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub label: String,
    pub sound_id: Option<SampleId>,
}

/// Remote operations the catalog loader and prediction workflow depend on.
#[async_trait]
pub trait DiagnosisService: Send + Sync {
    async fn list_sounds(&self) -> Result<Vec<SampleId>, ClientError>;
    async fn predict(&self, request: &AnalysisRequest) -> Result<Prediction, ClientError>;
}

/// Service URLs derived from one configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn parse(base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(base_url.trim().trim_end_matches('/'))
            .map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_string()));
        }
        match base.scheme() {
            "http" | "https" => Ok(Self { base }),
            other => Err(invalid(format!("unsupported scheme {other:?}"))),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn sounds(&self) -> Url {
        self.join(&[SOUNDS_PATH])
    }

    pub fn predict(&self) -> Url {
        self.join(&[PREDICT_PATH])
    }

    /// Audio stream for a sample; the id is encoded as a single path segment.
    pub fn listen(&self, sample_id: &SampleId) -> Url {
        self.join(&[LISTEN_PATH, sample_id.as_str()])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[derive(Debug, Clone)]
pub struct HeartGuardClient {
    http: Client,
    endpoints: Endpoints,
}

impl HeartGuardClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoints = Endpoints::parse(base_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoints })
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        let detail = serde_json::from_slice::<ServiceErrorBody>(&body)
            .ok()
            .map(|body| body.message());
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    serde_json::from_slice(&body).map_err(|err| ClientError::MalformedBody(err.to_string()))
}

#[async_trait]
impl DiagnosisService for HeartGuardClient {
    async fn list_sounds(&self) -> Result<Vec<SampleId>, ClientError> {
        let url = self.endpoints.sounds();
        debug!(%url, "requesting sample catalog");
        let response = self.http.get(url).send().await?;
        let body: SoundsResponse = decode_response(response).await?;
        Ok(body.sounds)
    }

    async fn predict(&self, request: &AnalysisRequest) -> Result<Prediction, ClientError> {
        let url = self.endpoints.predict();
        debug!(%url, sample_id = %request.sample_id, "requesting prediction");
        let response = self.http.post(url).json(request).send().await?;
        let body: PredictionResponse = decode_response(response).await?;
        if let Some(echoed) = &body.sound_id {
            if echoed != &request.sample_id {
                warn!(
                    requested = %request.sample_id,
                    echoed = %echoed,
                    "prediction echoed a different sample id"
                );
            }
        }
        Ok(Prediction {
            label: body.prediction,
            sound_id: body.sound_id,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
