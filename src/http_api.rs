//! Native [`ScoringApi`] over blocking `ureq`, run on tokio's blocking pool.

use async_trait::async_trait;
use common::{
    FeatureImportance, FeatureVector, PerformanceSummary, PredictRequest, PredictResponse,
    PredictionLabel, endpoints,
};
use controller::{ApiError, ScoringApi};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, trace, warn};

/// How a non-success HTTP status is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusPolicy {
    /// Decode the body anyway; only an undecodable body is a failure.
    Lenient,
    /// Any non-success status is a failure.
    Strict,
}

/// Scoring service client. No timeouts are configured: a hung request
/// hangs only the section waiting for it.
#[derive(Clone)]
pub struct HttpScoringApi {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpScoringApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get<T>(&self, endpoint: &'static str, policy: StatusPolicy) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(endpoint);
        debug!("GET request to: {}", url);
        let agent = self.agent.clone();
        let result = run_blocking(move || {
            let response = agent.get(&url).call();
            read_json(endpoint, response, policy)
        })
        .await;
        log_result("GET", endpoint, &result);
        result
    }
}

#[async_trait(?Send)]
impl ScoringApi for HttpScoringApi {
    async fn predict(&self, features: &FeatureVector) -> Result<PredictionLabel, ApiError> {
        let url = self.url(endpoints::PREDICT);
        debug!("POST request to: {}", url);
        let agent = self.agent.clone();
        let request = PredictRequest {
            features: *features,
        };
        let result = run_blocking(move || {
            let response = agent.post(&url).send_json(&request);
            read_json::<PredictResponse>(endpoints::PREDICT, response, StatusPolicy::Lenient)
        })
        .await
        .map(|body| body.prediction);
        log_result("POST", endpoints::PREDICT, &result);
        result
    }

    async fn performance(&self) -> Result<PerformanceSummary, ApiError> {
        self.get(endpoints::PERFORMANCE, StatusPolicy::Lenient).await
    }

    async fn importance(&self) -> Result<Vec<FeatureImportance>, ApiError> {
        self.get(endpoints::IMPORTANCE, StatusPolicy::Strict).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Transport(format!("request task aborted: {}", e)))?
}

fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    response: Result<ureq::Response, ureq::Error>,
    policy: StatusPolicy,
) -> Result<T, ApiError> {
    let response = match response {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => match policy {
            StatusPolicy::Strict => return Err(ApiError::Status(code)),
            StatusPolicy::Lenient => {
                warn!("{} - Non-OK response: {}, decoding body anyway", endpoint, code);
                response
            }
        },
        Err(ureq::Error::Transport(err)) => {
            return Err(ApiError::Transport(err.to_string()));
        }
    };

    trace!("{} - Response received, parsing JSON", endpoint);
    let body = response
        .into_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn log_result<T>(method: &str, endpoint: &str, result: &Result<T, ApiError>) {
    match result {
        Ok(_) => info!("{} {} - Success", method, endpoint),
        Err(err) => error!("{} {} - {}", method, endpoint, err),
    }
}
