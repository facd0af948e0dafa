use async_trait::async_trait;
use common::{
    endpoints, FeatureImportance, FeatureVector, PerformanceSummary, PredictRequest,
    PredictResponse, PredictionLabel,
};
use controller::{ApiError, ScoringApi};
use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

async fn read_json<T>(method: &str, endpoint: &str, response: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    response.json::<T>().await.map_err(|e| {
        let error = ApiError::Decode(e.to_string());
        log::error!("{} {} - {}", method, endpoint, error);
        error
    })
}

/// Common GET request handler.
///
/// With `check_status` a non-OK response fails before its body is read;
/// without it the body is decoded whatever the status.
pub async fn get<T>(endpoint: &str, check_status: bool) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error = ApiError::Transport(e.to_string());
        log::error!("GET {} - {}", endpoint, error);
        error
    })?;

    if !response.ok() {
        if check_status {
            let error = ApiError::Status(response.status());
            log::error!("GET {} - {}", endpoint, error);
            return Err(error);
        }
        log::warn!("GET {} - Non-OK response: {}", endpoint, response.status());
    }

    let data = read_json("GET", endpoint, response).await?;
    log::info!("GET {} - Success", endpoint);
    Ok(data)
}

/// Common POST request handler. The response status is not checked.
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            let error = ApiError::Transport(format!("Failed to serialize request: {}", e));
            log::error!("POST {} - {}", endpoint, error);
            error
        })?
        .send()
        .await
        .map_err(|e| {
            let error = ApiError::Transport(e.to_string());
            log::error!("POST {} - {}", endpoint, error);
            error
        })?;

    if !response.ok() {
        log::warn!("POST {} - Non-OK response: {}", endpoint, response.status());
    }

    let data = read_json("POST", endpoint, response).await?;
    log::info!("POST {} - Success", endpoint);
    Ok(data)
}

/// The scoring service as seen from the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserScoringApi;

#[async_trait(?Send)]
impl ScoringApi for BrowserScoringApi {
    async fn predict(&self, features: &FeatureVector) -> Result<PredictionLabel, ApiError> {
        let request = PredictRequest {
            features: *features,
        };
        let response: PredictResponse = post(endpoints::PREDICT, &request).await?;
        Ok(response.prediction)
    }

    async fn performance(&self) -> Result<PerformanceSummary, ApiError> {
        get(endpoints::PERFORMANCE, false).await
    }

    async fn importance(&self) -> Result<Vec<FeatureImportance>, ApiError> {
        get(endpoints::IMPORTANCE, true).await
    }
}
