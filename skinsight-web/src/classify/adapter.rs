//! Classifier adapter
//!
//! The trained model is an external collaborator reached through a fixed
//! contract: one normalized (1, 224, 224, 3) tensor in, one probability per
//! label out. [`TfServingAdapter`] speaks the TensorFlow Serving REST
//! predict API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{InferenceError, InputTensor};

const USER_AGENT: &str = concat!("skinsight/", env!("CARGO_PKG_VERSION"));

/// Anything that can score a preprocessed image
#[async_trait]
pub trait ClassifierAdapter: Send + Sync {
    /// Probability vector aligned to `DiseaseLabel::ALL`
    async fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError>;
}

/// `{"instances": [image]}` where image is rows of RGB triples
#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: [Vec<Vec<&'a [f32]>>; 1],
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f32>>,
}

/// Client for a TensorFlow Serving `:predict` endpoint
pub struct TfServingAdapter {
    http_client: reqwest::Client,
    endpoint: String,
}

impl TfServingAdapter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, InferenceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClassifierAdapter for TfServingAdapter {
    async fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
        let image: Vec<Vec<&[f32]>> = input
            .rows()
            .map(|row| row.chunks_exact(super::CHANNELS).collect())
            .collect();
        let request = PredictRequest { instances: [image] };

        debug!(endpoint = %self.endpoint, "Sending predict request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| InferenceError(format!("model server unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError(format!(
                "model server returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| InferenceError(format!("malformed model response: {}", e)))?;

        parsed
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError("model response held no predictions".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::preprocess;
    use crate::classify::preprocess::tests::solid_png;

    #[test]
    fn test_request_layout() {
        let tensor = preprocess(&solid_png(10, 10, [255, 255, 0])).unwrap();
        let image: Vec<Vec<&[f32]>> = tensor
            .rows()
            .map(|row| row.chunks_exact(3).collect())
            .collect();
        let json = serde_json::to_value(PredictRequest { instances: [image] }).unwrap();

        let instances = json["instances"].as_array().unwrap();
        assert_eq!(instances.len(), 1);
        let rows = instances[0].as_array().unwrap();
        assert_eq!(rows.len(), 224);
        assert_eq!(rows[0].as_array().unwrap().len(), 224);
        assert_eq!(rows[5][7], serde_json::json!([1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_response_parsing() {
        let parsed: PredictResponse =
            serde_json::from_str(r#"{"predictions": [[0.1, 0.2, 0.3, 0.1, 0.1, 0.1, 0.1]]}"#)
                .unwrap();
        assert_eq!(parsed.predictions[0].len(), 7);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_inference_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let adapter =
            TfServingAdapter::new("http://127.0.0.1:9/v1/models/x:predict", Duration::from_secs(2))
                .unwrap();
        let tensor = preprocess(&solid_png(4, 4, [0, 0, 0])).unwrap();

        let err = adapter.predict(&tensor).await.unwrap_err();
        assert!(err.0.contains("unreachable") || err.0.contains("returned"));
    }
}
