//! Classification pipeline
//!
//! `classify(image bytes)` = preprocess, ask the adapter, rank. The
//! pipeline keeps no state between invocations and caches nothing.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

mod adapter;
mod preprocess;
mod ranking;
mod upload;

pub use adapter::{ClassifierAdapter, TfServingAdapter};
pub use preprocess::{preprocess, InputTensor, CHANNELS, INPUT_SIZE};
pub use ranking::{rank, ClassificationResult, RankedLabel, TOP_K};
pub use upload::{StagedUpload, Upload, UploadError, UploadStaging, ALLOWED_EXTENSIONS};

/// Failure reported by the classifier adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// Why a classification produced no result
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("The uploaded file could not be read as an image ({0}).")]
    Decode(String),

    #[error("The classifier could not process the image ({0}).")]
    Inference(#[from] InferenceError),
}

/// Preprocess, infer and rank
pub struct ClassificationPipeline {
    adapter: Arc<dyn ClassifierAdapter>,
    confidence_threshold: f32,
}

impl ClassificationPipeline {
    pub fn new(adapter: Arc<dyn ClassifierAdapter>, confidence_threshold: f32) -> Self {
        Self {
            adapter,
            confidence_threshold,
        }
    }

    /// Classify encoded image bytes
    ///
    /// Decoding and resampling run on a blocking worker. The confidence
    /// threshold is only reported; the top candidates are returned either way.
    pub async fn classify(&self, image_bytes: Vec<u8>) -> Result<ClassificationResult, ClassifyError> {
        let tensor = tokio::task::spawn_blocking(move || preprocess(&image_bytes))
            .await
            .map_err(|e| ClassifyError::Decode(format!("decoder task failed: {}", e)))??;

        let probabilities = self.adapter.predict(&tensor).await?;
        let result = rank(&probabilities)?;

        if result.top_probability < self.confidence_threshold {
            debug!(
                top = %result.top_label,
                probability = result.top_probability,
                threshold = self.confidence_threshold,
                "Top prediction below confidence threshold"
            );
        }

        Ok(result)
    }

    /// Classify a staged upload, consuming it
    ///
    /// The staged file is removed when this returns, whatever the outcome.
    pub async fn classify_staged(
        &self,
        upload: StagedUpload,
    ) -> Result<ClassificationResult, ClassifyError> {
        let bytes = upload
            .read()
            .await
            .map_err(|e| ClassifyError::Decode(e.to_string()))?;
        let outcome = self.classify(bytes).await;
        drop(upload);

        if let Ok(result) = &outcome {
            info!(
                top = %result.top_label,
                probability = result.top_probability,
                "Classification completed"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::preprocess::tests::solid_png;
    use async_trait::async_trait;
    use skinsight_common::DiseaseLabel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FixedAdapter {
        output: Result<Vec<f32>, InferenceError>,
        calls: AtomicUsize,
    }

    impl FixedAdapter {
        fn new(output: Result<Vec<f32>, InferenceError>) -> Arc<Self> {
            Arc::new(Self {
                output,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ClassifierAdapter for FixedAdapter {
        async fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError> {
            assert_eq!(input.shape(), [1, 224, 224, 3]);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output.clone()
        }
    }

    const REFERENCE: [f32; 7] = [0.10, 0.05, 0.50, 0.02, 0.20, 0.10, 0.03];

    #[tokio::test]
    async fn test_classify_end_to_end() {
        let adapter = FixedAdapter::new(Ok(REFERENCE.to_vec()));
        let pipeline = ClassificationPipeline::new(adapter.clone(), 0.5);

        let result = pipeline.classify(solid_png(50, 40, [120, 80, 60])).await.unwrap();
        assert_eq!(result.top_label, DiseaseLabel::BenignKeratosis);
        assert_eq!(result.ranked_labels.len(), 3);
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_bytes_never_reach_adapter() {
        let adapter = FixedAdapter::new(Ok(REFERENCE.to_vec()));
        let pipeline = ClassificationPipeline::new(adapter.clone(), 0.5);

        let err = pipeline.classify(b"GIF89a broken".to_vec()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)));
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_adapter_failure_is_inference_error() {
        let adapter = FixedAdapter::new(Err(InferenceError("model offline".to_string())));
        let pipeline = ClassificationPipeline::new(adapter, 0.5);

        let err = pipeline.classify(solid_png(8, 8, [1, 2, 3])).await.unwrap_err();
        assert_eq!(err, ClassifyError::Inference(InferenceError("model offline".to_string())));
    }

    #[tokio::test]
    async fn test_staged_upload_removed_on_every_outcome() {
        let dir = TempDir::new().unwrap();
        let staging = UploadStaging::new(dir.path());

        let ok = ClassificationPipeline::new(FixedAdapter::new(Ok(REFERENCE.to_vec())), 0.5);
        let failing = ClassificationPipeline::new(
            FixedAdapter::new(Err(InferenceError("boom".to_string()))),
            0.5,
        );

        let cases: [(&ClassificationPipeline, Vec<u8>, bool); 3] = [
            (&ok, solid_png(16, 16, [9, 9, 9]), true),
            (&ok, b"not an image".to_vec(), false),
            (&failing, solid_png(16, 16, [9, 9, 9]), false),
        ];

        for (pipeline, bytes, succeeds) in cases {
            let staged = staging.stage(Upload::new("x.png", bytes).unwrap()).await.unwrap();
            let path = staged.path().to_path_buf();

            let outcome = pipeline.classify_staged(staged).await;
            assert_eq!(outcome.is_ok(), succeeds);
            assert!(!path.exists(), "staged file must be removed");
        }
    }
}
