//! Ranking of raw classifier output

use skinsight_common::labels::{DiseaseLabel, LABEL_COUNT};

use super::{ClassifyError, InferenceError};

/// How many candidates a result presents
pub const TOP_K: usize = 3;

/// One candidate disease with its raw probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedLabel {
    pub label: DiseaseLabel,
    /// Raw model output in [0, 1]; ordering always uses this value
    pub probability: f32,
}

impl RankedLabel {
    /// Probability as a percentage rounded to 2 decimal places, for display
    pub fn percent(&self) -> f64 {
        (f64::from(self.probability) * 100.0 * 100.0).round() / 100.0
    }
}

/// Ranked outcome of one classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub top_label: DiseaseLabel,
    pub top_probability: f32,
    /// Up to [`TOP_K`] candidates, highest probability first
    pub ranked_labels: Vec<RankedLabel>,
}

impl ClassificationResult {
    pub fn top(&self) -> RankedLabel {
        RankedLabel {
            label: self.top_label,
            probability: self.top_probability,
        }
    }
}

/// Pair probabilities with labels by position and keep the best [`TOP_K`]
///
/// Equal probabilities keep label-set order (`sort_by` is stable). NaN
/// ranks below every real value. The vector is not required to sum to 1.
pub fn rank(probabilities: &[f32]) -> Result<ClassificationResult, ClassifyError> {
    if probabilities.len() != LABEL_COUNT {
        return Err(InferenceError(format!(
            "expected {} probabilities, model returned {}",
            LABEL_COUNT,
            probabilities.len()
        ))
        .into());
    }

    let mut ranked: Vec<RankedLabel> = DiseaseLabel::ALL
        .into_iter()
        .zip(probabilities.iter().copied())
        .map(|(label, probability)| RankedLabel { label, probability })
        .collect();

    ranked.sort_by(|a, b| sort_key(b.probability).total_cmp(&sort_key(a.probability)));
    ranked.truncate(TOP_K);

    let top = ranked
        .first()
        .copied()
        .ok_or_else(|| InferenceError("model returned no probabilities".to_string()))?;

    Ok(ClassificationResult {
        top_label: top.label,
        top_probability: top.probability,
        ranked_labels: ranked,
    })
}

fn sort_key(probability: f32) -> f32 {
    if probability.is_nan() {
        f32::NEG_INFINITY
    } else if probability == 0.0 {
        // fold -0.0 into 0.0 so total_cmp treats them as equal
        0.0
    } else {
        probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinsight_common::labels::DiseaseLabel::*;

    fn labels(result: &ClassificationResult) -> Vec<DiseaseLabel> {
        result.ranked_labels.iter().map(|r| r.label).collect()
    }

    #[test]
    fn test_reference_vector() {
        let result = rank(&[0.10, 0.05, 0.50, 0.02, 0.20, 0.10, 0.03]).unwrap();

        assert_eq!(result.top_label, BenignKeratosis);
        assert_eq!(result.top_probability, 0.50);
        assert_eq!(labels(&result), vec![BenignKeratosis, Melanoma, ActinicKeratosis]);

        let percents: Vec<f64> = result.ranked_labels.iter().map(|r| r.percent()).collect();
        assert_eq!(percents, vec![50.0, 20.0, 10.0]);
    }

    #[test]
    fn test_ties_keep_label_order() {
        let result = rank(&[0.1; LABEL_COUNT]).unwrap();
        assert_eq!(
            labels(&result),
            vec![ActinicKeratosis, BasalCellCarcinoma, BenignKeratosis]
        );

        let result = rank(&[0.0, 0.3, 0.0, 0.3, 0.0, 0.3, 0.1]).unwrap();
        assert_eq!(labels(&result), vec![BasalCellCarcinoma, Dermatofibroma, MelanocyticNevi]);

        let result = rank(&[0.0, -0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(
            labels(&result),
            vec![ActinicKeratosis, BasalCellCarcinoma, BenignKeratosis]
        );
    }

    #[test]
    fn test_sorted_by_raw_value_not_rounded_percent() {
        // Both round to 33.33% but the raw values still decide the order
        let result = rank(&[0.333301, 0.333304, 0.0, 0.0, 0.0, 0.0, 0.333302]).unwrap();
        assert_eq!(labels(&result), vec![BasalCellCarcinoma, VascularNaevus, ActinicKeratosis]);
        assert_eq!(result.ranked_labels[0].percent(), result.ranked_labels[1].percent());
    }

    #[test]
    fn test_top_matches_first_ranked() {
        let vectors: [[f32; LABEL_COUNT]; 4] = [
            [0.9, 0.01, 0.01, 0.02, 0.03, 0.02, 0.01],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            [0.2, 0.2, 0.1, 0.1, 0.1, 0.1, 0.2],
            [0.05, 0.6, 0.7, 0.8, 0.9, 0.3, 0.4],
        ];

        for probabilities in vectors {
            let result = rank(&probabilities).unwrap();
            assert_eq!(result.ranked_labels.len(), TOP_K);
            assert_eq!(result.top(), result.ranked_labels[0]);
            assert!(result
                .ranked_labels
                .windows(2)
                .all(|pair| pair[0].probability >= pair[1].probability));
        }
    }

    #[test]
    fn test_low_confidence_still_returns_three() {
        let result = rank(&[0.15, 0.14, 0.15, 0.14, 0.14, 0.14, 0.14]).unwrap();
        assert!(result.top_probability < 0.5);
        assert_eq!(labels(&result), vec![ActinicKeratosis, BenignKeratosis, BasalCellCarcinoma]);
    }

    #[test]
    fn test_nan_ranks_last() {
        let result = rank(&[f32::NAN, 0.1, 0.2, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(labels(&result), vec![BenignKeratosis, BasalCellCarcinoma, Dermatofibroma]);
    }

    #[test]
    fn test_wrong_length_is_inference_error() {
        for probabilities in [vec![], vec![0.5; 6], vec![0.1; 8]] {
            let err = rank(&probabilities).unwrap_err();
            assert!(matches!(err, ClassifyError::Inference(_)));
        }
    }
}
