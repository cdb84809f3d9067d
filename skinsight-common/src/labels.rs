//! Disease label set
//!
//! The classifier emits one probability per label, aligned by position to
//! [`DiseaseLabel::ALL`]. The order is part of the model contract and must
//! not be changed without retraining.

use std::fmt;
use std::str::FromStr;

/// One category the classifier can output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiseaseLabel {
    ActinicKeratosis,
    BasalCellCarcinoma,
    BenignKeratosis,
    Dermatofibroma,
    Melanoma,
    MelanocyticNevi,
    VascularNaevus,
}

/// Number of labels, and therefore the length of every probability vector
pub const LABEL_COUNT: usize = 7;

impl DiseaseLabel {
    /// Model output order
    pub const ALL: [DiseaseLabel; LABEL_COUNT] = [
        DiseaseLabel::ActinicKeratosis,
        DiseaseLabel::BasalCellCarcinoma,
        DiseaseLabel::BenignKeratosis,
        DiseaseLabel::Dermatofibroma,
        DiseaseLabel::Melanoma,
        DiseaseLabel::MelanocyticNevi,
        DiseaseLabel::VascularNaevus,
    ];

    /// Human-readable name as presented to users
    pub fn name(self) -> &'static str {
        match self {
            DiseaseLabel::ActinicKeratosis => "Actinic Keratosis",
            DiseaseLabel::BasalCellCarcinoma => "Basal Cell Carcinoma",
            DiseaseLabel::BenignKeratosis => "Benign Keratosis",
            DiseaseLabel::Dermatofibroma => "Dermatofibroma",
            DiseaseLabel::Melanoma => "Melanoma",
            DiseaseLabel::MelanocyticNevi => "Melanocytic Nevi",
            DiseaseLabel::VascularNaevus => "Vascular naevus",
        }
    }

    /// URL-safe identifier
    pub fn slug(self) -> &'static str {
        match self {
            DiseaseLabel::ActinicKeratosis => "actinic-keratosis",
            DiseaseLabel::BasalCellCarcinoma => "basal-cell-carcinoma",
            DiseaseLabel::BenignKeratosis => "benign-keratosis",
            DiseaseLabel::Dermatofibroma => "dermatofibroma",
            DiseaseLabel::Melanoma => "melanoma",
            DiseaseLabel::MelanocyticNevi => "melanocytic-nevi",
            DiseaseLabel::VascularNaevus => "vascular-naevus",
        }
    }

    /// Position in the model output vector
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|label| *label == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiseaseLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.slug() == s)
            .ok_or_else(|| format!("Unknown disease: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_output_order() {
        let names: Vec<&str> = DiseaseLabel::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            vec![
                "Actinic Keratosis",
                "Basal Cell Carcinoma",
                "Benign Keratosis",
                "Dermatofibroma",
                "Melanoma",
                "Melanocytic Nevi",
                "Vascular naevus",
            ]
        );
    }

    #[test]
    fn test_slug_round_trip_and_index() {
        for (i, label) in DiseaseLabel::ALL.into_iter().enumerate() {
            assert_eq!(label.slug().parse::<DiseaseLabel>().unwrap(), label);
            assert_eq!(label.index(), i);
        }
        assert!("eczema".parse::<DiseaseLabel>().is_err());
    }
}
