//! Reference content for the Know About Diseases page

use skinsight_common::DiseaseLabel;

/// What the page shows for one disease
#[derive(Debug, Clone, Copy)]
pub struct DiseaseInfo {
    pub label: DiseaseLabel,
    pub description: &'static str,
    pub symptoms: &'static [&'static str],
    pub causes: &'static [&'static str],
    pub solutions: &'static [&'static str],
}

/// Entries in label-set order
pub static DISEASES: [DiseaseInfo; 7] = [
    DiseaseInfo {
        label: DiseaseLabel::ActinicKeratosis,
        description: "Actinic keratoses are rough, scaly patches that develop after prolonged \
            exposure to ultraviolet radiation from the sun or tanning beds. They are precancerous \
            and occasionally progress to squamous cell carcinoma. They appear on sun-exposed areas \
            such as the face, scalp, hands and arms, may be red, pink or brown, and often feel like \
            sandpaper. Early treatment with cryotherapy or topical medication prevents progression.",
        symptoms: &[
            "Rough, scaly patches on sun-exposed areas like the face, scalp, hands, and arms.",
            "May feel like sandpaper or appear red, brown, or pink.",
            "Sometimes itchy or tender.",
        ],
        causes: &[
            "Prolonged sun exposure causing damage to skin cells.",
            "More common in fair-skinned individuals or those with a history of frequent sunburns.",
        ],
        solutions: &[
            "Use sunscreen daily and wear protective clothing.",
            "Avoid excessive sun exposure, especially during peak hours.",
            "Topical creams or cryotherapy (freezing the spots) may be prescribed.",
            "Consult a doctor if patches grow, change color, or bleed.",
        ],
    },
    DiseaseInfo {
        label: DiseaseLabel::BasalCellCarcinoma,
        description: "Basal cell carcinoma is the most common and least aggressive skin cancer. \
            It arises in the basal cells of the deepest layer of the epidermis, mostly as a result \
            of prolonged UV exposure. It shows as pearly or waxy bumps, flat lesions, or sores that \
            bleed and fail to heal. It rarely spreads, but left untreated it can damage surrounding \
            tissue. Surgical removal, radiation or topical treatment are effective when started early.",
        symptoms: &[
            "Pearly or waxy bumps, often with visible blood vessels.",
            "Flat, flesh-colored, or brownish scar-like lesions.",
            "Sores that bleed, crust, and do not heal.",
        ],
        causes: &[
            "UV radiation from sunlight or tanning beds.",
            "Chronic exposure to arsenic or radiation.",
        ],
        solutions: &[
            "Surgical removal of the affected area.",
            "Treatments like topical creams, radiation, or photodynamic therapy.",
            "Regular skin check-ups.",
            "Consult a doctor immediately.",
        ],
    },
    DiseaseInfo {
        label: DiseaseLabel::BenignKeratosis,
        description: "Benign keratosis, also called seborrheic keratosis, is a non-cancerous \
            growth that looks like a thickened, wart-like lesion. It is usually brown, black or \
            light tan with a slightly raised, waxy texture, and is most common in older adults on \
            the face, chest, shoulders or back. The cause is unclear and may be partly genetic. \
            These growths are harmless; removal is possible for cosmetic reasons.",
        symptoms: &[
            "Thickened, wart-like patches that are usually brown, black, or light tan.",
            "Typically painless and found on the trunk, face, or shoulders.",
        ],
        causes: &[
            "Age-related changes in skin cells.",
            "Possible genetic predisposition.",
        ],
        solutions: &[
            "Usually harmless and may not need treatment.",
            "Removal options include cryotherapy or minor surgery for cosmetic purposes.",
            "Consult a doctor if the lesion changes in appearance or becomes bothersome.",
        ],
    },
    DiseaseInfo {
        label: DiseaseLabel::Dermatofibroma,
        description: "Dermatofibroma is a small, firm, benign nodule that usually appears on the \
            legs or arms. It is red, brown or purple and can feel like a hard lump under the skin. \
            It is thought to form in reaction to minor injuries such as insect bites. It is mostly \
            painless, sometimes tender or itchy, and poses no health risk. Surgical removal is an \
            option for persistent discomfort.",
        symptoms: &[
            "Firm, small, round nodules on the skin, often on the legs or arms.",
            "Can be red, brown, or purple and feel like a hard lump.",
            "Sometimes itchy or tender when touched.",
        ],
        causes: &[
            "Exact cause unknown but may develop after minor skin injuries like insect bites or cuts.",
            "Common in adults, especially women.",
        ],
        solutions: &[
            "Usually harmless and does not require treatment.",
            "Can be surgically removed if bothersome.",
            "Consult a doctor if you notice rapid growth, color change, or pain.",
        ],
    },
    DiseaseInfo {
        label: DiseaseLabel::Melanoma,
        description: "Melanoma is a serious, potentially life-threatening skin cancer that \
            develops in melanocytes, the cells that produce skin pigment. It often starts as a mole \
            that changes size, shape or color, with irregular borders or several hues. Intense UV \
            exposure and genetic predisposition are the main causes. It can spread if not caught \
            early; prompt surgical removal, and immunotherapy or chemotherapy in advanced cases, \
            give the best outcomes.",
        symptoms: &[
            "New or changing moles with irregular shapes, multiple colors, or asymmetry.",
            "Lesions larger than 6mm in diameter or ones that bleed, itch, or scab.",
        ],
        causes: &[
            "UV radiation from the sun or tanning beds.",
            "Genetic factors or a history of severe sunburns.",
        ],
        solutions: &[
            "Early detection is key: surgical removal in early stages.",
            "Advanced cases may require chemotherapy, immunotherapy, or radiation.",
            "Use sunscreen and perform regular self-checks for unusual moles.",
            "Consult a doctor immediately, as melanoma is the most dangerous type of skin cancer.",
        ],
    },
    DiseaseInfo {
        label: DiseaseLabel::MelanocyticNevi,
        description: "Melanocytic nevi, commonly called moles, are benign clusters of melanocytes. \
            They can appear anywhere on the body and range from light brown to black. Most develop \
            in childhood or adolescence and stay harmless, though some change over time. Changes in \
            size, color or shape can signal melanoma and should be checked by a dermatologist.",
        symptoms: &[
            "Small, pigmented spots or growths on the skin, varying from light brown to black.",
            "Can be flat or raised and are generally round or oval.",
        ],
        causes: &[
            "Accumulation of pigment-producing cells (melanocytes).",
            "May be genetic or influenced by sun exposure.",
        ],
        solutions: &[
            "Regular monitoring to ensure no changes in size, shape, or color.",
            "Cosmetic removal if desired.",
            "Consult a doctor if a mole changes in appearance or begins to bleed, as it could indicate melanoma.",
        ],
    },
    DiseaseInfo {
        label: DiseaseLabel::VascularNaevus,
        description: "Vascular naevi, or vascular birthmarks, are abnormal clusters of blood \
            vessels in the skin that leave red, pink or purple marks at or shortly after birth, \
            such as port-wine stains or hemangiomas. Many fade over time; others persist and may be \
            treated for cosmetic or medical reasons. Laser therapy is common for marks that grow, \
            bleed or interfere with daily life.",
        symptoms: &[
            "Red, pink, or purple patches or spots, known as strawberry marks or port-wine stains.",
            "Can appear anywhere on the body, often noticeable at birth.",
        ],
        causes: &["Abnormal growth or clustering of blood vessels in the skin."],
        solutions: &[
            "Many fade naturally with time, especially in children.",
            "Laser therapy for persistent or cosmetically concerning marks.",
            "Consult a doctor if the mark grows rapidly or bleeds frequently.",
        ],
    },
];

pub fn info(label: DiseaseLabel) -> &'static DiseaseInfo {
    &DISEASES[label.index()]
}

/// Entry for a `?disease=` slug; unknown or missing slugs select the first
pub fn select(slug: Option<&str>) -> &'static DiseaseInfo {
    slug.and_then(|s| s.parse::<DiseaseLabel>().ok())
        .map(info)
        .unwrap_or(&DISEASES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_label_order() {
        for label in DiseaseLabel::ALL {
            let entry = info(label);
            assert_eq!(entry.label, label);
            assert!(!entry.description.is_empty());
            assert!(!entry.symptoms.is_empty());
            assert!(!entry.causes.is_empty());
            assert!(!entry.solutions.is_empty());
        }
    }

    #[test]
    fn test_select_by_slug() {
        assert_eq!(select(Some("melanoma")).label, DiseaseLabel::Melanoma);
        assert_eq!(select(Some("no-such-disease")).label, DiseaseLabel::ActinicKeratosis);
        assert_eq!(select(None).label, DiseaseLabel::ActinicKeratosis);
    }
}
