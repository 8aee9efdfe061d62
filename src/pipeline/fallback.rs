//! Deterministic stand-in content for when the inference service fails or
//! returns something unusable. The pipeline degrades, it never errors.

use crate::models::{AnalysisResult, DiseaseCandidate, UrgencyLevel};

use super::parser::RecommendationDraft;

/// Reason attached to hospitals filled in from the ranked list when the model
/// returned a hospital list that did not cover the quota.
pub const QUOTA_FILL_REASON: &str = "nearby and accessible";

/// Reason used when the response carried no hospital list at all and every
/// slot comes from ranking.
pub const RANKED_FILL_REASON: &str = "nearby and offers the matching department";

const FALLBACK_ANALYSIS_TEXT: &str = "We could not complete an automated assessment \
right now. Based on the reported symptoms, a digestive issue is the most common \
explanation; please have an internal medicine veterinarian take a look.";

const FALLBACK_GUARDIAN_MESSAGE: &str = "We could not generate a detailed \
recommendation right now, but the hospitals below are close to you and can help.";

const FALLBACK_IMMEDIATE_ACTIONS: &str = "Keep your pet calm, withhold food for a \
few hours, and make sure fresh water is available.";

const FALLBACK_WATCH_FOR: &str = "Repeated vomiting, blood in vomit or stool, \
lethargy, or refusal to drink. Any of these means visit a hospital immediately.";

/// Conservative middle-of-the-road analysis used when the analysis call or
/// its parse fails. The analysis id is still freshly generated by the caller.
pub fn fallback_analysis(pet_id: &str, analysis_id: String) -> AnalysisResult {
    AnalysisResult {
        pet_id: pet_id.to_string(),
        analysis_id,
        urgency: UrgencyLevel::Medium,
        category: "digestive".to_string(),
        recommended_department: "internal medicine".to_string(),
        detailed_analysis: FALLBACK_ANALYSIS_TEXT.to_string(),
        disease_candidates: vec![DiseaseCandidate {
            name: "Gastroenteritis".to_string(),
            description: "Inflammation of the stomach and intestines.".to_string(),
            symptoms: "Vomiting, diarrhea, reduced appetite.".to_string(),
            cause: "Dietary indiscretion, infection, or sudden diet change.".to_string(),
            treatment: "Fluid support and a bland diet under veterinary guidance.".to_string(),
            prevention: "Consistent diet and keeping spoiled food out of reach.".to_string(),
            probability: 0.5,
        }],
    }
}

/// Recommendation content used when the recommendation call or its parse
/// fails. Carries no hospital list; quota enforcement fills every slot from
/// ranking.
pub fn fallback_draft() -> RecommendationDraft {
    RecommendationDraft {
        guardian_message: FALLBACK_GUARDIAN_MESSAGE.to_string(),
        immediate_actions: FALLBACK_IMMEDIATE_ACTIONS.to_string(),
        watch_for: FALLBACK_WATCH_FOR.to_string(),
        picks: None,
    }
}
