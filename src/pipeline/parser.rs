//! Response parsing for both inference calls: unwrap the generateContent
//! envelope, strip code fences, then decode the JSON payload the prompt
//! asked for.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{AnalysisResult, DiseaseCandidate, Hospital, UrgencyLevel};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("response envelope has no candidates[0].content.parts[0].text")]
    MissingEnvelope,

    #[error("response text is empty")]
    EmptyText,

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Success envelope of `generateContent`.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

/// Pull the generated text out of the response envelope.
fn extract_text(raw: &str) -> Result<String, ParseError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    let text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or(ParseError::MissingEnvelope)?;

    if text.trim().is_empty() {
        return Err(ParseError::EmptyText);
    }
    Ok(text)
}

/// Models often wrap JSON in ``` fences despite instructions; strip them.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[derive(Deserialize)]
struct AnalysisPayload {
    #[serde(rename = "urgencyLevel")]
    urgency: UrgencyLevel,
    category: String,
    #[serde(rename = "recommendedDepartment")]
    recommended_department: String,
    #[serde(rename = "detailedAnalysis", default)]
    detailed_analysis: String,
    #[serde(rename = "diseaseCandidates", default)]
    disease_candidates: Vec<DiseaseCandidate>,
}

/// Decode a symptom-analysis response. Candidate order is kept as produced.
pub fn parse_analysis(
    raw: &str,
    pet_id: &str,
    analysis_id: String,
) -> Result<AnalysisResult, ParseError> {
    let text = extract_text(raw)?;
    let payload: AnalysisPayload = serde_json::from_str(strip_fences(&text))?;

    if payload.category.trim().is_empty() {
        return Err(ParseError::MissingField("category"));
    }
    if payload.recommended_department.trim().is_empty() {
        return Err(ParseError::MissingField("recommendedDepartment"));
    }

    Ok(AnalysisResult {
        pet_id: pet_id.to_string(),
        analysis_id,
        urgency: payload.urgency,
        category: payload.category,
        recommended_department: payload.recommended_department,
        detailed_analysis: payload.detailed_analysis,
        disease_candidates: payload.disease_candidates,
    })
}

/// Recommendation content before quota enforcement: guardian-facing text plus
/// the model's hospital picks resolved against the shortlist, in pick order.
/// `picks` is `None` when the response carried no hospital list at all, as
/// opposed to an explicitly empty one; quota enforcement words its fill
/// reasons differently for the two cases.
pub struct RecommendationDraft {
    pub guardian_message: String,
    pub immediate_actions: String,
    pub watch_for: String,
    pub picks: Option<Vec<(Hospital, String)>>,
}

#[derive(Deserialize)]
struct RecommendationPayload {
    #[serde(rename = "userFriendlyMessage")]
    guardian_message: String,
    #[serde(rename = "immediateActions", default)]
    immediate_actions: String,
    #[serde(rename = "watchFor", default)]
    watch_for: String,
    #[serde(rename = "recommendedHospitals")]
    picks: Option<Vec<HospitalPick>>,
}

#[derive(Deserialize)]
struct HospitalPick {
    #[serde(rename = "hospitalId")]
    hospital_id: String,
    #[serde(rename = "recommendationReason", default)]
    reason: String,
}

/// Decode a recommendation response. Picks whose id is not in the shortlist
/// are dropped with a diagnostic, never an error.
pub fn parse_recommendation(
    raw: &str,
    shortlist: &[Hospital],
) -> Result<RecommendationDraft, ParseError> {
    let text = extract_text(raw)?;
    let payload: RecommendationPayload = serde_json::from_str(strip_fences(&text))?;

    if payload.guardian_message.trim().is_empty() {
        return Err(ParseError::MissingField("userFriendlyMessage"));
    }

    let picks = payload.picks.map(|raw| {
        let mut resolved = Vec::new();
        for pick in raw {
            match shortlist.iter().find(|h| h.id == pick.hospital_id) {
                Some(hospital) => resolved.push((hospital.clone(), pick.reason)),
                None => tracing::warn!(
                    hospital_id = %pick.hospital_id,
                    "model picked a hospital outside the shortlist, dropping"
                ),
            }
        }
        resolved
    });

    Ok(RecommendationDraft {
        guardian_message: payload.guardian_message,
        immediate_actions: payload.immediate_actions,
        watch_for: payload.watch_for,
        picks,
    })
}
