use serde::{Deserialize, Serialize};

use super::enums::UrgencyLevel;

/// Structured result of the symptom-analysis inference step. Created fresh
/// per request, never mutated after being returned, never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub pet_id: String,
    /// Unique per invocation, derived from submission time.
    pub analysis_id: String,
    #[serde(rename = "urgencyLevel")]
    pub urgency: UrgencyLevel,
    /// Clinical symptom category, e.g. "digestive", "respiratory".
    pub category: String,
    pub recommended_department: String,
    #[serde(default)]
    pub detailed_analysis: String,
    /// Probability-descending by convention of the producing model;
    /// never re-sorted here.
    #[serde(default)]
    pub disease_candidates: Vec<DiseaseCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseCandidate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub prevention: String,
    /// In [0, 1]; candidates are not required to sum to 1.
    #[serde(default = "default_probability")]
    pub probability: f64,
}

pub(crate) fn default_probability() -> f64 {
    0.5
}
