use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::hospital::Hospital;

/// Final guardian-facing recommendation produced by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRecommendation {
    #[serde(rename = "analysisResult")]
    pub analysis: AnalysisResult,
    #[serde(rename = "userFriendlyMessage")]
    pub guardian_message: String,
    pub immediate_actions: String,
    pub watch_for: String,
    /// Contiguous priorities 1..N matching list order, distinct hospitals.
    #[serde(rename = "recommendedHospitals")]
    pub hospitals: Vec<RankedHospital>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedHospital {
    pub hospital: Hospital,
    #[serde(rename = "recommendationReason")]
    pub reason: String,
    /// 1-based, contiguous, unique.
    pub priority: u32,
}
