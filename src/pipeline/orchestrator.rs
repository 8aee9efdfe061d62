//! End-to-end triage: fetch the pet, run the analysis call, rank hospitals,
//! run the recommendation call, and enforce the recommendation quota.
//!
//! Only two failures escape: an unknown pet id and a store failure. Every
//! inference or parse failure is absorbed by deterministic fallbacks.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{Hospital, HospitalRecommendation, RankedHospital, SymptomReport};
use crate::store::{HospitalCatalog, PetDirectory, StoreError};

use super::clock::{self, Clock};
use super::fallback;
use super::gemini::InferenceClient;
use super::{parser, prompt, ranking};

/// Hospitals guaranteed in every recommendation, catalog permitting.
pub const RECOMMENDATION_QUOTA: usize = 3;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("no pet registered with id '{id}'")]
    PetNotFound { id: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The triage pipeline behind trait seams so every stage is testable with
/// fakes.
pub struct TriageService {
    pets: Arc<dyn PetDirectory>,
    hospitals: Arc<dyn HospitalCatalog>,
    inference: Box<dyn InferenceClient>,
    clock: Box<dyn Clock>,
}

impl TriageService {
    pub fn new(
        pets: Arc<dyn PetDirectory>,
        hospitals: Arc<dyn HospitalCatalog>,
        inference: Box<dyn InferenceClient>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            pets,
            hospitals,
            inference,
            clock,
        }
    }

    /// Run the whole pipeline for one symptom report.
    pub fn analyze_and_recommend(
        &self,
        report: &SymptomReport,
    ) -> Result<HospitalRecommendation, TriageError> {
        let span = tracing::info_span!("triage", pet_id = %report.pet_id);
        let _guard = span.enter();

        let pet = self
            .pets
            .pet_by_id(&report.pet_id)?
            .ok_or_else(|| TriageError::PetNotFound {
                id: report.pet_id.clone(),
            })?;

        let analysis_id = clock::analysis_id(self.clock.as_ref());
        let analysis_prompt = prompt::build_analysis_prompt(report, &pet);
        let analysis = match self
            .inference
            .call(&analysis_prompt)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                parser::parse_analysis(&raw, &report.pet_id, analysis_id.clone())
                    .map_err(|e| e.to_string())
            }) {
            Ok(analysis) => analysis,
            Err(error) => {
                tracing::warn!(%error, "symptom analysis failed, using fallback assessment");
                fallback::fallback_analysis(&report.pet_id, analysis_id)
            }
        };

        tracing::info!(
            urgency = analysis.urgency.as_str(),
            category = %analysis.category,
            department = %analysis.recommended_department,
            "analysis complete"
        );

        let catalog = self.hospitals.all_hospitals()?;
        let shortlist = ranking::rank(
            &catalog,
            &pet.home_region,
            &analysis.recommended_department,
        );

        let rec_prompt =
            prompt::build_recommendation_prompt(&analysis, &pet.home_region, &shortlist);
        let draft = match self
            .inference
            .call(&rec_prompt)
            .map_err(|e| e.to_string())
            .and_then(|raw| {
                parser::parse_recommendation(&raw, &shortlist).map_err(|e| e.to_string())
            }) {
            Ok(draft) => draft,
            Err(error) => {
                tracing::warn!(%error, "hospital recommendation failed, using fallback guidance");
                fallback::fallback_draft()
            }
        };

        let hospitals = enforce_quota(
            draft.picks,
            &shortlist,
            &catalog,
            &pet.home_region,
            &analysis.recommended_department,
        );

        Ok(HospitalRecommendation {
            analysis,
            guardian_message: draft.guardian_message,
            immediate_actions: draft.immediate_actions,
            watch_for: draft.watch_for,
            hospitals,
        })
    }
}

type Picks = Vec<(Hospital, String)>;

/// Guarantee exactly min(quota, distinct catalog hospitals) entries: model
/// picks keep their order, then the ranked regional shortlist fills the gap,
/// then the ranked full catalog. Priorities are re-assigned 1..N at the end.
///
/// `picks = None` means the response had no hospital list at all; the fill
/// reason differs from a list that was present but short.
fn enforce_quota(
    picks: Option<Picks>,
    shortlist: &[Hospital],
    catalog: &[Hospital],
    user_region: &str,
    department: &str,
) -> Vec<RankedHospital> {
    let mut distinct_ids: Vec<&str> = catalog.iter().map(|h| h.id.as_str()).collect();
    distinct_ids.sort_unstable();
    distinct_ids.dedup();
    let target = RECOMMENDATION_QUOTA.min(distinct_ids.len());

    let fill_reason = if picks.is_none() {
        fallback::RANKED_FILL_REASON
    } else {
        fallback::QUOTA_FILL_REASON
    };
    let picks = picks.unwrap_or_default();

    let mut chosen: Picks = Vec::with_capacity(target);
    let mut seen: Vec<String> = Vec::with_capacity(target);
    for (hospital, reason) in picks {
        if chosen.len() >= target {
            break;
        }
        if !seen.contains(&hospital.id) {
            seen.push(hospital.id.clone());
            chosen.push((hospital, reason));
        }
    }

    for hospital in shortlist {
        if chosen.len() >= target {
            break;
        }
        if !seen.contains(&hospital.id) {
            seen.push(hospital.id.clone());
            chosen.push((hospital.clone(), fill_reason.to_string()));
        }
    }

    if chosen.len() < target {
        for hospital in ranking::rank_all(catalog, user_region, department) {
            if chosen.len() >= target {
                break;
            }
            if !seen.contains(&hospital.id) {
                seen.push(hospital.id.clone());
                chosen.push((hospital, fill_reason.to_string()));
            }
        }
    }

    chosen
        .into_iter()
        .enumerate()
        .map(|(i, (hospital, reason))| RankedHospital {
            hospital,
            reason,
            priority: (i + 1) as u32,
        })
        .collect()
}
