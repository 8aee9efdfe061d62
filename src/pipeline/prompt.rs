//! Prompt construction for the two inference calls: symptom analysis and
//! hospital recommendation. Builders are pure string assembly so the same
//! inputs always produce the same prompt.

use crate::models::{AnalysisResult, Hospital, Pet, SymptomReport};

/// At most this many hospitals are listed in the recommendation prompt.
pub const MAX_PROMPT_HOSPITALS: usize = 15;

/// Symptom tags that point at a body-system cluster. Matched by substring so
/// free-form tags like "심한 기침" still hit the respiratory hint.
const CATEGORY_HINTS: &[(&str, &[&str])] = &[
    ("respiratory", &["기침", "호흡", "숨", "재채기", "콧물"]),
    ("digestive", &["구토", "설사", "식욕", "변비", "혈변"]),
    ("orthopedic", &["다리", "절뚝", "관절", "보행", "일어나"]),
    ("dermatologic", &["피부", "가려움", "발진", "탈모", "긁"]),
];

/// Build the symptom-analysis prompt: pet profile, complaint, symptom tags,
/// emergency flags, and the exact response schema the parser expects.
pub fn build_analysis_prompt(report: &SymptomReport, pet: &Pet) -> String {
    let pet_json = serde_json::to_string_pretty(pet).unwrap_or_default();

    let mut symptoms = String::new();
    if report.selected_symptoms.is_empty() {
        symptoms.push_str("(none selected)\n");
    } else {
        for (i, tag) in report.selected_symptoms.iter().enumerate() {
            symptoms.push_str(&format!("{}. {}\n", i + 1, tag));
        }
    }

    let flags = emergency_flag_lines(report);
    let hints = category_hint_lines(report);

    format!(
        r#"You are a veterinary triage assistant. Assess the pet described below
and respond with JSON only.

<pet>
{pet_json}
</pet>

Main complaint (verbatim from the guardian):
{complaint}

Symptoms began approximately {onset} hours ago.

Selected symptoms:
{symptoms}
Emergency indicators:
{flags}
{hints}Respond with ONLY this JSON structure, no other text:

```json
{{
  "urgencyLevel": "low | medium | high | emergency",
  "category": "body system, e.g. digestive",
  "recommendedDepartment": "e.g. internal medicine",
  "detailedAnalysis": "plain-language assessment for the guardian",
  "diseaseCandidates": [
    {{
      "name": "condition name",
      "description": "what it is",
      "symptoms": "typical presentation",
      "cause": "common causes",
      "treatment": "usual treatment",
      "prevention": "prevention advice",
      "probability": 0.0
    }}
  ]
}}
```

Order diseaseCandidates by descending probability."#,
        complaint = report.main_complaint,
        onset = report.onset_hours_ago,
    )
}

fn emergency_flag_lines(report: &SymptomReport) -> String {
    let flags = &report.emergency_flags;
    let raised: Vec<&str> = [
        (flags.difficulty_breathing, "difficulty breathing"),
        (flags.continuous_vomiting, "continuous vomiting"),
        (flags.cannot_stand, "cannot stand"),
        (flags.loss_of_consciousness, "loss of consciousness"),
        (flags.severe_bleeding, "severe bleeding"),
    ]
    .iter()
    .filter_map(|(raised, label)| raised.then_some(*label))
    .collect();

    if raised.is_empty() {
        "- no emergency flags raised\n".to_string()
    } else {
        raised
            .iter()
            .map(|label| format!("- {label} (RAISED)\n"))
            .collect()
    }
}

fn category_hint_lines(report: &SymptomReport) -> String {
    let mut hints = String::new();
    for (cluster, keywords) in CATEGORY_HINTS {
        let hit = report
            .selected_symptoms
            .iter()
            .any(|tag| keywords.iter().any(|kw| tag.contains(kw)));
        if hit {
            hints.push_str(&format!(
                "Hint: the selected symptoms suggest a {cluster} issue.\n"
            ));
        }
    }
    if !hints.is_empty() {
        hints.push('\n');
    }
    hints
}

/// Build the hospital-recommendation prompt from a completed analysis and the
/// regionally ranked shortlist (capped at [`MAX_PROMPT_HOSPITALS`]).
pub fn build_recommendation_prompt(
    analysis: &AnalysisResult,
    user_location: &str,
    shortlist: &[Hospital],
) -> String {
    let mut listing = String::new();
    for hospital in shortlist.iter().take(MAX_PROMPT_HOSPITALS) {
        let distance = hospital
            .distance_km
            .map(|d| format!("{d:.1} km"))
            .unwrap_or_else(|| "unknown distance".to_string());
        listing.push_str(&format!(
            "- id: {id}\n  name: {name}\n  address: {address}\n  phone: {phone}\n  hours: {hours}\n  departments: {departments}\n  distance: {distance}\n",
            id = hospital.id,
            name = hospital.name,
            address = hospital.address,
            phone = hospital.phone,
            hours = hospital.operating_hours,
            departments = hospital.departments.join(", "),
        ));
    }

    format!(
        r#"You are helping a pet guardian choose a veterinary hospital.

Assessment so far:
- urgency: {urgency}
- category: {category}
- recommended department: {department}
- details: {details}

Guardian location: {location}

Candidate hospitals:
{listing}
Respond with ONLY this JSON structure, no other text:

```json
{{
  "userFriendlyMessage": "short reassuring summary for the guardian",
  "immediateActions": "what to do right now",
  "watchFor": "signs that mean go to a hospital immediately",
  "recommendedHospitals": [
    {{
      "hospitalId": "id from the candidate list",
      "recommendationReason": "one sentence on why this hospital"
    }}
  ]
}}
```

Use only hospitalId values from the candidate list, best choice first."#,
        urgency = analysis.urgency.as_str(),
        category = analysis.category,
        department = analysis.recommended_department,
        details = analysis.detailed_analysis,
        location = user_location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyFlags, UrgencyLevel};

    fn sample_pet() -> Pet {
        Pet {
            id: "pet_1".into(),
            name: "초코".into(),
            species: "dog".into(),
            age_years: 4,
            weight_kg: 7.2,
            owner_name: "김철수".into(),
            owner_phone: "010-1234-5678".into(),
            home_region: "서울특별시 강남구".into(),
        }
    }

    fn sample_report() -> SymptomReport {
        SymptomReport {
            pet_id: "pet_1".into(),
            main_complaint: "어제부터 계속 토하고 기운이 없어요".into(),
            onset_hours_ago: 20,
            selected_symptoms: vec!["구토".into(), "식욕부진".into()],
            emergency_flags: EmergencyFlags::default(),
        }
    }

    fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            pet_id: "pet_1".into(),
            analysis_id: "analysis_1".into(),
            urgency: UrgencyLevel::Medium,
            category: "digestive".into(),
            recommended_department: "internal medicine".into(),
            detailed_analysis: "Likely gastritis.".into(),
            disease_candidates: vec![],
        }
    }

    fn sample_hospital(id: &str) -> Hospital {
        Hospital {
            id: id.into(),
            name: format!("{id} 동물병원"),
            address: "서울특별시 강남구".into(),
            region: "서울특별시 강남구".into(),
            latitude: Some(37.5),
            longitude: Some(127.0),
            departments: vec!["internal medicine".into()],
            operating_hours: "24시간".into(),
            phone: "02-123-4567".into(),
            description: String::new(),
            distance_km: Some(1.2),
        }
    }

    #[test]
    fn analysis_prompt_echoes_complaint_and_symptoms() {
        let prompt = build_analysis_prompt(&sample_report(), &sample_pet());
        assert!(prompt.contains("어제부터 계속 토하고 기운이 없어요"));
        assert!(prompt.contains("1. 구토"));
        assert!(prompt.contains("2. 식욕부진"));
        assert!(prompt.contains("approximately 20 hours"));
        assert!(prompt.contains("초코"));
    }

    #[test]
    fn analysis_prompt_requests_the_schema() {
        let prompt = build_analysis_prompt(&sample_report(), &sample_pet());
        assert!(prompt.contains("\"urgencyLevel\""));
        assert!(prompt.contains("\"recommendedDepartment\""));
        assert!(prompt.contains("\"diseaseCandidates\""));
    }

    #[test]
    fn analysis_prompt_is_deterministic() {
        let report = sample_report();
        let pet = sample_pet();
        assert_eq!(
            build_analysis_prompt(&report, &pet),
            build_analysis_prompt(&report, &pet)
        );
    }

    #[test]
    fn raised_flags_are_named() {
        let mut report = sample_report();
        report.emergency_flags.difficulty_breathing = true;
        let prompt = build_analysis_prompt(&report, &sample_pet());
        assert!(prompt.contains("difficulty breathing (RAISED)"));
        assert!(!prompt.contains("no emergency flags"));
    }

    #[test]
    fn no_flags_says_so() {
        let prompt = build_analysis_prompt(&sample_report(), &sample_pet());
        assert!(prompt.contains("no emergency flags raised"));
    }

    #[test]
    fn digestive_tags_add_a_category_hint() {
        let prompt = build_analysis_prompt(&sample_report(), &sample_pet());
        assert!(prompt.contains("suggest a digestive issue"));
        assert!(!prompt.contains("respiratory issue"));
    }

    #[test]
    fn recommendation_prompt_lists_hospital_details() {
        let prompt = build_recommendation_prompt(
            &sample_analysis(),
            "서울특별시 강남구",
            &[sample_hospital("hosp_001")],
        );
        assert!(prompt.contains("id: hosp_001"));
        assert!(prompt.contains("1.2 km"));
        assert!(prompt.contains("internal medicine"));
        assert!(prompt.contains("\"hospitalId\""));
        assert!(prompt.contains("\"recommendationReason\""));
    }

    #[test]
    fn recommendation_prompt_caps_the_shortlist() {
        let shortlist: Vec<Hospital> = (0..30)
            .map(|i| sample_hospital(&format!("hosp_{i:03}")))
            .collect();
        let prompt =
            build_recommendation_prompt(&sample_analysis(), "서울", &shortlist);
        assert!(prompt.contains("id: hosp_014"));
        assert!(!prompt.contains("id: hosp_015"));
    }

    #[test]
    fn missing_distance_is_labelled_unknown() {
        let mut hospital = sample_hospital("hosp_001");
        hospital.distance_km = None;
        let prompt =
            build_recommendation_prompt(&sample_analysis(), "서울", &[hospital]);
        assert!(prompt.contains("unknown distance"));
    }
}
