use serde::{Deserialize, Serialize};

/// Guardian-submitted symptom report. Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomReport {
    pub pet_id: String,
    /// Free-text description of the complaint, echoed verbatim into the
    /// analysis prompt.
    pub main_complaint: String,
    pub onset_hours_ago: u32,
    pub selected_symptoms: Vec<String>,
    #[serde(default)]
    pub emergency_flags: EmergencyFlags,
}

/// The fixed set of five emergency checkboxes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyFlags {
    pub difficulty_breathing: bool,
    pub continuous_vomiting: bool,
    pub cannot_stand: bool,
    pub loss_of_consciousness: bool,
    pub severe_bleeding: bool,
}

impl EmergencyFlags {
    pub fn any(&self) -> bool {
        self.difficulty_breathing
            || self.continuous_vomiting
            || self.cannot_stand
            || self.loss_of_consciousness
            || self.severe_bleeding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_default_to_all_clear() {
        let flags = EmergencyFlags::default();
        assert!(!flags.any());
    }

    #[test]
    fn report_deserializes_without_flags() {
        let json = r#"{
            "petId": "pet_001",
            "mainComplaint": "keeps coughing at night",
            "onsetHoursAgo": 12,
            "selectedSymptoms": ["cough", "sneezing"]
        }"#;
        let report: SymptomReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.pet_id, "pet_001");
        assert_eq!(report.onset_hours_ago, 12);
        assert!(!report.emergency_flags.any());
    }
}
