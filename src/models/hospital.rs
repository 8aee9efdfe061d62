use serde::{Deserialize, Serialize};

/// A veterinary facility from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Administrative region the facility belongs to, e.g. "서울특별시 강남구".
    pub region: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub departments: Vec<String>,
    /// "09:00~19:00" or "24시간".
    pub operating_hours: String,
    pub phone: String,
    #[serde(default)]
    pub description: String,
    /// Effective distance from the requesting user, annotated during ranking
    /// on a per-request clone. Never part of the stored catalog record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl Hospital {
    pub fn has_department(&self, department: &str) -> bool {
        self.departments.iter().any(|d| d == department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hospital {
        Hospital {
            id: "hosp_001".into(),
            name: "강남 24시 동물병원".into(),
            address: "서울특별시 강남구 테헤란로 123".into(),
            region: "서울특별시 강남구".into(),
            latitude: Some(37.5012),
            longitude: Some(127.0395),
            departments: vec!["internal medicine".into(), "surgery".into()],
            operating_hours: "24시간".into(),
            phone: "02-1234-5678".into(),
            description: String::new(),
            distance_km: None,
        }
    }

    #[test]
    fn distance_is_not_serialized_when_absent() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("distanceKm"));
    }

    #[test]
    fn distance_round_trips_when_annotated() {
        let mut hospital = sample();
        hospital.distance_km = Some(2.4);
        let json = serde_json::to_string(&hospital).unwrap();
        assert!(json.contains("\"distanceKm\":2.4"));

        let back: Hospital = serde_json::from_str(&json).unwrap();
        assert_eq!(back.distance_km, Some(2.4));
    }

    #[test]
    fn department_lookup_is_exact() {
        let hospital = sample();
        assert!(hospital.has_department("surgery"));
        assert!(!hospital.has_department("dermatology"));
    }
}
