use serde::{Deserialize, Serialize};

/// A registered pet profile. Owned by the pet directory; the triage
/// pipeline only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    /// "dog", "cat", ...
    pub species: String,
    pub age_years: u32,
    pub weight_kg: f64,
    pub owner_name: String,
    pub owner_phone: String,
    /// Free-text home address or region, e.g. "서울특별시 강남구".
    pub home_region: String,
}
