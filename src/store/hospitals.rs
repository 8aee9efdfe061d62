use std::path::{Path, PathBuf};

use super::file_store::{load_list, save_list};
use super::{HospitalCatalog, StoreError};
use crate::models::Hospital;

const HOSPITALS_FILE: &str = "hospitals.json";

/// Hospital catalog backed by a single JSON file. An empty store seeds the
/// sample catalog on first read so a fresh install can produce
/// recommendations immediately.
pub struct FileHospitalCatalog {
    path: PathBuf,
}

impl FileHospitalCatalog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(HOSPITALS_FILE),
        }
    }

    pub fn hospital_by_id(&self, id: &str) -> Result<Option<Hospital>, StoreError> {
        Ok(self.all_hospitals()?.into_iter().find(|h| h.id == id))
    }

    pub fn hospitals_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Hospital>, StoreError> {
        Ok(self
            .all_hospitals()?
            .into_iter()
            .filter(|h| h.has_department(department))
            .collect())
    }
}

impl HospitalCatalog for FileHospitalCatalog {
    fn all_hospitals(&self) -> Result<Vec<Hospital>, StoreError> {
        let hospitals: Vec<Hospital> = load_list(&self.path)?;
        if !hospitals.is_empty() {
            return Ok(hospitals);
        }
        let seeded = sample_hospitals();
        save_list(&self.path, &seeded)?;
        tracing::info!(count = seeded.len(), "seeded sample hospital catalog");
        Ok(seeded)
    }
}

fn sample_hospitals() -> Vec<Hospital> {
    vec![
        Hospital {
            id: "hosp_001".into(),
            name: "강남 24시 동물병원".into(),
            address: "서울특별시 강남구 테헤란로 123".into(),
            region: "서울특별시 강남구".into(),
            latitude: Some(37.5012),
            longitude: Some(127.0395),
            departments: vec![
                "internal medicine".into(),
                "surgery".into(),
                "emergency medicine".into(),
            ],
            operating_hours: "24시간".into(),
            phone: "02-1234-5678".into(),
            description: "24시간 응급 진료 가능, 내시경 장비 보유".into(),
            distance_km: None,
        },
        Hospital {
            id: "hosp_002".into(),
            name: "서초 동물의료센터".into(),
            address: "서울특별시 서초구 서초대로 456".into(),
            region: "서울특별시 서초구".into(),
            latitude: Some(37.4838),
            longitude: Some(127.0324),
            departments: vec![
                "internal medicine".into(),
                "orthopedics".into(),
                "dermatology".into(),
            ],
            operating_hours: "09:00~19:00".into(),
            phone: "02-2345-6789".into(),
            description: "정형외과 전문, CT/MRI 장비 보유".into(),
            distance_km: None,
        },
        Hospital {
            id: "hosp_003".into(),
            name: "대전 유성 동물병원".into(),
            address: "대전광역시 유성구 대학로 789".into(),
            region: "대전광역시 유성구".into(),
            latitude: Some(36.3628),
            longitude: Some(127.3566),
            departments: vec!["internal medicine".into(), "surgery".into()],
            operating_hours: "09:00~18:00".into(),
            phone: "042-3456-7890".into(),
            description: "소화기 내과 전문".into(),
            distance_km: None,
        },
    ]
}
