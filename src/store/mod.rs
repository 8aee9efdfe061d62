//! Flat-file record store backing the pet directory and hospital catalog.
//!
//! These are the pipeline's external collaborators: simple keyed-list
//! load/save against JSON files. The orchestrator only depends on the
//! `PetDirectory` / `HospitalCatalog` traits so tests can run against
//! in-memory fakes.

pub mod file_store;
pub mod hospitals;
pub mod pets;

pub use hospitals::*;
pub use pets::*;

use thiserror::Error;

use crate::models::{Hospital, Pet};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read access to registered pets.
pub trait PetDirectory: Send + Sync {
    fn pet_by_id(&self, id: &str) -> Result<Option<Pet>, StoreError>;
}

/// Read access to the veterinary facility catalog.
pub trait HospitalCatalog: Send + Sync {
    fn all_hospitals(&self) -> Result<Vec<Hospital>, StoreError>;

    fn hospitals_by_region(&self, region: &str) -> Result<Vec<Hospital>, StoreError> {
        Ok(self
            .all_hospitals()?
            .into_iter()
            .filter(|h| h.region == region)
            .collect())
    }
}
