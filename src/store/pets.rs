use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::file_store::{load_list, save_list};
use super::{PetDirectory, StoreError};
use crate::models::Pet;

const PETS_FILE: &str = "pets.json";

/// Pet directory backed by a single JSON file under the data directory.
pub struct FilePetDirectory {
    path: PathBuf,
}

impl FilePetDirectory {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PETS_FILE),
        }
    }

    pub fn all_pets(&self) -> Result<Vec<Pet>, StoreError> {
        load_list(&self.path)
    }

    /// Register a new pet, assigning it a fresh id.
    pub fn register_pet(&self, mut pet: Pet) -> Result<Pet, StoreError> {
        pet.id = Uuid::new_v4().to_string();
        self.save_pet(pet.clone())?;
        Ok(pet)
    }

    /// Insert or replace a pet record by id.
    pub fn save_pet(&self, pet: Pet) -> Result<(), StoreError> {
        let mut pets = self.all_pets()?;
        match pets.iter_mut().find(|p| p.id == pet.id) {
            Some(existing) => *existing = pet,
            None => pets.push(pet),
        }
        save_list(&self.path, &pets)
    }

    /// Remove a pet record. Returns whether anything was deleted.
    pub fn delete_pet(&self, id: &str) -> Result<bool, StoreError> {
        let mut pets = self.all_pets()?;
        let before = pets.len();
        pets.retain(|p| p.id != id);
        if pets.len() == before {
            return Ok(false);
        }
        save_list(&self.path, &pets)?;
        Ok(true)
    }
}

impl PetDirectory for FilePetDirectory {
    fn pet_by_id(&self, id: &str) -> Result<Option<Pet>, StoreError> {
        Ok(self.all_pets()?.into_iter().find(|p| p.id == id))
    }
}
