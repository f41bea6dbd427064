//! Pet catalog operations.
use crate::db::models::Pet;
use crate::db::{DbPool, PetStore};
use crate::error::Result;

#[derive(Clone)]
pub struct PetService {
    pool: DbPool,
}

impl PetService {
    pub fn new(pool: DbPool) -> Self {
        PetService { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Pet>> {
        Ok(PetStore::list_all(&self.pool).await?)
    }

    pub async fn list_available(&self) -> Result<Vec<Pet>> {
        Ok(PetStore::list_by_available(&self.pool, true).await?)
    }

    pub async fn list_by_type(&self, pet_type: &str) -> Result<Vec<Pet>> {
        Ok(PetStore::list_by_type(&self.pool, pet_type).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Pet>> {
        Ok(PetStore::find_by_id(&self.pool, id).await?)
    }

    /// Insert `pet` when it has no id, otherwise update the row with that id.
    /// An id that matches no row is inserted as a new pet with a fresh id.
    pub async fn save(&self, pet: &Pet) -> Result<Pet> {
        pet.validate()?;

        if let Some(id) = pet.id {
            if PetStore::update(&self.pool, id, pet).await? {
                return Ok(pet.clone());
            }
        }

        Ok(PetStore::insert(&self.pool, pet).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        PetStore::delete_by_id(&self.pool, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn service() -> PetService {
        PetService::new(create_test_pool())
    }

    #[tokio::test]
    async fn test_save_inserts_then_updates() {
        let pets = service();
        let mut pet = pets.save(&Pet::new("Rex", "Dog", "Beagle", "Male")).await.expect("save");
        let id = pet.id.expect("id assigned");

        pet.age = Some(5);
        pet.available = false;
        let updated = pets.save(&pet).await.expect("save");
        assert_eq!(updated.id, Some(id));

        let stored = pets.get_by_id(id).await.expect("query").expect("found");
        assert_eq!(stored.age, Some(5));
        assert!(!stored.available);
        assert_eq!(pets.list_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_inserts() {
        let pets = service();
        let mut pet = Pet::new("Mia", "Cat", "Tabby", "Female");
        pet.id = Some(500);

        let saved = pets.save(&pet).await.expect("save");
        assert_ne!(saved.id, Some(500));
        assert_eq!(pets.list_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_pet() {
        let pets = service();
        let err = pets
            .save(&Pet::new("", "Dog", "Beagle", "Male"))
            .await
            .expect_err("blank name");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_available_and_type_filters() {
        let pets = service();
        let rex = pets.save(&Pet::new("Rex", "Dog", "Beagle", "Male")).await.expect("save");
        pets.save(&Pet::new("Mia", "Cat", "Tabby", "Female")).await.expect("save");

        let mut adopted = rex.clone();
        adopted.available = false;
        pets.save(&adopted).await.expect("save");

        let available = pets.list_available().await.expect("list");
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Mia");

        assert_eq!(pets.list_by_type("Dog").await.expect("list").len(), 1);
        assert!(pets.list_by_type("Parrot").await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_and_delete() {
        let pets = service();
        assert!(pets.get_by_id(1).await.expect("query").is_none());

        let pet = pets.save(&Pet::new("Bo", "Dog", "Boxer", "Male")).await.expect("save");
        let id = pet.id.expect("id");
        pets.delete(id).await.expect("delete");
        assert!(pets.get_by_id(id).await.expect("query").is_none());
    }
}
