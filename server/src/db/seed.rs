//! Idempotent bootstrap data.
//! Ensures an admin account and a couple of sample pets exist. Safe to run on
//! every start: nothing is created when the records are already there.
use crate::error::Result;
use crate::services::hash_password;

use super::models::{Pet, ROLE_ADMIN};
use super::{DbPool, PetStore, UserStore};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@petadoption.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// What a seeding pass actually created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub pets_created: usize,
}

pub fn sample_pets() -> Vec<Pet> {
    let mut buddy = Pet::new("Buddy", "Σκύλος", "Golden Retriever", "Αρσενικό");
    buddy.age = Some(2);
    buddy.description = Some("Φιλικός και παιχνιδιάρης σκύλος".to_string());
    buddy.image_url = Some(
        "https://images.unsplash.com/photo-1543466835-00a7907e9de1?w=400&h=300&fit=crop"
            .to_string(),
    );

    let mut luna = Pet::new("Luna", "Γάτα", "Siamese", "Θηλυκό");
    luna.age = Some(3);
    luna.description = Some("Ήρεμη και τρυφερή γάτα".to_string());
    luna.image_url = Some(
        "https://images.unsplash.com/photo-1573148164257-8a2b173be464?w=400&h=300&fit=crop"
            .to_string(),
    );

    vec![buddy, luna]
}

/// Create the admin user if no user is named `admin`, and the sample pets if
/// the pet table is empty.
pub async fn seed_database(pool: &DbPool, bcrypt_cost: u32) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if UserStore::find_by_username(pool, ADMIN_USERNAME).await?.is_none() {
        let hash = hash_password(ADMIN_PASSWORD, bcrypt_cost).await?;
        UserStore::insert(pool, ADMIN_USERNAME, ADMIN_EMAIL, &hash, ROLE_ADMIN).await?;
        report.admin_created = true;
        log::info!("Seeded admin account '{}'", ADMIN_USERNAME);
    }

    if PetStore::count(pool).await? == 0 {
        for pet in sample_pets() {
            pet.validate()?;
            PetStore::insert(pool, &pet).await?;
            report.pets_created += 1;
        }
        log::info!("Seeded {} sample pets", report.pets_created);
    }

    Ok(report)
}
