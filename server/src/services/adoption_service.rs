//! Adoption request submission and lookup.
use chrono::Utc;

use crate::db::models::{AdoptionRequest, STATUS_PENDING};
use crate::db::{AdoptionStore, DbPool};
use crate::error::Result;

#[derive(Clone)]
pub struct AdoptionService {
    pool: DbPool,
}

impl AdoptionService {
    pub fn new(pool: DbPool) -> Self {
        AdoptionService { pool }
    }

    /// Record a PENDING request stamped with the current time.
    ///
    /// Does not check that the pet exists or is available, nor that the user
    /// already has a request for it. `has_requested` is available to callers
    /// that want that check.
    pub async fn submit(&self, user_email: &str, pet_id: i64, pet_name: &str) -> Result<AdoptionRequest> {
        let request = AdoptionStore::insert(
            &self.pool,
            user_email,
            pet_id,
            pet_name,
            Utc::now(),
            STATUS_PENDING,
        )
        .await?;
        log::info!(
            "Adoption request {} created by '{}' for pet {}",
            request.id,
            request.user_email,
            request.pet_id
        );
        Ok(request)
    }

    pub async fn list_for_user(&self, user_email: &str) -> Result<Vec<AdoptionRequest>> {
        Ok(AdoptionStore::list_by_user_email(&self.pool, user_email).await?)
    }

    pub async fn has_requested(&self, user_email: &str, pet_id: i64) -> Result<bool> {
        Ok(AdoptionStore::find_by_user_email_and_pet_id(&self.pool, user_email, pet_id)
            .await?
            .is_some())
    }
}
