//! Domain services.
//! Thin wrappers over the stores carrying the few business checks the site
//! has. Services are built once at startup with their collaborators.
pub mod adoption_service;
pub mod pet_service;
pub mod user_service;

pub use adoption_service::AdoptionService;
pub use pet_service::PetService;
pub use user_service::{hash_password, UserService};

use crate::db::DbPool;
use crate::token::TokenCodec;

/// Every collaborator the HTTP layer needs, wired explicitly.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub pets: PetService,
    pub adoptions: AdoptionService,
    pub tokens: TokenCodec,
}

impl Services {
    pub fn new(pool: DbPool, bcrypt_cost: u32) -> Self {
        Services {
            users: UserService::new(pool.clone(), bcrypt_cost),
            pets: PetService::new(pool.clone()),
            adoptions: AdoptionService::new(pool),
            tokens: TokenCodec::new(),
        }
    }
}
