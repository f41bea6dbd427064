//! HTTP handlers module
//! Provides the REST endpoints
pub mod rest;

pub use rest::{adopt, health, list_available_pets, login, register};
