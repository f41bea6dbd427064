//! Database layer for persistent storage.
//! One SQLite connection shared behind an async mutex; each entity has its own
//! store with the lookups the services need.
pub mod adoption_store;
pub mod init;
pub mod models;
pub mod pet_store;
pub mod seed;
pub mod user_store;

pub use adoption_store::AdoptionStore;
pub use pet_store::PetStore;
pub use user_store::UserStore;

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type DbPool = Arc<Mutex<Connection>>;

/// Create a connection pool (simplified for single-connection SQLite)
pub fn create_pool(db_path: impl AsRef<Path>) -> SqliteResult<DbPool> {
    let conn = Connection::open(db_path)?;
    init::initialize_database(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Create an in-memory database for testing
pub fn create_test_pool() -> DbPool {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory DB");
    init::initialize_database(&conn).expect("Failed to initialize DB");
    Arc::new(Mutex::new(conn))
}
