//! Database schema initialization.
//! Sets up SQLite WAL mode and creates tables on startup.
use rusqlite::{Connection, Result as SqliteResult};

/// Initialize database connection with WAL mode and schema
pub fn initialize_database(conn: &Connection) -> SqliteResult<()> {
    // Enable WAL mode (for file-based DB only, ignore error for in-memory)
    let _ = conn.execute("PRAGMA journal_mode = WAL", []);
    let _ = conn.execute("PRAGMA synchronous = NORMAL", []);

    create_schema(conn)?;

    Ok(())
}

/// Create all database tables.
///
/// `adoption_requests.user_email` and `adoption_requests.pet_id` are plain
/// copies, not foreign keys: deleting a user or pet leaves requests intact.
fn create_schema(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'USER'
        );

        CREATE TABLE IF NOT EXISTS pets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            breed TEXT NOT NULL,
            age INTEGER,
            gender TEXT NOT NULL,
            description TEXT,
            image_url TEXT,
            available INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS adoption_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_email TEXT,
            pet_id INTEGER,
            pet_name TEXT,
            request_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'PENDING'
        );

        CREATE INDEX IF NOT EXISTS idx_pets_available ON pets(available);
        CREATE INDEX IF NOT EXISTS idx_pets_type ON pets(type);
        CREATE INDEX IF NOT EXISTS idx_adoption_requests_user_pet
            ON adoption_requests(user_email, pet_id);
        "#,
    )?;

    Ok(())
}
