//! User table access.
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

use super::models::User;
use super::DbPool;

const USER_COLUMNS: &str = "id, username, email, password, role";

fn map_user(row: &Row<'_>) -> SqliteResult<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        role: row.get(4)?,
    })
}

/// User storage operations
pub struct UserStore;

impl UserStore {
    /// Insert a user. `password_hash` must already be hashed.
    pub async fn insert(
        pool: &DbPool,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> SqliteResult<User> {
        let conn = pool.lock().await;

        conn.execute(
            "INSERT INTO users (username, email, password, role) VALUES (?1, ?2, ?3, ?4)",
            params![username, email, password_hash, role],
        )?;

        Ok(User {
            id: conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            role: role.to_string(),
        })
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> SqliteResult<Option<User>> {
        let conn = pool.lock().await;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            map_user,
        )
        .optional()
    }

    pub async fn find_by_username(pool: &DbPool, username: &str) -> SqliteResult<Option<User>> {
        let conn = pool.lock().await;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            params![username],
            map_user,
        )
        .optional()
    }

    pub async fn find_by_email(pool: &DbPool, email: &str) -> SqliteResult<Option<User>> {
        let conn = pool.lock().await;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            params![email],
            map_user,
        )
        .optional()
    }

    pub async fn list_all(pool: &DbPool) -> SqliteResult<Vec<User>> {
        let conn = pool.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
        let users = stmt.query_map([], map_user)?.collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    pub async fn exists_by_username(pool: &DbPool, username: &str) -> SqliteResult<bool> {
        let conn = pool.lock().await;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
            params![username],
            |row| row.get(0),
        )
    }

    pub async fn exists_by_email(pool: &DbPool, email: &str) -> SqliteResult<bool> {
        let conn = pool.lock().await;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
            params![email],
            |row| row.get(0),
        )
    }

    /// Delete a user; returns false when no row had that id.
    pub async fn delete_by_id(pool: &DbPool, id: i64) -> SqliteResult<bool> {
        let conn = pool.lock().await;
        let affected = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    pub async fn count(pool: &DbPool) -> SqliteResult<i64> {
        let conn = pool.lock().await;
        conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
    }
}
