//! Adoption request table access.
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

use super::models::AdoptionRequest;
use super::DbPool;

const REQUEST_COLUMNS: &str = "id, user_email, pet_id, pet_name, request_date, status";

fn map_request(row: &Row<'_>) -> SqliteResult<AdoptionRequest> {
    Ok(AdoptionRequest {
        id: row.get(0)?,
        user_email: row.get(1)?,
        pet_id: row.get(2)?,
        pet_name: row.get(3)?,
        request_date: row.get(4)?,
        status: row.get(5)?,
    })
}

/// Adoption request storage operations
pub struct AdoptionStore;

impl AdoptionStore {
    pub async fn insert(
        pool: &DbPool,
        user_email: &str,
        pet_id: i64,
        pet_name: &str,
        request_date: DateTime<Utc>,
        status: &str,
    ) -> SqliteResult<AdoptionRequest> {
        let conn = pool.lock().await;

        conn.execute(
            "INSERT INTO adoption_requests (user_email, pet_id, pet_name, request_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_email, pet_id, pet_name, request_date, status],
        )?;

        Ok(AdoptionRequest {
            id: conn.last_insert_rowid(),
            user_email: user_email.to_string(),
            pet_id,
            pet_name: pet_name.to_string(),
            request_date,
            status: status.to_string(),
        })
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> SqliteResult<Option<AdoptionRequest>> {
        let conn = pool.lock().await;
        conn.query_row(
            &format!("SELECT {REQUEST_COLUMNS} FROM adoption_requests WHERE id = ?1"),
            params![id],
            map_request,
        )
        .optional()
    }

    pub async fn list_by_user_email(
        pool: &DbPool,
        user_email: &str,
    ) -> SqliteResult<Vec<AdoptionRequest>> {
        let conn = pool.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {REQUEST_COLUMNS} FROM adoption_requests WHERE user_email = ?1 ORDER BY id"
        ))?;
        let requests = stmt
            .query_map(params![user_email], map_request)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    /// Oldest request for the (user, pet) pair. Nothing stops a pair from
    /// having several rows, so this returns the first one.
    pub async fn find_by_user_email_and_pet_id(
        pool: &DbPool,
        user_email: &str,
        pet_id: i64,
    ) -> SqliteResult<Option<AdoptionRequest>> {
        let conn = pool.lock().await;
        conn.query_row(
            &format!(
                "SELECT {REQUEST_COLUMNS} FROM adoption_requests
                 WHERE user_email = ?1 AND pet_id = ?2 ORDER BY id LIMIT 1"
            ),
            params![user_email, pet_id],
            map_request,
        )
        .optional()
    }

    pub async fn list_all(pool: &DbPool) -> SqliteResult<Vec<AdoptionRequest>> {
        let conn = pool.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {REQUEST_COLUMNS} FROM adoption_requests ORDER BY id"
        ))?;
        let requests = stmt.query_map([], map_request)?.collect::<Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    pub async fn count(pool: &DbPool) -> SqliteResult<i64> {
        let conn = pool.lock().await;
        conn.query_row("SELECT COUNT(*) FROM adoption_requests", [], |row| row.get(0))
    }
}
