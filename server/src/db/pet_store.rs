//! Pet catalog table access.
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

use super::models::Pet;
use super::DbPool;

const PET_COLUMNS: &str = "id, name, type, breed, age, gender, description, image_url, available";

fn map_pet(row: &Row<'_>) -> SqliteResult<Pet> {
    Ok(Pet {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        pet_type: row.get(2)?,
        breed: row.get(3)?,
        age: row.get(4)?,
        gender: row.get(5)?,
        description: row.get(6)?,
        image_url: row.get(7)?,
        available: row.get(8)?,
    })
}

/// Pet storage operations
pub struct PetStore;

impl PetStore {
    /// Insert `pet` as a new row, ignoring any id it carries.
    pub async fn insert(pool: &DbPool, pet: &Pet) -> SqliteResult<Pet> {
        let conn = pool.lock().await;

        conn.execute(
            "INSERT INTO pets (name, type, breed, age, gender, description, image_url, available)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                pet.name,
                pet.pet_type,
                pet.breed,
                pet.age,
                pet.gender,
                pet.description,
                pet.image_url,
                pet.available
            ],
        )?;

        Ok(Pet {
            id: Some(conn.last_insert_rowid()),
            ..pet.clone()
        })
    }

    /// Overwrite every column of the row with `id`. Returns false when no
    /// such row exists.
    pub async fn update(pool: &DbPool, id: i64, pet: &Pet) -> SqliteResult<bool> {
        let conn = pool.lock().await;

        let affected = conn.execute(
            "UPDATE pets
             SET name = ?1, type = ?2, breed = ?3, age = ?4, gender = ?5,
                 description = ?6, image_url = ?7, available = ?8
             WHERE id = ?9",
            params![
                pet.name,
                pet.pet_type,
                pet.breed,
                pet.age,
                pet.gender,
                pet.description,
                pet.image_url,
                pet.available,
                id
            ],
        )?;

        Ok(affected > 0)
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> SqliteResult<Option<Pet>> {
        let conn = pool.lock().await;
        conn.query_row(
            &format!("SELECT {PET_COLUMNS} FROM pets WHERE id = ?1"),
            params![id],
            map_pet,
        )
        .optional()
    }

    pub async fn list_all(pool: &DbPool) -> SqliteResult<Vec<Pet>> {
        let conn = pool.lock().await;
        let mut stmt = conn.prepare(&format!("SELECT {PET_COLUMNS} FROM pets ORDER BY id"))?;
        let pets = stmt.query_map([], map_pet)?.collect::<Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    pub async fn list_by_available(pool: &DbPool, available: bool) -> SqliteResult<Vec<Pet>> {
        let conn = pool.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE available = ?1 ORDER BY id"
        ))?;
        let pets = stmt
            .query_map(params![available], map_pet)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    pub async fn list_by_type(pool: &DbPool, pet_type: &str) -> SqliteResult<Vec<Pet>> {
        let conn = pool.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE type = ?1 ORDER BY id"
        ))?;
        let pets = stmt
            .query_map(params![pet_type], map_pet)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pets)
    }

    pub async fn delete_by_id(pool: &DbPool, id: i64) -> SqliteResult<bool> {
        let conn = pool.lock().await;
        let affected = conn.execute("DELETE FROM pets WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    pub async fn count(pool: &DbPool) -> SqliteResult<i64> {
        let conn = pool.lock().await;
        conn.query_row("SELECT COUNT(*) FROM pets", [], |row| row.get(0))
    }
}
