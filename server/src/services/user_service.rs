//! User accounts: registration, lookup and password checks.
use crate::db::models::{validate_user_fields, User};
use crate::db::{DbPool, UserStore};
use crate::error::Result;

/// Hash a password on the blocking pool so the async worker keeps serving.
pub async fn hash_password(raw_password: &str, cost: u32) -> Result<String> {
    let raw_password = raw_password.to_string();
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(raw_password, cost)).await??)
}

#[derive(Clone)]
pub struct UserService {
    pool: DbPool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: DbPool, bcrypt_cost: u32) -> Self {
        UserService { pool, bcrypt_cost }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(UserStore::find_by_id(&self.pool, id).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(UserStore::find_by_username(&self.pool, username).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(UserStore::find_by_email(&self.pool, email).await?)
    }

    /// Resolve a login name, trying it as a username first and as an email
    /// second.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        match self.find_by_username(login).await? {
            Some(user) => Ok(Some(user)),
            None => self.find_by_email(login).await,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        Ok(UserStore::list_all(&self.pool).await?)
    }

    pub async fn exists_by_username(&self, username: &str) -> Result<bool> {
        Ok(UserStore::exists_by_username(&self.pool, username).await?)
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(UserStore::exists_by_email(&self.pool, email).await?)
    }

    /// Hash `raw_password` and store a new user.
    ///
    /// Uniqueness is left to the caller and the table's UNIQUE constraints;
    /// a duplicate slipping past the caller's check surfaces as a storage
    /// error.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        raw_password: &str,
        role: &str,
    ) -> Result<User> {
        validate_user_fields(username, email)?;
        let hash = hash_password(raw_password, self.bcrypt_cost).await?;
        let user = UserStore::insert(&self.pool, username, email, &hash, role).await?;
        log::info!("Registered user '{}' with role {}", user.username, user.role);
        Ok(user)
    }

    /// Verify `raw_password` against the stored hash, off the async worker.
    /// A malformed stored hash counts as a mismatch.
    pub async fn check_password(&self, user: &User, raw_password: &str) -> Result<bool> {
        let raw_password = raw_password.to_string();
        let hash = user.password.clone();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(raw_password, &hash)).await?;

        match verified {
            Ok(matches) => Ok(matches),
            Err(e) => {
                log::warn!("Stored password hash for '{}' is unusable: {}", user.username, e);
                Ok(false)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        UserStore::delete_by_id(&self.pool, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::error::ServiceError;

    fn service() -> UserService {
        UserService::new(create_test_pool(), 4)
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let users = service();
        let user = users
            .register("alice", "alice@example.com", "s3cret", "USER")
            .await
            .expect("Failed to register");

        assert_ne!(user.password, "s3cret");
        assert!(user.password.starts_with("$2"));
        assert!(users.check_password(&user, "s3cret").await.expect("verify"));
        assert!(!users.check_password(&user, "wrong").await.expect("verify"));
    }

    #[tokio::test]
    async fn test_hash_password_runs_off_the_worker() {
        let hash = hash_password("pw", 4).await.expect("hash");
        assert!(bcrypt::verify("pw", &hash).expect("verify"));
    }

    #[tokio::test]
    async fn test_same_password_gets_different_salts() {
        let users = service();
        let a = users.register("a", "a@example.com", "same", "USER").await.expect("register");
        let b = users.register("b", "b@example.com", "same", "USER").await.expect("register");
        assert_ne!(a.password, b.password);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_fields() {
        let users = service();
        let err = users
            .register("alice", "not-an-email", "pw", "USER")
            .await
            .expect_err("should reject");
        assert!(err.is_validation());
        assert!(users.list_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_is_storage_error() {
        let users = service();
        users.register("alice", "alice@example.com", "pw", "USER").await.expect("register");
        let err = users
            .register("alice", "alice2@example.com", "pw", "USER")
            .await
            .expect_err("duplicate");
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn test_find_by_login_accepts_username_or_email() {
        let users = service();
        let user = users.register("bob", "bob@example.com", "pw", "USER").await.expect("register");

        let by_name = users.find_by_login("bob").await.expect("query").expect("found");
        let by_email = users.find_by_login("bob@example.com").await.expect("query").expect("found");
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_email.id, user.id);
        assert!(users.find_by_login("nobody").await.expect("query").is_none());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let users = service();
        let user = users.register("carol", "carol@example.com", "pw", "USER").await.expect("register");

        assert!(users.exists_by_username("carol").await.expect("query"));
        assert!(users.exists_by_email("carol@example.com").await.expect("query"));

        users.delete(user.id).await.expect("delete");
        assert!(!users.exists_by_username("carol").await.expect("query"));
        assert!(users.find_by_id(user.id).await.expect("query").is_none());

        // deleting a missing user is not an error
        users.delete(user.id).await.expect("delete again");
    }

    #[tokio::test]
    async fn test_check_password_with_malformed_hash() {
        let users = service();
        let user = User {
            id: 1,
            username: "broken".to_string(),
            email: "broken@example.com".to_string(),
            password: "plain-text".to_string(),
            role: "USER".to_string(),
        };
        assert!(!users.check_password(&user, "plain-text").await.expect("verify"));
    }
}
