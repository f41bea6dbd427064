//! Data models for database operations.
//! Represents users, pets and adoption requests, plus the HTTP DTOs.
use crate::error::{Result, ServiceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";
pub const STATUS_PENDING: &str = "PENDING";

const USERNAME_MAX: usize = 20;
const EMAIL_MAX: usize = 50;
const PET_NAME_MAX: usize = 50;
const PET_TYPE_MAX: usize = 20;
const BREED_MAX: usize = 50;
const GENDER_MAX: usize = 10;
const DESCRIPTION_MAX: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never sent over the wire
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// `None` until the pet has been inserted
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub breed: String,
    pub age: Option<i32>,
    pub gender: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Pet {
    /// A new, unsaved, available pet with the mandatory fields filled in.
    pub fn new(
        name: impl Into<String>,
        pet_type: impl Into<String>,
        breed: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Pet {
            id: None,
            name: name.into(),
            pet_type: pet_type.into(),
            breed: breed.into(),
            age: None,
            gender: gender.into(),
            description: None,
            image_url: None,
            available: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name, PET_NAME_MAX)?;
        require_text("type", &self.pet_type, PET_TYPE_MAX)?;
        require_text("breed", &self.breed, BREED_MAX)?;
        require_text("gender", &self.gender, GENDER_MAX)?;
        if let Some(description) = &self.description {
            max_len("description", description, DESCRIPTION_MAX)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    pub id: i64,
    /// Denormalized copy of the requester; the adopt endpoint stores the
    /// token identity (a username) here.
    pub user_email: String,
    pub pet_id: i64,
    pub pet_name: String,
    pub request_date: DateTime<Utc>,
    pub status: String,
}

/// Check the username and email constraints of a user about to be stored.
pub fn validate_user_fields(username: &str, email: &str) -> Result<()> {
    require_text("username", username, USERNAME_MAX)?;
    require_text("email", email, EMAIL_MAX)?;
    if !is_email_shaped(email) {
        return Err(ServiceError::validation(format!(
            "email '{email}' is not a well-formed address"
        )));
    }
    Ok(())
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn require_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be blank")));
    }
    max_len(field, value, max)
}

fn max_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(ServiceError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginParams {
    /// Username or email
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptParams {
    pub pet_id: i64,
    pub pet_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptResponse {
    pub message: String,
    pub request_id: i64,
}
