//! REST API handlers for HTTP endpoints.
//! Handles login, registration, the pet listing and adoption submission.
//!
//! Parameters arrive either as a URL-encoded form body or as a query string.
//! Error bodies are `{"error": "<message>"}`; unexpected failures include the
//! underlying error text.
use crate::db::models::*;
use crate::services::{AdoptionService, PetService, UserService};
use crate::token::TokenCodec;
use actix_web::{http::header, web, Either, HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use std::fmt::Display;

const MSG_BAD_CREDENTIALS: &str = "Λάθος όνομα χρήστη ή κωδικός πρόσβασης";
pub const MSG_LOGIN_FAILED: &str = "Σφάλμα κατά τη σύνδεση";
const MSG_USERNAME_TAKEN: &str = "Το όνομα χρήστη χρησιμοποιείται ήδη";
const MSG_EMAIL_TAKEN: &str = "Το email χρησιμοποιείται ήδη";
pub const MSG_INVALID_USER_DATA: &str = "Μη έγκυρα στοιχεία χρήστη";
pub const MSG_REGISTER_FAILED: &str = "Σφάλμα κατά την εγγραφή";
const MSG_LOGIN_REQUIRED: &str = "Απαιτείται σύνδεση";
const MSG_INVALID_TOKEN: &str = "Μη έγκυρο token";
const MSG_INVALID_PARAMS: &str = "Λείπουν ή είναι άκυρες οι παράμετροι της αίτησης";
pub const MSG_ADOPTION_SUBMITTED: &str = "Η αίτηση υιοθεσίας υποβλήθηκε επιτυχώς";
pub const MSG_ADOPTION_FAILED: &str = "Σφάλμα κατά την υποβολή αίτησης";

const BEARER_PREFIX: &str = "Bearer ";

/// Request parameters from a form body, falling back to the query string.
pub type Params<T> = Either<web::Form<T>, web::Query<T>>;

fn into_params<T>(params: Params<T>) -> T {
    match params {
        Either::Left(form) => form.into_inner(),
        Either::Right(query) => query.into_inner(),
    }
}

fn error_body(message: impl Display) -> serde_json::Value {
    json!({ "error": message.to_string() })
}

fn internal_error(context: &str, err: impl Display) -> HttpResponse {
    log::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(error_body(format!("{context}: {err}")))
}

/// Log in with a username or email plus password
/// POST /api/auth/login
pub async fn login(
    users: web::Data<UserService>,
    tokens: web::Data<TokenCodec>,
    params: Params<LoginParams>,
) -> ActixResult<HttpResponse> {
    let params = into_params(params);

    let user = match users.find_by_login(&params.username).await {
        Ok(user) => user,
        Err(e) => return Ok(internal_error(MSG_LOGIN_FAILED, e)),
    };

    let verified = match &user {
        Some(user) => users.check_password(user, &params.password).await,
        None => Ok(false),
    };

    match (user, verified) {
        (_, Err(e)) => Ok(internal_error(MSG_LOGIN_FAILED, e)),
        (Some(user), Ok(true)) => {
            let response = LoginResponse {
                token: tokens.issue(&user.username),
                username: user.username,
                email: user.email,
            };
            Ok(HttpResponse::Ok().json(response))
        }
        _ => {
            log::warn!("Rejected login for '{}'", params.username);
            Ok(HttpResponse::Unauthorized().json(error_body(MSG_BAD_CREDENTIALS)))
        }
    }
}

/// Register a new user account
/// POST /api/users/register
pub async fn register(
    users: web::Data<UserService>,
    params: Params<RegisterParams>,
) -> ActixResult<HttpResponse> {
    let params = into_params(params);

    match users.exists_by_username(&params.username).await {
        Ok(true) => return Ok(HttpResponse::BadRequest().json(error_body(MSG_USERNAME_TAKEN))),
        Ok(false) => {}
        Err(e) => return Ok(internal_error(MSG_REGISTER_FAILED, e)),
    }

    match users.exists_by_email(&params.email).await {
        Ok(true) => return Ok(HttpResponse::BadRequest().json(error_body(MSG_EMAIL_TAKEN))),
        Ok(false) => {}
        Err(e) => return Ok(internal_error(MSG_REGISTER_FAILED, e)),
    }

    match users
        .register(&params.username, &params.email, &params.password, ROLE_USER)
        .await
    {
        Ok(user) => {
            let response = RegisterResponse {
                id: user.id,
                username: user.username,
                email: user.email,
            };
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) if e.is_validation() => {
            log::warn!("Rejected registration for '{}': {}", params.username, e);
            Ok(HttpResponse::BadRequest().json(error_body(MSG_INVALID_USER_DATA)))
        }
        Err(e) => Ok(internal_error(MSG_REGISTER_FAILED, e)),
    }
}

/// List pets that can still be adopted
/// GET /api/pets
pub async fn list_available_pets(pets: web::Data<PetService>) -> ActixResult<HttpResponse> {
    match pets.list_available().await {
        Ok(available) => Ok(HttpResponse::Ok().json(available)),
        Err(e) => {
            log::error!("Failed to list available pets: {}", e);
            Ok(HttpResponse::InternalServerError().json(Vec::<Pet>::new()))
        }
    }
}

/// Extract the identity from an `Authorization: Bearer <token>` header.
fn bearer_identity(req: &HttpRequest, tokens: &TokenCodec) -> Result<String, HttpResponse> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| HttpResponse::Unauthorized().json(error_body(MSG_LOGIN_REQUIRED)))?;

    tokens.resolve(token).ok_or_else(|| {
        log::warn!("Rejected unresolvable bearer token");
        HttpResponse::Unauthorized().json(error_body(MSG_INVALID_TOKEN))
    })
}

/// Submit an adoption request and take the pet off the catalog
/// POST /api/adopt
///
/// The request row is written before the pet is touched and is never rolled
/// back: a missing pet leaves the request in place, and a failed pet update
/// leaves an orphaned request behind. Concurrent adoptions of the same pet
/// are not serialized and can both succeed.
pub async fn adopt(
    req: HttpRequest,
    adoptions: web::Data<AdoptionService>,
    pets: web::Data<PetService>,
    tokens: web::Data<TokenCodec>,
    params: Option<Params<AdoptParams>>,
) -> ActixResult<HttpResponse> {
    let username = match bearer_identity(&req, &tokens) {
        Ok(username) => username,
        Err(response) => return Ok(response),
    };

    let Some(params) = params.map(into_params) else {
        return Ok(HttpResponse::BadRequest().json(error_body(MSG_INVALID_PARAMS)));
    };

    // The token identity is a username; it is stored in the user_email column.
    let request = match adoptions
        .submit(&username, params.pet_id, &params.pet_name)
        .await
    {
        Ok(request) => request,
        Err(e) => return Ok(internal_error(MSG_ADOPTION_FAILED, e)),
    };

    match pets.get_by_id(params.pet_id).await {
        Ok(Some(mut pet)) => {
            pet.available = false;
            if let Err(e) = pets.save(&pet).await {
                return Ok(internal_error(MSG_ADOPTION_FAILED, e));
            }
            log::info!("Pet {} marked unavailable", params.pet_id);
        }
        Ok(None) => {
            log::warn!(
                "Adoption request {} references missing pet {}",
                request.id,
                params.pet_id
            );
        }
        Err(e) => return Ok(internal_error(MSG_ADOPTION_FAILED, e)),
    }

    let response = AdoptResponse {
        message: MSG_ADOPTION_SUBMITTED.to_string(),
        request_id: request.id,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Health check endpoint
/// GET /health
pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok"
    })))
}
