//! HTTP server factory and configuration.
//! Provides a reusable function to create and configure the HTTP server
//! for use in both the main binary and tests.
use crate::handlers::{adopt, health, list_available_pets, login, register};
use crate::services::Services;
use actix_web::{middleware, web, App, HttpServer};

/// bcrypt work factor for test servers; the lowest the algorithm allows.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Register application data and routes.
pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(web::Data::new(services.users.clone()))
        .app_data(web::Data::new(services.pets.clone()))
        .app_data(web::Data::new(services.adoptions.clone()))
        .app_data(web::Data::new(services.tokens))
        .route("/health", web::get().to(health))
        .route("/api/auth/login", web::post().to(login))
        .route("/api/users/register", web::post().to(register))
        .route("/api/pets", web::get().to(list_available_pets))
        .route("/api/adopt", web::post().to(adopt));
}

/// Create a configured HTTP server
///
/// Takes the wired services and a bind address, then returns a fully
/// configured server ready to be awaited.
///
/// # Example
/// ```ignore
/// let pool = db::create_pool("petadoption.db")?;
/// let services = Services::new(pool, bcrypt::DEFAULT_COST);
/// server::create_http_server(services, "127.0.0.1:8080")?.await?;
/// ```
pub fn create_http_server(
    services: Services,
    bind_addr: &str,
) -> std::io::Result<actix_web::dev::Server> {
    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .configure(move |cfg| configure(cfg, &services))
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

/// Services over a fresh in-memory database with a cheap bcrypt cost.
pub fn create_test_services() -> Services {
    Services::new(crate::db::create_test_pool(), TEST_BCRYPT_COST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Pet;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[tokio::test]
    async fn test_create_http_server_with_test_services() {
        let result = create_http_server(create_test_services(), "127.0.0.1:0");
        assert!(result.is_ok(), "create_http_server should succeed");
    }

    #[tokio::test]
    async fn test_create_http_server_invalid_address() {
        let result = create_http_server(create_test_services(), "invalid_address:99999");
        assert!(result.is_err(), "create_http_server should fail with invalid address");
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let services = create_test_services();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_register_endpoint_accepts_form_body() {
        let services = create_test_services();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        let req = test::TestRequest::post()
            .uri("/api/users/register")
            .set_form([
                ("username", "alice"),
                ("email", "alice@example.com"),
                ("password", "pw"),
            ])
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], "alice@example.com");
        assert!(body["id"].as_i64().is_some());
    }

    #[actix_web::test]
    async fn test_register_endpoint_accepts_query_string() {
        let services = create_test_services();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        let req = test::TestRequest::post()
            .uri("/api/users/register?username=bob&email=bob%40example.com&password=pw")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_register_invalid_email_is_bad_request() {
        let services = create_test_services();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        let req = test::TestRequest::post()
            .uri("/api/users/register")
            .set_form([("username", "carol"), ("email", "nope"), ("password", "pw")])
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], crate::handlers::rest::MSG_INVALID_USER_DATA);
        assert!(!services.users.exists_by_username("carol").await.expect("query"));
    }

    #[actix_web::test]
    async fn test_list_pets_endpoint() {
        let services = create_test_services();
        services
            .pets
            .save(&Pet::new("Rex", "Dog", "Beagle", "Male"))
            .await
            .expect("save");
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        let req = test::TestRequest::get().uri("/api/pets").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<Pet> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].name, "Rex");
    }

    #[actix_web::test]
    async fn test_list_pets_storage_failure_returns_empty_array() {
        let pool = crate::db::create_test_pool();
        let services = Services::new(pool.clone(), TEST_BCRYPT_COST);
        services.pets.save(&Pet::new("Rex", "Dog", "Beagle", "Male")).await.expect("save");
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        pool.lock()
            .await
            .execute_batch("DROP TABLE pets")
            .expect("drop table");

        let req = test::TestRequest::get().uri("/api/pets").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Vec<Pet> = test::read_body_json(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_adopt_without_params_is_bad_request() {
        let services = create_test_services();
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await;

        let token = services.tokens.issue("alice");
        let req = test::TestRequest::post()
            .uri("/api/adopt")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(services.adoptions.list_for_user("alice").await.expect("list").is_empty());
    }
}
