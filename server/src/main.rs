//! Pet Adoption Server
//!
//! Main server entry point. Handles:
//! - Command-line argument parsing
//! - Database initialization and seeding
//! - HTTP server startup
use anyhow::Context;
use pet_adoption_server::config::Config;
use pet_adoption_server::db;
use pet_adoption_server::server;
use pet_adoption_server::services::Services;
use std::fs;
use std::process;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();

    let config = Config::from_args();

    log::info!("Starting Pet Adoption Server");
    log::info!("Database: {:?}", config.database);
    log::info!("Port: {}", config.port);

    // Write PID file if specified
    if let Some(pidfile) = &config.pidfile {
        let pid = process::id().to_string();
        fs::write(pidfile, pid)
            .with_context(|| format!("Failed to write PID file {}", pidfile.display()))?;
        log::info!("PID file written to: {:?}", pidfile);
    }

    let pool = db::create_pool(&config.database).with_context(|| {
        format!("Failed to open database {}", config.database.display())
    })?;
    log::info!("Database initialized");

    if config.no_seed {
        log::info!("Seeding disabled");
    } else {
        let report = db::seed::seed_database(&pool, config.bcrypt_cost)
            .await
            .context("Failed to seed database")?;
        log::info!(
            "Seeding complete (admin created: {}, pets created: {})",
            report.admin_created,
            report.pets_created
        );
    }

    let services = Services::new(pool, config.bcrypt_cost);

    let bind_addr = config.bind_addr();
    log::info!("Starting HTTP server on {}", bind_addr);

    server::create_http_server(services, &bind_addr)
        .with_context(|| format!("Failed to bind {bind_addr}"))?
        .await
        .context("HTTP server terminated with an error")?;

    Ok(())
}
