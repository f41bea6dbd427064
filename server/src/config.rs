//! Configuration management for the pet adoption server.
//! Handles command-line argument parsing and config structure.
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "Pet Adoption Server")]
#[command(about = "HTTP backend for a pet adoption site", long_about = None)]
pub struct Config {
    /// Host to bind (default: 127.0.0.1)
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Server port (default: 8080)
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// SQLite database file path (default: petadoption.db)
    #[arg(long, default_value = "petadoption.db")]
    pub database: PathBuf,

    /// PID file path (optional) - write server PID to this file on startup
    #[arg(long)]
    pub pidfile: Option<PathBuf>,

    /// bcrypt work factor used when hashing new passwords
    #[arg(long, default_value_t = bcrypt::DEFAULT_COST, value_parser = clap::value_parser!(u32).range(4..=31))]
    pub bcrypt_cost: u32,

    /// Skip creating the admin account and sample pets on startup
    #[arg(long)]
    pub no_seed: bool,
}

impl Config {
    /// Parse command-line arguments into Config
    pub fn from_args() -> Self {
        Config::parse()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::try_parse_from(["pet-adoption-server"]).expect("defaults parse");
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database.to_str().unwrap(), "petadoption.db");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.pidfile.is_none());
        assert!(!config.no_seed);
    }

    #[test]
    fn test_custom_port_and_host() {
        let config =
            Config::try_parse_from(["pet-adoption-server", "--port", "9090", "--host", "0.0.0.0"])
                .expect("args parse");
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_custom_database_and_seed_flag() {
        let config = Config::try_parse_from([
            "pet-adoption-server",
            "--database",
            "/tmp/pets.db",
            "--no-seed",
        ])
        .expect("args parse");
        assert_eq!(config.database.to_str().unwrap(), "/tmp/pets.db");
        assert!(config.no_seed);
    }

    #[test]
    fn test_bcrypt_cost_out_of_range_rejected() {
        let result = Config::try_parse_from(["pet-adoption-server", "--bcrypt-cost", "2"]);
        assert!(result.is_err());
    }
}
