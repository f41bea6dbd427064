//! Pet adoption server library.
//! Exposes the storage, service and HTTP layers so the binary and the
//! integration tests share one wiring.
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod server;
pub mod services;
pub mod token;
