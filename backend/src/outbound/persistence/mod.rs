//! PostgreSQL persistence adapter built on Diesel, `diesel-async` and `bb8`.

mod diesel_registration_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_registration_repository::DieselRegistrationRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
