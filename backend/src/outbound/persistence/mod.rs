//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the domain's driven ports on top of
//! `diesel-async` with a `bb8` pool. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) never leave this module; every repository
//! converts rows into domain types and maps Diesel failures into its port's
//! error enum.
//!
//! ```ignore
//! use booking::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/booking")).await?;
//! let users = DieselUserRepository::new(pool, clock);
//! ```

mod diesel_appointment_repository;
mod diesel_error_mapping;
mod diesel_notification_repository;
mod diesel_user_repository;
mod diesel_user_token_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_user_token_repository::DieselUserTokenRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
