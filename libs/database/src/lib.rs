//! PostgreSQL connection management for the inventory service.
//!
//! Provides pooled connections with retry, migration running, and health
//! checks on top of SeaORM.
//!
//! # Example
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(&config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "inventory-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
