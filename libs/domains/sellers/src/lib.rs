//! Sellers Domain
//!
//! Seller accounts with registration, login, and self-service profile
//! management. Accounts are soft deleted: a deleted seller disappears from
//! reads but its rows stay in place.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing, token issuing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{SellerError, SellerResult};
pub use models::{
    LoginRequest, LoginResponse, NewSeller, RecordStatus, RegisterSeller, Seller, SellerChanges,
    SellerResponse, UpdateSeller,
};
pub use postgres::PgSellerRepository;
pub use repository::{InMemorySellerRepository, SellerRepository};
pub use service::SellerService;
