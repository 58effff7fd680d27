//! Products Domain
//!
//! Seller-owned inventory items with fixed-point prices, stock quantities,
//! and soft delete. Catalog reads are public; every mutation is scoped to
//! the owning seller, and another seller's product is indistinguishable
//! from a missing one on the write paths.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use models::{CreateProduct, Product, ProductStatus, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
