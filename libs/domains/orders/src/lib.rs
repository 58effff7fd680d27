//! Orders Domain
//!
//! Incoming and outgoing stock movements recorded as immutable orders.
//! Creating an order is a single transaction: every line item resolves
//! its product, snapshots the price, adjusts stock, and contributes to
//! the order total. Any failure rolls the whole thing back, so stock
//! never reflects a partially applied order.
//!
//! ```text
//! handlers -> service -> validator (pure)
//!                     -> repository -> adjustment engine (pure)
//!                                   -> product rows / order rows
//! ```

pub mod adjustment;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validator;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use models::{
    CreateOrder, Order, OrderDetails, OrderItemRequest, OrderLine, OrderType, ValidatedOrder,
};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
