//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT bearer authentication
//! - **[`server`]**: router/server setup, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`audit`]**: audit logging for security-relevant events

// Domain modules
pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    bearer_auth_middleware, ActiveSellerLookup, AuthSeller, BearerAuth, JwtAuth, JwtClaims,
    JwtConfig, TOKEN_TTL,
};

// Re-export server types
pub use server::{create_app, create_router, shutdown_signal};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export audit types
pub use audit::{extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome};
