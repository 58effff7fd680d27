//! Stateless JWT bearer authentication.
//!
//! The identity flow is deliberately small: `JwtAuth` signs and
//! verifies HS256 tokens, `bearer_auth_middleware` decodes the
//! `Authorization: Bearer` header, re-checks the subject through an
//! `ActiveSellerLookup` and stores the claims in request extensions,
//! and `AuthSeller` hands the authenticated seller id to handlers as
//! an explicit argument.

pub mod config;
pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use extractor::AuthSeller;
pub use jwt::{JwtAuth, JwtClaims, TOKEN_TTL};
pub use middleware::{bearer_auth_middleware, ActiveSellerLookup, BearerAuth};
