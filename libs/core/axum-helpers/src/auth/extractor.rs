use super::jwt::JwtClaims;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Extractor for the authenticated seller's ID.
///
/// Reads the `JwtClaims` inserted by `bearer_auth_middleware` and parses
/// the subject as a UUID. Handlers that require authentication take this
/// as a parameter instead of touching request extensions themselves.
///
/// # Example
///
/// ```ignore
/// async fn get_my_products(
///     AuthSeller(seller_id): AuthSeller,
///     State(service): State<Arc<ProductService<PgProductRepository>>>,
/// ) -> Result<Json<Vec<ProductResponse>>, ProductError> {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthSeller(pub Uuid);

impl<S> FromRequestParts<S> for AuthSeller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let seller_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(AuthSeller(seller_id))
    }
}
