use super::jwt::JwtAuth;
use crate::errors::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// Lookup for whether a token subject still maps to an active seller.
///
/// A signed token outlives account changes, so the middleware re-checks
/// the subject on every request; soft-deleted accounts disappear from
/// this lookup and their tokens stop working before they expire.
#[async_trait]
pub trait ActiveSellerLookup: Send + Sync {
    async fn is_active_seller(&self, seller_id: Uuid) -> Result<bool, String>;
}

/// State for `bearer_auth_middleware`: token verification plus the
/// per-request subject revalidation.
#[derive(Clone)]
pub struct BearerAuth {
    jwt: JwtAuth,
    sellers: Arc<dyn ActiveSellerLookup>,
}

impl BearerAuth {
    pub fn new(jwt: JwtAuth, sellers: Arc<dyn ActiveSellerLookup>) -> Self {
        Self { jwt, sellers }
    }
}

/// Extract JWT from the Authorization header: "Bearer <token>"
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// JWT authentication middleware
///
/// Validates the bearer token from the Authorization header, confirms
/// its subject is still an active seller, and inserts `JwtClaims` into
/// request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::{bearer_auth_middleware, BearerAuth};
///
/// let protected_routes = Router::new()
///     .route("/api/protected", get(protected_handler))
///     .layer(axum::middleware::from_fn_with_state(
///         bearer_auth.clone(),
///         bearer_auth_middleware,
///     ));
/// ```
pub async fn bearer_auth_middleware(
    State(auth): State<BearerAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_bearer_token(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header");
            return Err(AppError::Unauthorized("No token provided".to_string()));
        }
    };

    let claims = match auth.jwt.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }
    };

    let seller_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    match auth.sellers.is_active_seller(seller_id).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!(%seller_id, "Token subject is not an active seller");
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }
        Err(e) => {
            tracing::error!(error = %e, "Seller revalidation failed");
            return Err(AppError::InternalServerError(
                "Authentication backend unavailable".to_string(),
            ));
        }
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
