//! Seller API routes

use std::sync::Arc;

use axum::Router;
use axum_helpers::{BearerAuth, JwtAuth};
use domain_products::{PgProductRepository, ProductService};
use domain_sellers::{handlers, PgSellerRepository, SellerService};

use crate::state::AppState;

/// Create the sellers router, including the public per-seller catalog
/// view at /sellers/{id}/products
pub fn router(state: &AppState) -> Router {
    let jwt_auth = JwtAuth::new(&state.config.jwt);
    let auth = BearerAuth::new(
        jwt_auth.clone(),
        Arc::new(PgSellerRepository::new(state.db.clone())),
    );

    let repository = PgSellerRepository::new(state.db.clone());
    let service = SellerService::new(repository, jwt_auth);

    let product_service = ProductService::new(PgProductRepository::new(state.db.clone()));

    handlers::router(service, auth)
        .merge(domain_products::handlers::seller_products_router(product_service))
}
