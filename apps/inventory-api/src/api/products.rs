//! Product API routes

use std::sync::Arc;

use axum::Router;
use axum_helpers::{BearerAuth, JwtAuth};
use domain_products::{handlers, PgProductRepository, ProductService};
use domain_sellers::PgSellerRepository;

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let auth = BearerAuth::new(
        JwtAuth::new(&state.config.jwt),
        Arc::new(PgSellerRepository::new(state.db.clone())),
    );

    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);

    handlers::router(service, auth)
}
