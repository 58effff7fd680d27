//! Order API routes

use std::sync::Arc;

use axum::Router;
use axum_helpers::{BearerAuth, JwtAuth};
use domain_orders::{handlers, OrderService, PgOrderRepository};
use domain_sellers::PgSellerRepository;

use crate::state::AppState;

/// Create the orders router
pub fn router(state: &AppState) -> Router {
    let auth = BearerAuth::new(
        JwtAuth::new(&state.config.jwt),
        Arc::new(PgSellerRepository::new(state.db.clone())),
    );

    let repository = PgOrderRepository::new(state.db.clone());
    let service = OrderService::new(repository);

    handlers::router(service, auth)
}
