//! API routes module

pub mod health;
pub mod orders;
pub mod products;
pub mod sellers;

use axum::Router;

use crate::state::AppState;

/// Create all API routes, nested under /api by the server wrapper
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/sellers", sellers::router(state))
        .nest("/products", products::router(state))
        .nest("/orders", orders::router(state))
}
