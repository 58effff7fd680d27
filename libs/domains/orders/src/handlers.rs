use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    bearer_auth_middleware,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome, AuthSeller, BearerAuth,
    UuidPath, ValidatedJson,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{CreateOrder, OrderDetails, OrderItemRequest, OrderLine, OrderType};
use crate::repository::OrderRepository;
use crate::service::OrderService;

pub const TAG: &str = "orders";

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(create_order, list_orders, get_order),
    components(
        schemas(CreateOrder, OrderItemRequest, OrderDetails, OrderLine, OrderType),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Stock movement order endpoints")
    )
)]
pub struct ApiDoc;

/// Create the order router; every route requires a bearer token
pub fn router<R: OrderRepository + 'static>(
    service: OrderService<R>,
    auth: BearerAuth,
) -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/{id}", get(get_order))
        .layer(middleware::from_fn_with_state(
            auth,
            bearer_auth_middleware,
        ))
        .with_state(Arc::new(service))
}

/// Create an order and apply its stock movements
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created successfully", body = OrderDetails),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    AuthSeller(seller_id): AuthSeller,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order_type = input.order_type.clone();

    let details = match service.create_order(seller_id, input).await {
        Ok(details) => details,
        Err(e) => {
            AuditEvent::new(
                Some(seller_id.to_string()),
                "order.create",
                None,
                AuditOutcome::Failure,
            )
            .with_ip(extract_ip_from_headers(&headers))
            .with_user_agent(extract_user_agent(&headers))
            .with_details(json!({ "order_type": order_type, "reason": e.to_string() }))
            .log();
            return Err(e);
        }
    };

    AuditEvent::new(
        Some(seller_id.to_string()),
        "order.create",
        Some(format!("order:{}", details.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "order_type": details.order_type,
        "total_price": details.total_price,
        "items": details.items.len(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(details)))
}

/// List the authenticated seller's orders
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of orders", body = Vec<OrderDetails>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    AuthSeller(seller_id): AuthSeller,
) -> OrderResult<Json<Vec<OrderDetails>>> {
    let orders = service.list_orders(seller_id).await?;
    Ok(Json(orders))
}

/// Get one of the authenticated seller's orders
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    AuthSeller(seller_id): AuthSeller,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<OrderDetails>> {
    let order = service.get_order(id, seller_id).await?;
    Ok(Json(order))
}
