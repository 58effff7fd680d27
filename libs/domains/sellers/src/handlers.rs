use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use axum_helpers::{
    bearer_auth_middleware,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome, AuthSeller, BearerAuth,
    UuidPath, ValidatedJson,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SellerResult;
use crate::models::{LoginRequest, LoginResponse, RegisterSeller, SellerResponse, UpdateSeller};
use crate::repository::SellerRepository;
use crate::service::SellerService;

pub const TAG: &str = "sellers";

/// OpenAPI documentation for the Sellers API
#[derive(OpenApi)]
#[openapi(
    paths(register_seller, login, list_sellers, get_seller, update_seller, delete_seller),
    components(
        schemas(SellerResponse, RegisterSeller, UpdateSeller, LoginRequest, LoginResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Seller account endpoints")
    )
)]
pub struct ApiDoc;

/// Create the seller router
///
/// Registration, login, and reads are public; profile updates and
/// deletion require a bearer token.
pub fn router<R: SellerRepository + 'static>(
    service: SellerService<R>,
    auth: BearerAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", post(register_seller).get(list_sellers))
        .route("/login", post(login))
        .route("/{id}", get(get_seller));

    let protected = Router::new()
        .route("/{id}", patch(update_seller).delete(delete_seller))
        .layer(middleware::from_fn_with_state(
            auth,
            bearer_auth_middleware,
        ));

    public.merge(protected).with_state(shared_service)
}

/// Register a new seller account
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = RegisterSeller,
    responses(
        (status = 201, description = "Seller registered successfully", body = SellerResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_seller<R: SellerRepository>(
    State(service): State<Arc<SellerService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterSeller>,
) -> SellerResult<impl IntoResponse> {
    let seller = service.register(input).await?;

    AuditEvent::new(
        Some(seller.id.to_string()),
        "seller.register",
        Some(format!("seller:{}", seller.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "username": seller.username }))
    .log();

    Ok((StatusCode::CREATED, Json(seller)))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: SellerRepository>(
    State(service): State<Arc<SellerService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> SellerResult<Json<LoginResponse>> {
    let username = input.username.clone();

    let response = match service.login(input).await {
        Ok(response) => response,
        Err(e) => {
            AuditEvent::new(
                None,
                "seller.login",
                None,
                AuditOutcome::Failure,
            )
            .with_ip(extract_ip_from_headers(&headers))
            .with_user_agent(extract_user_agent(&headers))
            .with_details(json!({ "username": username }))
            .log();
            return Err(e);
        }
    };

    AuditEvent::new(
        Some(response.seller.id.to_string()),
        "seller.login",
        None,
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(response))
}

/// List all active sellers
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of sellers", body = Vec<SellerResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_sellers<R: SellerRepository>(
    State(service): State<Arc<SellerService<R>>>,
) -> SellerResult<Json<Vec<SellerResponse>>> {
    let sellers = service.list_sellers().await?;
    Ok(Json(sellers))
}

/// Get a seller by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "Seller found", body = SellerResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_seller<R: SellerRepository>(
    State(service): State<Arc<SellerService<R>>>,
    UuidPath(id): UuidPath,
) -> SellerResult<Json<SellerResponse>> {
    let seller = service.get_seller(id).await?;
    Ok(Json(seller))
}

/// Update the authenticated seller's own profile
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Seller ID")
    ),
    request_body = UpdateSeller,
    responses(
        (status = 200, description = "Seller updated successfully", body = SellerResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_seller<R: SellerRepository>(
    State(service): State<Arc<SellerService<R>>>,
    AuthSeller(auth_seller_id): AuthSeller,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateSeller>,
) -> SellerResult<Json<SellerResponse>> {
    let seller = service.update_seller(id, auth_seller_id, input).await?;
    Ok(Json(seller))
}

/// Soft delete the authenticated seller's own account
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Seller ID")
    ),
    responses(
        (status = 204, description = "Seller deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_seller<R: SellerRepository>(
    State(service): State<Arc<SellerService<R>>>,
    AuthSeller(auth_seller_id): AuthSeller,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> SellerResult<impl IntoResponse> {
    service.delete_seller(id, auth_seller_id).await?;

    AuditEvent::new(
        Some(auth_seller_id.to_string()),
        "seller.delete",
        Some(format!("seller:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
