use chrono::{DateTime, Utc};
use regex::Regex;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Regex pattern for usernames: alphanumeric plus hyphen, underscore, dot
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap());

fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if !USERNAME_PATTERN.is_match(username) {
        return Err(validator::ValidationError::new("invalid_username"));
    }
    Ok(())
}

/// Soft-delete lifecycle status, shared by sellers and products
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "record_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordStatus {
    /// Visible to all read paths
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    /// Hidden from reads, rows stay in place
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

/// Seller account - the tenant boundary for products and orders
#[derive(Debug, Clone)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    /// Argon2 PHC string, never leaves the service layer
    pub password_hash: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a seller, returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerResponse {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<Seller> for SellerResponse {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            name: seller.name,
            username: seller.username,
            created_at: seller.created_at,
        }
    }
}

/// DTO for registering a new seller account
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterSeller {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 50), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Internal record handed to the repository after password hashing
#[derive(Debug, Clone)]
pub struct NewSeller {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

/// DTO for updating a seller's own profile
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSeller {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 3, max = 50), custom(function = "validate_username"))]
    pub username: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

/// Field changes handed to the repository, password already hashed
#[derive(Debug, Clone, Default)]
pub struct SellerChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

/// DTO for logging in
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login response with a bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub seller: SellerResponse,
}

impl Seller {
    /// Create a new active seller from a hashed registration
    pub fn new(input: NewSeller) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            username: input.username,
            password_hash: input.password_hash,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply profile changes
    pub fn apply_changes(&mut self, changes: SellerChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}
