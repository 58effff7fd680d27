use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Largest price representable in a decimal(10,2) column: 99,999,999.99
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Prices are non-negative and fit the database column
fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_price"));
    }
    if *price > MAX_PRICE {
        return Err(validator::ValidationError::new("price_too_large"));
    }
    if price.scale() > 2 {
        return Err(validator::ValidationError::new("too_many_decimal_places"));
    }
    Ok(())
}

/// Soft-delete lifecycle status for products
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
pub enum ProductStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

/// Product entity - an inventory item owned by a seller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Owning seller
    pub seller_id: Uuid,
    /// Display name
    pub name: String,
    /// Current unit price (fixed-point, two decimal places)
    pub price: Decimal,
    /// Units in stock
    pub quantity: i32,
    /// Free-form category label
    pub category: String,
    /// Optional expiry date
    pub expiry: Option<NaiveDate>,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Lifecycle status
    #[serde(skip)]
    pub status: ProductStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: i32,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub expiry: Option<NaiveDate>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub expiry: Option<NaiveDate>,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl Product {
    /// Create a new active product for a seller
    pub fn new(seller_id: Uuid, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            seller_id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            expiry: input.expiry,
            image_url: input.image_url,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(expiry) = update.expiry {
            self.expiry = Some(expiry);
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}
