use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Direction of a stock movement
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
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderType {
    /// Stock arriving; quantities are added
    #[sea_orm(string_value = "incoming")]
    Incoming,
    /// Stock leaving; quantities are subtracted after a stock check
    #[sea_orm(string_value = "outgoing")]
    Outgoing,
}

/// One requested line of an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// DTO for creating an order
///
/// `order_type` stays a raw string here; parsing it is the first step
/// of the order validator so a bad value gets a descriptive error
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[schema(example = "outgoing")]
    pub order_type: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemRequest>,
}

/// A request that passed the order validator
#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    pub order_type: OrderType,
    pub items: Vec<OrderItemRequest>,
}

/// Order header - immutable once created
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub order_type: OrderType,
    /// Sum of all line totals, finalized in the creating transaction
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A persisted order line with its price snapshot
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderLine {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Product name at read time, resolved for display
    pub product_name: String,
    pub quantity: i32,
    /// Unit price captured when the order was created; later product
    /// price changes never alter it
    pub price_at_time: Decimal,
    /// price_at_time * quantity
    pub line_total: Decimal,
}

/// Full order view returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetails {
    pub id: Uuid,
    pub order_type: OrderType,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

impl OrderDetails {
    pub fn new(order: Order, items: Vec<OrderLine>) -> Self {
        Self {
            id: order.id,
            order_type: order.order_type,
            total_price: order.total_price,
            created_at: order.created_at,
            items,
        }
    }
}
