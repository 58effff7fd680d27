//! Pure stock adjustment math, shared by every repository backend.

use domain_products::Product;
use rust_decimal::Decimal;

use crate::error::{OrderError, OrderResult};
use crate::models::OrderType;

/// Outcome of applying one order item against a product.
#[derive(Debug, Clone, PartialEq)]
pub struct StockAdjustment {
    /// Product quantity after the movement
    pub new_quantity: i32,
    /// Unit price snapshot taken at adjustment time
    pub price_at_time: Decimal,
    /// price_at_time * requested quantity
    pub line_total: Decimal,
}

/// Apply one order item to a product's stock.
///
/// Outgoing movements require sufficient stock; incoming movements add
/// as long as the resulting quantity still fits in an i32. The caller
/// persists `new_quantity`.
pub fn apply_item(
    product: &Product,
    order_type: OrderType,
    quantity: i32,
) -> OrderResult<StockAdjustment> {
    let new_quantity = match order_type {
        OrderType::Outgoing => {
            if product.quantity < quantity {
                return Err(OrderError::InsufficientStock {
                    product_name: product.name.clone(),
                });
            }
            product.quantity - quantity
        }
        OrderType::Incoming => product.quantity.checked_add(quantity).ok_or_else(|| {
            OrderError::StockLimitExceeded {
                product_name: product.name.clone(),
            }
        })?,
    };

    let price_at_time = product.price;
    let line_total = price_at_time * Decimal::from(quantity);

    Ok(StockAdjustment {
        new_quantity,
        price_at_time,
        line_total,
    })
}
