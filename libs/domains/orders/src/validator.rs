//! Pure request validation, run before any database interaction.

use std::str::FromStr;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, OrderType, ValidatedOrder};

/// Validate an order request and parse its order type.
///
/// Side-effect free; a request that fails here never opens a
/// transaction.
pub fn validate_request(request: CreateOrder) -> OrderResult<ValidatedOrder> {
    let order_type = OrderType::from_str(&request.order_type)
        .map_err(|_| OrderError::InvalidOrderType(request.order_type.clone()))?;

    if request.items.is_empty() {
        return Err(OrderError::InvalidItemList);
    }

    for (index, item) in request.items.iter().enumerate() {
        if item.quantity < 1 {
            return Err(OrderError::InvalidItem(format!(
                "item {}: quantity must be at least 1, got {}",
                index, item.quantity
            )));
        }
    }

    Ok(ValidatedOrder {
        order_type,
        items: request.items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItemRequest;
    use uuid::Uuid;

    fn item(quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id: Uuid::now_v7(),
            quantity,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let validated = validate_request(CreateOrder {
            order_type: "outgoing".to_string(),
            items: vec![item(3), item(1)],
        })
        .unwrap();

        assert_eq!(validated.order_type, OrderType::Outgoing);
        assert_eq!(validated.items.len(), 2);
    }

    #[test]
    fn test_unknown_order_type_is_rejected() {
        let result = validate_request(CreateOrder {
            order_type: "sideways".to_string(),
            items: vec![item(1)],
        });
        assert!(matches!(result, Err(OrderError::InvalidOrderType(_))));
    }

    #[test]
    fn test_empty_item_list_is_rejected() {
        let result = validate_request(CreateOrder {
            order_type: "incoming".to_string(),
            items: vec![],
        });
        assert!(matches!(result, Err(OrderError::InvalidItemList)));
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        for quantity in [0, -5] {
            let result = validate_request(CreateOrder {
                order_type: "incoming".to_string(),
                items: vec![item(quantity)],
            });
            assert!(matches!(result, Err(OrderError::InvalidItem(_))));
        }
    }
}
