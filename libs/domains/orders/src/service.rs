use std::sync::Arc;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, OrderDetails};
use crate::repository::OrderRepository;
use crate::validator;

/// Service layer for Order business logic
#[derive(Clone)]
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and execute an order transaction for the seller
    pub async fn create_order(
        &self,
        seller_id: Uuid,
        request: CreateOrder,
    ) -> OrderResult<OrderDetails> {
        // Rejected requests never reach the database
        let validated = validator::validate_request(request)?;
        self.repository.create(seller_id, validated).await
    }

    /// Get one of the seller's orders
    pub async fn get_order(&self, id: Uuid, seller_id: Uuid) -> OrderResult<OrderDetails> {
        self.repository
            .get_for_seller(id, seller_id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// List the seller's orders
    pub async fn list_orders(&self, seller_id: Uuid) -> OrderResult<Vec<OrderDetails>> {
        self.repository.list_for_seller(seller_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItemRequest, OrderType};
    use crate::repository::MockOrderRepository;

    #[tokio::test]
    async fn test_invalid_request_never_reaches_repository() {
        // No expectations set; a repository call would panic
        let mock_repo = MockOrderRepository::new();
        let service = OrderService::new(mock_repo);

        let result = service
            .create_order(
                Uuid::now_v7(),
                CreateOrder {
                    order_type: "sideways".to_string(),
                    items: vec![OrderItemRequest {
                        product_id: Uuid::now_v7(),
                        quantity: 1,
                    }],
                },
            )
            .await;

        assert!(matches!(result, Err(OrderError::InvalidOrderType(_))));
    }

    #[tokio::test]
    async fn test_valid_request_is_passed_through_parsed() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo.expect_create().returning(|_, validated| {
            assert_eq!(validated.order_type, OrderType::Incoming);
            Ok(OrderDetails {
                id: Uuid::now_v7(),
                order_type: validated.order_type,
                total_price: rust_decimal::Decimal::ZERO,
                created_at: chrono::Utc::now(),
                items: vec![],
            })
        });

        let service = OrderService::new(mock_repo);
        let result = service
            .create_order(
                Uuid::now_v7(),
                CreateOrder {
                    order_type: "incoming".to_string(),
                    items: vec![OrderItemRequest {
                        product_id: Uuid::now_v7(),
                        quantity: 2,
                    }],
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo.expect_get_for_seller().returning(|_, _| Ok(None));

        let service = OrderService::new(mock_repo);
        let result = service.get_order(Uuid::now_v7(), Uuid::now_v7()).await;

        assert!(matches!(result, Err(OrderError::NotFound(_))));
    }
}
