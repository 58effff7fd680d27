use async_trait::async_trait;
use domain_products::{InMemoryProductRepository, Product, ProductError, ProductRepository};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::adjustment;
use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderDetails, OrderLine, ValidatedOrder};

/// Repository trait for Order persistence
///
/// `create` runs the whole order transaction: resolve products, adjust
/// stock, snapshot prices, accumulate the total. Either everything
/// commits or nothing does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Create an order and apply its stock movements atomically
    async fn create(&self, seller_id: Uuid, order: ValidatedOrder) -> OrderResult<OrderDetails>;

    /// Get one of the seller's orders with its line items
    async fn get_for_seller(&self, id: Uuid, seller_id: Uuid)
        -> OrderResult<Option<OrderDetails>>;

    /// List the seller's orders, newest first
    async fn list_for_seller(&self, seller_id: Uuid) -> OrderResult<Vec<OrderDetails>>;
}

fn product_error(err: ProductError) -> OrderError {
    OrderError::Internal(err.to_string())
}

/// In-memory implementation of OrderRepository (for development/testing)
///
/// Stages every stock change first and writes them back only once all
/// items succeed, mirroring the transactional backend.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, (Order, Vec<OrderLine>)>>>,
    products: Arc<InMemoryProductRepository>,
}

impl InMemoryOrderRepository {
    pub fn new(products: Arc<InMemoryProductRepository>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            products,
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, seller_id: Uuid, order: ValidatedOrder) -> OrderResult<OrderDetails> {
        let mut staged: HashMap<Uuid, Product> = HashMap::new();
        let mut lines: Vec<OrderLine> = Vec::with_capacity(order.items.len());
        let mut total = Decimal::ZERO;

        for item in &order.items {
            // A product already staged by an earlier line is re-read
            // from the stage so repeated lines see each other's changes
            let mut product = match staged.get(&item.product_id) {
                Some(product) => product.clone(),
                None => self
                    .products
                    .get_for_seller(item.product_id, seller_id)
                    .await
                    .map_err(product_error)?
                    .ok_or(OrderError::ProductNotFound(item.product_id))?,
            };

            let adjustment = adjustment::apply_item(&product, order.order_type, item.quantity)?;

            product.quantity = adjustment.new_quantity;
            staged.insert(product.id, product.clone());

            total += adjustment.line_total;
            lines.push(OrderLine {
                id: Uuid::now_v7(),
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: item.quantity,
                price_at_time: adjustment.price_at_time,
                line_total: adjustment.line_total,
            });
        }

        // All items validated; write the staged quantities back
        for (product_id, product) in &staged {
            self.products
                .set_quantity(*product_id, seller_id, product.quantity)
                .await
                .map_err(product_error)?;
        }

        let header = Order {
            id: Uuid::now_v7(),
            seller_id,
            order_type: order.order_type,
            total_price: total,
            created_at: chrono::Utc::now(),
        };

        let mut orders = self.orders.write().await;
        orders.insert(header.id, (header.clone(), lines.clone()));

        tracing::info!(order_id = %header.id, seller_id = %seller_id, total = %total, "Created order");
        Ok(OrderDetails::new(header, lines))
    }

    async fn get_for_seller(
        &self,
        id: Uuid,
        seller_id: Uuid,
    ) -> OrderResult<Option<OrderDetails>> {
        let orders = self.orders.read().await;
        Ok(orders
            .get(&id)
            .filter(|(order, _)| order.seller_id == seller_id)
            .map(|(order, lines)| OrderDetails::new(order.clone(), lines.clone())))
    }

    async fn list_for_seller(&self, seller_id: Uuid) -> OrderResult<Vec<OrderDetails>> {
        let orders = self.orders.read().await;

        let mut result: Vec<OrderDetails> = orders
            .values()
            .filter(|(order, _)| order.seller_id == seller_id)
            .map(|(order, lines)| OrderDetails::new(order.clone(), lines.clone()))
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItemRequest, OrderType};
    use domain_products::{CreateProduct, UpdateProduct};
    use rust_decimal_macros::dec;

    async fn seed_product(
        products: &InMemoryProductRepository,
        seller_id: Uuid,
        name: &str,
        price: Decimal,
        quantity: i32,
    ) -> Product {
        products
            .create(
                seller_id,
                CreateProduct {
                    name: name.to_string(),
                    price,
                    quantity,
                    category: "produce".to_string(),
                    expiry: None,
                    image_url: None,
                },
            )
            .await
            .unwrap()
    }

    fn outgoing(items: Vec<OrderItemRequest>) -> ValidatedOrder {
        ValidatedOrder {
            order_type: OrderType::Outgoing,
            items,
        }
    }

    fn incoming(items: Vec<OrderItemRequest>) -> ValidatedOrder {
        ValidatedOrder {
            order_type: OrderType::Incoming,
            items,
        }
    }

    fn item(product_id: Uuid, quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_outgoing_order_adjusts_stock_and_totals() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let seller_id = Uuid::now_v7();

        let apples = seed_product(&products, seller_id, "Apples", dec!(2.00), 10).await;
        let pears = seed_product(&products, seller_id, "Pears", dec!(3.50), 4).await;

        let details = repo
            .create(
                seller_id,
                outgoing(vec![item(apples.id, 3), item(pears.id, 2)]),
            )
            .await
            .unwrap();

        assert_eq!(details.total_price, dec!(13.00));
        assert_eq!(details.items.len(), 2);
        assert_eq!(details.items[0].line_total, dec!(6.00));
        assert_eq!(details.items[1].line_total, dec!(7.00));

        let apples = products.get_active(apples.id).await.unwrap().unwrap();
        let pears = products.get_active(pears.id).await.unwrap().unwrap();
        assert_eq!(apples.quantity, 7);
        assert_eq!(pears.quantity, 2);
    }

    #[tokio::test]
    async fn test_incoming_order_adds_stock() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let seller_id = Uuid::now_v7();

        let apples = seed_product(&products, seller_id, "Apples", dec!(2.00), 1).await;

        repo.create(seller_id, incoming(vec![item(apples.id, 99)]))
            .await
            .unwrap();

        let apples = products.get_active(apples.id).await.unwrap().unwrap();
        assert_eq!(apples.quantity, 100);
    }

    #[tokio::test]
    async fn test_failed_order_leaves_all_stock_untouched() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let seller_id = Uuid::now_v7();

        let apples = seed_product(&products, seller_id, "Apples", dec!(2.00), 10).await;
        let pears = seed_product(&products, seller_id, "Pears", dec!(3.50), 1).await;

        // Second item fails; the first item's subtraction must not stick
        let result = repo
            .create(
                seller_id,
                outgoing(vec![item(apples.id, 5), item(pears.id, 2)]),
            )
            .await;

        assert!(matches!(result, Err(OrderError::InsufficientStock { .. })));

        let apples = products.get_active(apples.id).await.unwrap().unwrap();
        let pears = products.get_active(pears.id).await.unwrap().unwrap();
        assert_eq!(apples.quantity, 10);
        assert_eq!(pears.quantity, 1);

        assert!(repo.list_for_seller(seller_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_another_sellers_product_is_not_found() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let owner = Uuid::now_v7();
        let intruder = Uuid::now_v7();

        let apples = seed_product(&products, owner, "Apples", dec!(2.00), 10).await;

        let result = repo
            .create(intruder, outgoing(vec![item(apples.id, 1)]))
            .await;
        assert!(matches!(result, Err(OrderError::ProductNotFound(_))));

        let apples = products.get_active(apples.id).await.unwrap().unwrap();
        assert_eq!(apples.quantity, 10);
    }

    #[tokio::test]
    async fn test_repeated_product_lines_apply_sequentially() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let seller_id = Uuid::now_v7();

        let apples = seed_product(&products, seller_id, "Apples", dec!(1.00), 5).await;

        // 3 + 3 exceeds the 5 in stock even though each line alone fits
        let result = repo
            .create(
                seller_id,
                outgoing(vec![item(apples.id, 3), item(apples.id, 3)]),
            )
            .await;
        assert!(matches!(result, Err(OrderError::InsufficientStock { .. })));

        let details = repo
            .create(
                seller_id,
                outgoing(vec![item(apples.id, 3), item(apples.id, 2)]),
            )
            .await
            .unwrap();
        assert_eq!(details.total_price, dec!(5.00));

        let apples = products.get_active(apples.id).await.unwrap().unwrap();
        assert_eq!(apples.quantity, 0);
    }

    #[tokio::test]
    async fn test_price_snapshot_survives_later_price_change() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let seller_id = Uuid::now_v7();

        let apples = seed_product(&products, seller_id, "Apples", dec!(2.00), 10).await;

        let details = repo
            .create(seller_id, outgoing(vec![item(apples.id, 2)]))
            .await
            .unwrap();

        products
            .update(
                apples.id,
                seller_id,
                UpdateProduct {
                    price: Some(dec!(9.99)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let fetched = repo
            .get_for_seller(details.id, seller_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.items[0].price_at_time, dec!(2.00));
        assert_eq!(fetched.total_price, dec!(4.00));
    }

    #[tokio::test]
    async fn test_orders_are_seller_scoped() {
        let products = Arc::new(InMemoryProductRepository::new());
        let repo = InMemoryOrderRepository::new(products.clone());
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();

        let apples = seed_product(&products, alice, "Apples", dec!(2.00), 10).await;
        let details = repo
            .create(alice, outgoing(vec![item(apples.id, 1)]))
            .await
            .unwrap();

        assert!(repo
            .get_for_seller(details.id, bob)
            .await
            .unwrap()
            .is_none());
        assert!(repo.list_for_seller(bob).await.unwrap().is_empty());
    }
}
