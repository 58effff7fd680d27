use async_trait::async_trait;
use domain_products::entity as products;
use domain_products::{Product, ProductStatus};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::adjustment;
use crate::entity::{order, order_item};
use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderDetails, OrderLine, ValidatedOrder};
use crate::repository::OrderRepository;

fn db_error(e: sea_orm::DbErr) -> OrderError {
    OrderError::Internal(format!("Database error: {}", e))
}

pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_lines<C: ConnectionTrait>(
        conn: &C,
        order_id: Uuid,
    ) -> OrderResult<Vec<OrderLine>> {
        let items = order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .order_by_asc(order_item::Column::Id)
            .all(conn)
            .await
            .map_err(db_error)?;

        // Soft-deleted products still carry their name, so no status
        // filter here
        let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        let names: HashMap<Uuid, String> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(conn)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| OrderLine {
                id: item.id,
                product_id: item.product_id,
                product_name: names.get(&item.product_id).cloned().unwrap_or_default(),
                quantity: item.quantity,
                price_at_time: item.price_at_time,
                line_total: item.line_total,
            })
            .collect())
    }
}

/// Apply the whole order inside an open transaction.
///
/// Caller commits on Ok and rolls back on Err; nothing in here is
/// visible until the commit.
async fn apply_order(
    txn: &DatabaseTransaction,
    seller_id: Uuid,
    request: &ValidatedOrder,
) -> OrderResult<OrderDetails> {
    let order_id = Uuid::now_v7();
    let created_at = chrono::Utc::now();

    order::ActiveModel {
        id: Set(order_id),
        seller_id: Set(seller_id),
        order_type: Set(request.order_type),
        total_price: Set(Decimal::ZERO),
        created_at: Set(created_at.into()),
    }
    .insert(txn)
    .await
    .map_err(db_error)?;

    let mut lines: Vec<OrderLine> = Vec::with_capacity(request.items.len());
    let mut total = Decimal::ZERO;

    for item in &request.items {
        // Row lock serializes concurrent orders touching the same
        // product; later lines for the same product re-read the
        // quantity written by earlier ones
        let model = products::Entity::find_by_id(item.product_id)
            .filter(products::Column::SellerId.eq(seller_id))
            .filter(products::Column::Status.eq(ProductStatus::Active))
            .lock_exclusive()
            .one(txn)
            .await
            .map_err(db_error)?
            .ok_or(OrderError::ProductNotFound(item.product_id))?;

        let product: Product = model.into();
        let adjustment = adjustment::apply_item(&product, request.order_type, item.quantity)?;

        products::ActiveModel {
            id: Set(product.id),
            quantity: Set(adjustment.new_quantity),
            ..Default::default()
        }
        .update(txn)
        .await
        .map_err(db_error)?;

        let line_id = Uuid::now_v7();
        order_item::ActiveModel {
            id: Set(line_id),
            order_id: Set(order_id),
            product_id: Set(product.id),
            quantity: Set(item.quantity),
            price_at_time: Set(adjustment.price_at_time),
            line_total: Set(adjustment.line_total),
        }
        .insert(txn)
        .await
        .map_err(db_error)?;

        total += adjustment.line_total;
        lines.push(OrderLine {
            id: line_id,
            product_id: product.id,
            product_name: product.name,
            quantity: item.quantity,
            price_at_time: adjustment.price_at_time,
            line_total: adjustment.line_total,
        });
    }

    order::ActiveModel {
        id: Set(order_id),
        total_price: Set(total),
        ..Default::default()
    }
    .update(txn)
    .await
    .map_err(db_error)?;

    let header = Order {
        id: order_id,
        seller_id,
        order_type: request.order_type,
        total_price: total,
        created_at,
    };

    Ok(OrderDetails::new(header, lines))
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, seller_id: Uuid, request: ValidatedOrder) -> OrderResult<OrderDetails> {
        let txn = self.db.begin().await.map_err(db_error)?;

        match apply_order(&txn, seller_id, &request).await {
            Ok(details) => {
                txn.commit().await.map_err(db_error)?;
                tracing::info!(
                    order_id = %details.id,
                    seller_id = %seller_id,
                    total = %details.total_price,
                    "Created order"
                );
                Ok(details)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Order rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn get_for_seller(
        &self,
        id: Uuid,
        seller_id: Uuid,
    ) -> OrderResult<Option<OrderDetails>> {
        let model = order::Entity::find_by_id(id)
            .filter(order::Column::SellerId.eq(seller_id))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let lines = Self::load_lines(&self.db, model.id).await?;
        Ok(Some(OrderDetails::new(model.into(), lines)))
    }

    async fn list_for_seller(&self, seller_id: Uuid) -> OrderResult<Vec<OrderDetails>> {
        let models = order::Entity::find()
            .filter(order::Column::SellerId.eq(seller_id))
            .order_by_desc(order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            let lines = Self::load_lines(&self.db, model.id).await?;
            result.push(OrderDetails::new(model.into(), lines));
        }

        Ok(result)
    }
}
