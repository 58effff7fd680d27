use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, ProductStatus, UpdateProduct},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_visible(&self, id: Uuid, seller_id: Uuid) -> ProductResult<Option<entity::Model>> {
        entity::Entity::find_by_id(id)
            .filter(entity::Column::SellerId.eq(seller_id))
            .filter(entity::Column::Status.eq(ProductStatus::Active))
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, seller_id: Uuid, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(seller_id, input);
        let active_model: entity::ActiveModel = product.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %model.id, seller_id = %seller_id, "Created product");
        Ok(model.into())
    }

    async fn get_active(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::Status.eq(ProductStatus::Active))
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_active(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Status.eq(ProductStatus::Active))
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn get_for_seller(&self, id: Uuid, seller_id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.find_visible(id, seller_id).await?.map(|m| m.into()))
    }

    async fn list_for_seller(&self, seller_id: Uuid) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::SellerId.eq(seller_id))
            .filter(entity::Column::Status.eq(ProductStatus::Active))
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        seller_id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        let model = self
            .find_visible(id, seller_id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model: entity::ActiveModel = product.into();
        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn set_quantity(
        &self,
        id: Uuid,
        seller_id: Uuid,
        quantity: i32,
    ) -> ProductResult<Product> {
        let model = self
            .find_visible(id, seller_id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.quantity = Set(quantity);
        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        Ok(updated.into())
    }

    async fn soft_delete(&self, id: Uuid, seller_id: Uuid) -> ProductResult<bool> {
        let model = match self.find_visible(id, seller_id).await? {
            Some(model) => model,
            None => return Ok(false),
        };

        let mut active_model: entity::ActiveModel = model.into();
        active_model.status = Set(ProductStatus::Deleted);
        active_model
            .update(&self.db)
            .await
            .map_err(|e| ProductError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(product_id = %id, "Soft deleted product");
        Ok(true)
    }
}
