use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{SellerError, SellerResult},
    models::{NewSeller, RecordStatus, Seller, SellerChanges},
    repository::SellerRepository,
};

pub struct PgSellerRepository {
    db: DatabaseConnection,
}

impl PgSellerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active(&self, id: Uuid) -> SellerResult<Option<entity::Model>> {
        entity::Entity::find_by_id(id)
            .filter(entity::Column::Status.eq(RecordStatus::Active))
            .one(&self.db)
            .await
            .map_err(|e| SellerError::Internal(format!("Database error: {}", e)))
    }
}

#[async_trait]
impl SellerRepository for PgSellerRepository {
    async fn create(&self, input: NewSeller) -> SellerResult<Seller> {
        // Usernames stay reserved even after soft deletion
        let username_taken = entity::Entity::find()
            .filter(entity::Column::Username.eq(&input.username))
            .one(&self.db)
            .await
            .map_err(|e| SellerError::Internal(format!("Database error: {}", e)))?
            .is_some();

        if username_taken {
            return Err(SellerError::DuplicateUsername(input.username));
        }

        let seller = Seller::new(input);
        let active_model: entity::ActiveModel = seller.into();

        let model = active_model.insert(&self.db).await.map_err(|e| {
            // Concurrent registration can still trip the unique index
            if e.to_string().contains("duplicate key") {
                SellerError::DuplicateUsername("username".to_string())
            } else {
                SellerError::Internal(format!("Database error: {}", e))
            }
        })?;

        tracing::info!(seller_id = %model.id, "Created seller");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> SellerResult<Option<Seller>> {
        Ok(self.find_active(id).await?.map(|m| m.into()))
    }

    async fn get_by_username(&self, username: &str) -> SellerResult<Option<Seller>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .filter(entity::Column::Status.eq(RecordStatus::Active))
            .one(&self.db)
            .await
            .map_err(|e| SellerError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> SellerResult<Vec<Seller>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Status.eq(RecordStatus::Active))
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SellerError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, id: Uuid, changes: SellerChanges) -> SellerResult<Seller> {
        if let Some(ref username) = changes.username {
            let taken = entity::Entity::find()
                .filter(entity::Column::Username.eq(username))
                .filter(entity::Column::Id.ne(id))
                .one(&self.db)
                .await
                .map_err(|e| SellerError::Internal(format!("Database error: {}", e)))?
                .is_some();

            if taken {
                return Err(SellerError::DuplicateUsername(username.clone()));
            }
        }

        let model = self.find_active(id).await?.ok_or(SellerError::NotFound(id))?;

        let mut seller: Seller = model.into();
        seller.apply_changes(changes);

        let active_model: entity::ActiveModel = seller.into();
        let updated = active_model.update(&self.db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") {
                SellerError::DuplicateUsername("username".to_string())
            } else {
                SellerError::Internal(format!("Database error: {}", e))
            }
        })?;

        tracing::info!(seller_id = %id, "Updated seller");
        Ok(updated.into())
    }

    async fn soft_delete(&self, id: Uuid) -> SellerResult<bool> {
        let model = match self.find_active(id).await? {
            Some(model) => model,
            None => return Ok(false),
        };

        let mut active_model: entity::ActiveModel = model.into();
        active_model.status = Set(RecordStatus::Deleted);
        active_model
            .update(&self.db)
            .await
            .map_err(|e| SellerError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(seller_id = %id, "Soft deleted seller");
        Ok(true)
    }
}

#[async_trait]
impl axum_helpers::ActiveSellerLookup for PgSellerRepository {
    async fn is_active_seller(&self, seller_id: Uuid) -> Result<bool, String> {
        self.find_active(seller_id)
            .await
            .map(|model| model.is_some())
            .map_err(|e| e.to_string())
    }
}
