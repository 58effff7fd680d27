use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
///
/// Every operation takes the authenticated seller's id; ownership is
/// never inferred from the payload.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a product in the seller's catalog
    pub async fn create_product(
        &self,
        seller_id: Uuid,
        input: CreateProduct,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(seller_id, input).await
    }

    /// Get an active product (public read, any seller's catalog)
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_active(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all active products (public read)
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_active().await
    }

    /// List one seller's active products (public read)
    pub async fn list_seller_products(&self, seller_id: Uuid) -> ProductResult<Vec<Product>> {
        self.repository.list_for_seller(seller_id).await
    }

    /// Partially update one of the seller's products
    pub async fn update_product(
        &self,
        id: Uuid,
        seller_id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, seller_id, input).await
    }

    /// Soft delete one of the seller's products
    pub async fn delete_product(&self, id: Uuid, seller_id: Uuid) -> ProductResult<()> {
        let deleted = self.repository.soft_delete(id, seller_id).await?;
        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}
