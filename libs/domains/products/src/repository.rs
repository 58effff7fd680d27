use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductStatus, UpdateProduct};

/// Repository trait for Product persistence
///
/// Catalog reads (`get_active`, `list_active`) see every seller's
/// active products. The seller-scoped methods treat a product that
/// belongs to a different seller exactly like one that does not exist.
/// Soft-deleted products are filtered at this boundary either way.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product owned by the seller
    async fn create(&self, seller_id: Uuid, input: CreateProduct) -> ProductResult<Product>;

    /// Get an active product regardless of owner (public reads)
    async fn get_active(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List all active products across sellers (public reads)
    async fn list_active(&self) -> ProductResult<Vec<Product>>;

    /// Get an active product owned by the seller
    async fn get_for_seller(&self, id: Uuid, seller_id: Uuid) -> ProductResult<Option<Product>>;

    /// List a seller's active products
    async fn list_for_seller(&self, seller_id: Uuid) -> ProductResult<Vec<Product>>;

    /// Update an active product owned by the seller
    async fn update(
        &self,
        id: Uuid,
        seller_id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Product>;

    /// Overwrite the stock quantity of an active product owned by the seller
    async fn set_quantity(&self, id: Uuid, seller_id: Uuid, quantity: i32)
        -> ProductResult<Product>;

    /// Soft delete a product; returns false if not visible to the seller
    async fn soft_delete(&self, id: Uuid, seller_id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, seller_id: Uuid, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = Product::new(seller_id, input);
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, seller_id = %seller_id, "Created product");
        Ok(product)
    }

    async fn get_active(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).filter(|p| p.is_active()).cloned())
    }

    async fn list_active(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| p.is_active())
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn get_for_seller(&self, id: Uuid, seller_id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .get(&id)
            .filter(|p| p.seller_id == seller_id && p.is_active())
            .cloned())
    }

    async fn list_for_seller(&self, seller_id: Uuid) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| p.seller_id == seller_id && p.is_active())
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn update(
        &self,
        id: Uuid,
        seller_id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products
            .get_mut(&id)
            .filter(|p| p.seller_id == seller_id && p.is_active())
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn set_quantity(
        &self,
        id: Uuid,
        seller_id: Uuid,
        quantity: i32,
    ) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products
            .get_mut(&id)
            .filter(|p| p.seller_id == seller_id && p.is_active())
            .ok_or(ProductError::NotFound(id))?;

        product.quantity = quantity;
        product.updated_at = chrono::Utc::now();
        Ok(product.clone())
    }

    async fn soft_delete(&self, id: Uuid, seller_id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        match products
            .get_mut(&id)
            .filter(|p| p.seller_id == seller_id && p.is_active())
        {
            Some(product) => {
                product.status = ProductStatus::Deleted;
                product.updated_at = chrono::Utc::now();
                tracing::info!(product_id = %id, "Soft deleted product");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
