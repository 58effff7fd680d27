use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SellerError, SellerResult};
use crate::models::{NewSeller, RecordStatus, Seller, SellerChanges};

/// Repository trait for Seller persistence
///
/// All read methods see only active sellers; soft-deleted rows are
/// filtered at this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// Create a new seller, rejecting duplicate usernames
    async fn create(&self, input: NewSeller) -> SellerResult<Seller>;

    /// Get an active seller by ID
    async fn get_by_id(&self, id: Uuid) -> SellerResult<Option<Seller>>;

    /// Get an active seller by username (for login)
    async fn get_by_username(&self, username: &str) -> SellerResult<Option<Seller>>;

    /// List all active sellers
    async fn list(&self) -> SellerResult<Vec<Seller>>;

    /// Update an active seller's profile fields
    async fn update(&self, id: Uuid, changes: SellerChanges) -> SellerResult<Seller>;

    /// Soft delete a seller; returns false if not found or already deleted
    async fn soft_delete(&self, id: Uuid) -> SellerResult<bool>;
}

/// In-memory implementation of SellerRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySellerRepository {
    sellers: Arc<RwLock<HashMap<Uuid, Seller>>>,
}

impl InMemorySellerRepository {
    pub fn new() -> Self {
        Self {
            sellers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SellerRepository for InMemorySellerRepository {
    async fn create(&self, input: NewSeller) -> SellerResult<Seller> {
        let mut sellers = self.sellers.write().await;

        // Usernames stay reserved even after soft deletion
        let username_taken = sellers.values().any(|s| s.username == input.username);
        if username_taken {
            return Err(SellerError::DuplicateUsername(input.username));
        }

        let seller = Seller::new(input);
        sellers.insert(seller.id, seller.clone());

        tracing::info!(seller_id = %seller.id, "Created seller");
        Ok(seller)
    }

    async fn get_by_id(&self, id: Uuid) -> SellerResult<Option<Seller>> {
        let sellers = self.sellers.read().await;
        Ok(sellers.get(&id).filter(|s| s.is_active()).cloned())
    }

    async fn get_by_username(&self, username: &str) -> SellerResult<Option<Seller>> {
        let sellers = self.sellers.read().await;
        Ok(sellers
            .values()
            .find(|s| s.username == username && s.is_active())
            .cloned())
    }

    async fn list(&self) -> SellerResult<Vec<Seller>> {
        let sellers = self.sellers.read().await;
        let mut result: Vec<Seller> = sellers.values().filter(|s| s.is_active()).cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn update(&self, id: Uuid, changes: SellerChanges) -> SellerResult<Seller> {
        let mut sellers = self.sellers.write().await;

        if let Some(ref username) = changes.username {
            let taken = sellers.values().any(|s| s.username == *username && s.id != id);
            if taken {
                return Err(SellerError::DuplicateUsername(username.clone()));
            }
        }

        let seller = sellers
            .get_mut(&id)
            .filter(|s| s.is_active())
            .ok_or(SellerError::NotFound(id))?;

        seller.apply_changes(changes);
        let updated = seller.clone();

        tracing::info!(seller_id = %id, "Updated seller");
        Ok(updated)
    }

    async fn soft_delete(&self, id: Uuid) -> SellerResult<bool> {
        let mut sellers = self.sellers.write().await;

        match sellers.get_mut(&id).filter(|s| s.is_active()) {
            Some(seller) => {
                seller.status = RecordStatus::Deleted;
                seller.updated_at = chrono::Utc::now();
                tracing::info!(seller_id = %id, "Soft deleted seller");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl axum_helpers::ActiveSellerLookup for InMemorySellerRepository {
    async fn is_active_seller(&self, seller_id: Uuid) -> Result<bool, String> {
        Ok(self
            .sellers
            .read()
            .await
            .get(&seller_id)
            .is_some_and(|s| s.is_active()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_seller(username: &str) -> NewSeller {
        NewSeller {
            name: "Test Seller".to_string(),
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_seller() {
        let repo = InMemorySellerRepository::new();

        let seller = repo.create(new_seller("alice")).await.unwrap();
        assert_eq!(seller.username, "alice");
        assert_eq!(seller.status, RecordStatus::Active);

        let fetched = repo.get_by_id(seller.id).await.unwrap();
        assert_eq!(fetched.unwrap().id, seller.id);

        let by_username = repo.get_by_username("alice").await.unwrap();
        assert_eq!(by_username.unwrap().id, seller.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemorySellerRepository::new();
        repo.create(new_seller("alice")).await.unwrap();

        let result = repo.create(new_seller("alice")).await;
        assert!(matches!(result, Err(SellerError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_seller_from_reads() {
        let repo = InMemorySellerRepository::new();
        let seller = repo.create(new_seller("alice")).await.unwrap();

        assert!(repo.soft_delete(seller.id).await.unwrap());

        assert!(repo.get_by_id(seller.id).await.unwrap().is_none());
        assert!(repo.get_by_username("alice").await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());

        // Second delete is a no-op
        assert!(!repo.soft_delete(seller.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_username_stays_reserved_after_soft_delete() {
        let repo = InMemorySellerRepository::new();
        let seller = repo.create(new_seller("alice")).await.unwrap();
        repo.soft_delete(seller.id).await.unwrap();

        let result = repo.create(new_seller("alice")).await;
        assert!(matches!(result, Err(SellerError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_update_deleted_seller_is_not_found() {
        let repo = InMemorySellerRepository::new();
        let seller = repo.create(new_seller("alice")).await.unwrap();
        repo.soft_delete(seller.id).await.unwrap();

        let result = repo
            .update(
                seller.id,
                SellerChanges {
                    name: Some("New Name".to_string()),
                    username: None,
                    password_hash: None,
                },
            )
            .await;
        assert!(matches!(result, Err(SellerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_username_is_rejected() {
        let repo = InMemorySellerRepository::new();
        repo.create(new_seller("alice")).await.unwrap();
        let bob = repo.create(new_seller("bob")).await.unwrap();

        let result = repo
            .update(
                bob.id,
                SellerChanges {
                    name: None,
                    username: Some("alice".to_string()),
                    password_hash: None,
                },
            )
            .await;
        assert!(matches!(result, Err(SellerError::DuplicateUsername(_))));
    }
}
