use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SellerError, SellerResult};
use crate::models::{
    LoginRequest, LoginResponse, NewSeller, RegisterSeller, SellerChanges, SellerResponse,
    UpdateSeller,
};
use crate::repository::SellerRepository;

/// Service layer for Seller business logic
///
/// Owns password hashing and token issuing; repositories only ever see
/// hashed passwords.
#[derive(Clone)]
pub struct SellerService<R: SellerRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: SellerRepository> SellerService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a new seller account
    pub async fn register(&self, input: RegisterSeller) -> SellerResult<SellerResponse> {
        input
            .validate()
            .map_err(|e| SellerError::Validation(e.to_string()))?;

        let password_hash = self.hash_password(&input.password)?;

        let seller = self
            .repository
            .create(NewSeller {
                name: input.name,
                username: input.username,
                password_hash,
            })
            .await?;

        Ok(seller.into())
    }

    /// Verify credentials and issue a bearer token
    pub async fn login(&self, input: LoginRequest) -> SellerResult<LoginResponse> {
        let seller = self
            .repository
            .get_by_username(&input.username)
            .await?
            .ok_or(SellerError::InvalidCredentials)?;

        if !self.verify_password(&input.password, &seller.password_hash)? {
            return Err(SellerError::InvalidCredentials);
        }

        let token = self
            .jwt
            .create_token(seller.id, &seller.username)
            .map_err(|e| SellerError::Internal(format!("Token creation failed: {}", e)))?;

        tracing::info!(seller_id = %seller.id, "Seller logged in");
        Ok(LoginResponse {
            token,
            seller: seller.into(),
        })
    }

    /// Get a seller by ID
    pub async fn get_seller(&self, id: Uuid) -> SellerResult<SellerResponse> {
        let seller = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(SellerError::NotFound(id))?;

        Ok(seller.into())
    }

    /// List all active sellers
    pub async fn list_sellers(&self) -> SellerResult<Vec<SellerResponse>> {
        let sellers = self.repository.list().await?;
        Ok(sellers.into_iter().map(|s| s.into()).collect())
    }

    /// Update a seller's profile; sellers may only modify their own account
    pub async fn update_seller(
        &self,
        id: Uuid,
        auth_seller_id: Uuid,
        input: UpdateSeller,
    ) -> SellerResult<SellerResponse> {
        if id != auth_seller_id {
            return Err(SellerError::Forbidden);
        }

        input
            .validate()
            .map_err(|e| SellerError::Validation(e.to_string()))?;

        let password_hash = match input.password {
            Some(ref password) => Some(self.hash_password(password)?),
            None => None,
        };

        let updated = self
            .repository
            .update(
                id,
                SellerChanges {
                    name: input.name,
                    username: input.username,
                    password_hash,
                },
            )
            .await?;

        Ok(updated.into())
    }

    /// Soft delete a seller's account; sellers may only delete their own
    pub async fn delete_seller(&self, id: Uuid, auth_seller_id: Uuid) -> SellerResult<()> {
        if id != auth_seller_id {
            return Err(SellerError::Forbidden);
        }

        let deleted = self.repository.soft_delete(id).await?;
        if !deleted {
            return Err(SellerError::NotFound(id));
        }

        Ok(())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> SellerResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SellerError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> SellerResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| SellerError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordStatus, Seller};
    use crate::repository::MockSellerRepository;
    use axum_helpers::JwtConfig;
    use chrono::Utc;

    fn test_jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(
            "test-secret-that-is-long-enough-for-hs256",
        ))
    }

    fn seller_with_password(password: &str) -> Seller {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();

        Seller {
            id: Uuid::now_v7(),
            name: "Alice".to_string(),
            username: "alice".to_string(),
            password_hash: hash,
            status: RecordStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockSellerRepository::new();
        mock_repo.expect_create().returning(|input| {
            assert_ne!(input.password_hash, "hunter2-longer");
            assert!(input.password_hash.starts_with("$argon2"));
            Ok(Seller::new(input))
        });

        let service = SellerService::new(mock_repo, test_jwt());
        let response = service
            .register(RegisterSeller {
                name: "Alice".to_string(),
                username: "alice".to_string(),
                password: "hunter2-longer".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.username, "alice");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let mock_repo = MockSellerRepository::new();
        let service = SellerService::new(mock_repo, test_jwt());

        let result = service
            .register(RegisterSeller {
                name: "Alice".to_string(),
                username: "a".to_string(),
                password: "hunter2-longer".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SellerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let seller = seller_with_password("hunter2-longer");
        let seller_clone = seller.clone();

        let mut mock_repo = MockSellerRepository::new();
        mock_repo
            .expect_get_by_username()
            .returning(move |_| Ok(Some(seller_clone.clone())));

        let service = SellerService::new(mock_repo, test_jwt());
        let response = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "hunter2-longer".to_string(),
            })
            .await
            .unwrap();

        assert!(!response.token.is_empty());
        assert_eq!(response.seller.id, seller.id);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let seller = seller_with_password("hunter2-longer");

        let mut mock_repo = MockSellerRepository::new();
        mock_repo
            .expect_get_by_username()
            .returning(move |_| Ok(Some(seller.clone())));

        let service = SellerService::new(mock_repo, test_jwt());
        let result = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SellerError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let mut mock_repo = MockSellerRepository::new();
        mock_repo.expect_get_by_username().returning(|_| Ok(None));

        let service = SellerService::new(mock_repo, test_jwt());
        let result = service
            .login(LoginRequest {
                username: "nobody".to_string(),
                password: "whatever1".to_string(),
            })
            .await;

        // Unknown username and wrong password are indistinguishable
        assert!(matches!(result, Err(SellerError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_other_seller_is_forbidden() {
        let mock_repo = MockSellerRepository::new();
        let service = SellerService::new(mock_repo, test_jwt());

        let result = service
            .update_seller(
                Uuid::now_v7(),
                Uuid::now_v7(),
                UpdateSeller {
                    name: Some("Eve".to_string()),
                    username: None,
                    password: None,
                },
            )
            .await;

        assert!(matches!(result, Err(SellerError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_other_seller_is_forbidden() {
        let mock_repo = MockSellerRepository::new();
        let service = SellerService::new(mock_repo, test_jwt());

        let result = service.delete_seller(Uuid::now_v7(), Uuid::now_v7()).await;
        assert!(matches!(result, Err(SellerError::Forbidden)));
    }
}
