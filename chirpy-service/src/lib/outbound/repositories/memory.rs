//! In-memory adapters of the repository ports.
//!
//! All three repositories share one [`InMemoryDatabase`] so that removing
//! accounts cascades to their refresh tokens and chirps, as the Postgres
//! foreign keys do. Used by the HTTP integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::ports::ChirpRepository;
use crate::session::errors::SessionError;
use crate::session::models::RefreshToken;
use crate::session::ports::RefreshTokenRepository;

pub struct InMemoryDatabase {
    accounts: RwLock<HashMap<AccountId, Account>>,
    refresh_tokens: RwLock<HashMap<String, RefreshToken>>,
    chirps: RwLock<Vec<Chirp>>,
}

impl InMemoryDatabase {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            accounts: RwLock::new(HashMap::new()),
            refresh_tokens: RwLock::new(HashMap::new()),
            chirps: RwLock::new(Vec::new()),
        })
    }
}

pub struct InMemoryAccountRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryAccountRepository {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.database.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.database.accounts.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self
            .database
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == *email)
            .cloned())
    }

    async fn update_credentials(
        &self,
        id: &AccountId,
        email: &EmailAddress,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.database.accounts.write().await;

        if accounts.values().any(|a| a.email == *email && a.id != *id) {
            return Err(AccountError::EmailAlreadyExists(email.as_str().to_string()));
        }

        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        account.email = email.clone();
        account.password_hash = password_hash.to_string();
        account.updated_at = updated_at;

        Ok(account.clone())
    }

    async fn set_subscription(
        &self,
        id: &AccountId,
        is_chirpy_red: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        let mut accounts = self.database.accounts.write().await;

        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        account.is_chirpy_red = is_chirpy_red;
        account.updated_at = updated_at;

        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, AccountError> {
        let mut accounts = self.database.accounts.write().await;
        let removed = accounts.len() as u64;

        accounts.clear();
        self.database.refresh_tokens.write().await.clear();
        self.database.chirps.write().await.clear();

        Ok(removed)
    }
}

pub struct InMemoryRefreshTokenRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError> {
        let mut tokens = self.database.refresh_tokens.write().await;

        if tokens.contains_key(&token.token) {
            return Err(SessionError::StoreFailure(
                "duplicate refresh token".to_string(),
            ));
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self.database.refresh_tokens.read().await.get(token).cloned())
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, SessionError> {
        let mut tokens = self.database.refresh_tokens.write().await;

        match tokens.get_mut(token) {
            Some(record) => {
                if record.revoked_at.is_none() {
                    record.revoked_at = Some(revoked_at);
                    record.updated_at = revoked_at;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct InMemoryChirpRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryChirpRepository {
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.database.chirps.write().await.push(chirp.clone());
        Ok(chirp)
    }

    async fn find_all(&self, author_id: Option<AccountId>) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .database
            .chirps
            .read()
            .await
            .iter()
            .filter(|c| author_id.map_or(true, |id| c.author_id == id))
            .cloned()
            .collect();

        // Stable, so equal timestamps keep insertion order.
        chirps.sort_by_key(|c| c.created_at);

        Ok(chirps)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .database
            .chirps
            .read()
            .await
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.database.chirps.write().await;
        let before = chirps.len();

        chirps.retain(|c| c.id != *id);

        if chirps.len() == before {
            return Err(ChirpError::NotFound(*id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn account(email: &str, now: DateTime<Utc>) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "hash".to_string(),
            created_at: now,
            updated_at: now,
            is_chirpy_red: false,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let now = Utc::now();
        let accounts = InMemoryAccountRepository::new(InMemoryDatabase::new());

        accounts.create(account("walt@breakingbad.com", now)).await.unwrap();
        let result = accounts.create(account("walt@breakingbad.com", now)).await;

        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_revoke_keeps_first_timestamp() {
        let now = Utc::now();
        let tokens = InMemoryRefreshTokenRepository::new(InMemoryDatabase::new());

        tokens
            .create(RefreshToken {
                token: "abc".to_string(),
                account_id: AccountId::new(),
                created_at: now,
                updated_at: now,
                expires_at: now + Duration::days(60),
                revoked_at: None,
            })
            .await
            .unwrap();

        assert!(tokens.revoke("abc", now).await.unwrap());
        assert!(tokens.revoke("abc", now + Duration::hours(1)).await.unwrap());
        assert!(!tokens.revoke("missing", now).await.unwrap());

        let stored = tokens.find_by_token("abc").await.unwrap().unwrap();
        assert_eq!(stored.revoked_at, Some(now));
    }

    #[tokio::test]
    async fn test_delete_all_cascades() {
        let now = Utc::now();
        let database = InMemoryDatabase::new();
        let accounts = InMemoryAccountRepository::new(database.clone());
        let chirps = InMemoryChirpRepository::new(database.clone());

        let author = accounts.create(account("walt@breakingbad.com", now)).await.unwrap();
        chirps
            .create(Chirp {
                id: ChirpId::new(),
                author_id: author.id,
                body: crate::chirp::models::ChirpBody::from_stored("hi".to_string()),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        assert_eq!(accounts.delete_all().await.unwrap(), 1);
        assert!(chirps.find_all(None).await.unwrap().is_empty());
    }
}
