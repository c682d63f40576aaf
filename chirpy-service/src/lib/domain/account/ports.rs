use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::UpdateCredentialsCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Replace email and password of an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email belongs to another account
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn update_credentials(
        &self,
        id: &AccountId,
        command: UpdateCredentialsCommand,
    ) -> Result<Account, AccountError>;

    /// Mark an account as subscribed (Chirpy Red).
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn upgrade_subscription(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Remove every account, cascading to their tokens and chirps.
    ///
    /// # Returns
    /// Number of accounts removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn reset(&self) -> Result<u64, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Overwrite email and password hash, stamping `updated_at`.
    ///
    /// # Returns
    /// Updated account entity
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_credentials(
        &self,
        id: &AccountId,
        email: &EmailAddress,
        password_hash: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountError>;

    /// Set the subscription flag, stamping `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_subscription(
        &self,
        id: &AccountId,
        is_chirpy_red: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<(), AccountError>;

    /// Remove all accounts.
    ///
    /// # Returns
    /// Number of rows removed
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_all(&self) -> Result<u64, AccountError>;
}
